//! Parsing and printing of standalone expressions
//!
//! Keys and replacement values are small pieces of source text. They are
//! parsed with the same oxc front-end as the input files and printed with the
//! same code generator, so a key written as `process . env.NODE_ENV` matches
//! the node `process.env.NODE_ENV`.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ArrowFunctionExpression, AwaitExpression, Expression, Function, Statement, YieldExpression,
};
use oxc_ast_visit::Visit;
use oxc_codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use oxc_syntax::scope::ScopeFlags;

/// Coarse kind of an expression's root node.
///
/// Only nodes whose shape matches some key are printed during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionShape {
    Identifier,
    Member,
    Call,
    Unary,
    Literal,
    Other,
}

impl ExpressionShape {
    pub fn of(expr: &Expression<'_>) -> Self {
        match expr {
            // the printer drops redundant parentheses, so `(a)` prints as `a`
            Expression::ParenthesizedExpression(paren) => Self::of(&paren.expression),
            Expression::Identifier(_) => ExpressionShape::Identifier,
            Expression::StaticMemberExpression(_)
            | Expression::ComputedMemberExpression(_)
            | Expression::PrivateFieldExpression(_) => ExpressionShape::Member,
            Expression::CallExpression(_) => ExpressionShape::Call,
            Expression::UnaryExpression(_) => ExpressionShape::Unary,
            Expression::BooleanLiteral(_)
            | Expression::NullLiteral(_)
            | Expression::NumericLiteral(_)
            | Expression::BigIntLiteral(_)
            | Expression::RegExpLiteral(_)
            | Expression::StringLiteral(_)
            | Expression::TemplateLiteral(_) => ExpressionShape::Literal,
            _ => ExpressionShape::Other,
        }
    }
}

/// Parse `text` as exactly one expression, allocated in `allocator`.
///
/// The text is wrapped in parentheses so object literals parse as
/// expressions and trailing tokens (`foo bar`, `a); (b`) are rejected.
/// Returns `None` on any syntax error or on empty input, and when the
/// expression awaits or yields outside a nested function: module top level
/// accepts `await x`, but the site it is spliced into may not.
pub fn parse_expression<'a>(
    allocator: &'a Allocator,
    text: &str,
    source_type: SourceType,
) -> Option<Expression<'a>> {
    if text.trim().is_empty() {
        return None;
    }

    let wrapped = allocator.alloc_str(&format!("({}\n)", text));
    let ret = Parser::new(allocator, wrapped, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return None;
    }

    let mut program = ret.program;
    if program.body.len() != 1 {
        return None;
    }
    let Some(Statement::ExpressionStatement(stmt)) = program.body.pop() else {
        return None;
    };
    let expr = match stmt.unbox().expression {
        Expression::ParenthesizedExpression(paren) => paren.unbox().expression,
        _ => return None,
    };

    let mut finder = SuspensionFinder::default();
    finder.visit_expression(&expr);
    (!finder.found).then_some(expr)
}

/// Finds `await`/`yield` that belong to the enclosing function
#[derive(Default)]
struct SuspensionFinder {
    found: bool,
}

impl<'a> Visit<'a> for SuspensionFinder {
    fn visit_await_expression(&mut self, _it: &AwaitExpression<'a>) {
        self.found = true;
    }

    fn visit_yield_expression(&mut self, _it: &YieldExpression<'a>) {
        self.found = true;
    }

    fn visit_function(&mut self, _it: &Function<'a>, _flags: ScopeFlags) {}

    fn visit_arrow_function_expression(&mut self, _it: &ArrowFunctionExpression<'a>) {}
}

/// Print an expression the way the code generator would emit it.
///
/// Comments are left out so `/* @__PURE__ */ f()` renders as `f()`.
pub fn render_expression(expr: &Expression<'_>) -> String {
    let mut codegen = Codegen::new().with_options(CodegenOptions {
        comments: CommentOptions::disabled(),
        ..CodegenOptions::default()
    });
    codegen.print_expression(expr);
    codegen.into_source_text()
}

/// Normalize a replacement key to its printed form.
///
/// Keys are parsed as TypeScript so type assertions and non-null
/// assertions are accepted; plain JavaScript keys parse identically.
pub fn normalize_key(key: &str) -> Option<(String, ExpressionShape)> {
    let allocator = Allocator::default();
    let expr = parse_expression(&allocator, key, SourceType::ts())?;
    Some((render_expression(&expr), ExpressionShape::of(&expr)))
}
