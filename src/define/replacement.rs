//! Replacement value resolution and literal classification
//!
//! A configured value is resolved through at most one environment
//! indirection, classified into a [`Replacement`], and finally built into a
//! fresh AST node for every matching site.

use super::syntax::parse_expression;
use crate::config::ReplaceValue;
use crate::env::{env_reference, EnvLookup};
use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, UnaryOperator};
use oxc_ast::AstBuilder;
use oxc_ast_visit::VisitMut;
use oxc_span::{SourceType, Span};
use oxc_syntax::number::NumberBase;

/// A classified replacement
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    Boolean(bool),
    Number(f64),
    /// String literal holding the unquoted content
    String(String),
    /// Source text spliced in as an expression when it parses
    Expression(String),
}

/// Outcome of resolving a configured value
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Replacement),
    /// The value referenced an environment variable that is not set
    Unset { name: String },
}

impl Replacement {
    /// Resolve a configured value, reading at most one environment variable.
    ///
    /// The variable's content is classified but never resolved again, so a
    /// variable holding `process.env.OTHER` becomes that member expression.
    pub fn resolve(value: &ReplaceValue, env: &impl EnvLookup) -> Resolution {
        match value {
            ReplaceValue::Bool(b) => Resolution::Resolved(Replacement::Boolean(*b)),
            ReplaceValue::Number(n) => Resolution::Resolved(Replacement::Number(*n)),
            ReplaceValue::String(text) => match env_reference(text) {
                Some(name) => match env.get(name) {
                    Some(content) => Resolution::Resolved(Self::classify(&content)),
                    None => Resolution::Unset {
                        name: name.to_string(),
                    },
                },
                None => Resolution::Resolved(Self::classify(text)),
            },
        }
    }

    /// Classify raw text.
    ///
    /// `true`/`false` (case-sensitive) become booleans. Text delimited by a
    /// matching pair of quotes becomes a string literal, unless it parses as
    /// some other expression (`"a" + "b"`) or as a template with
    /// substitutions. Everything else is passed through as an expression.
    pub fn classify(text: &str) -> Replacement {
        match text {
            "true" => Replacement::Boolean(true),
            "false" => Replacement::Boolean(false),
            _ if is_quoted(text) => classify_quoted(text),
            _ => Replacement::Expression(text.to_string()),
        }
    }

    /// Build a node for one replacement site.
    ///
    /// Returns `None` when an expression fails to parse; the caller keeps the
    /// original node.
    pub fn build<'a>(
        &self,
        ast: AstBuilder<'a>,
        span: Span,
        source_type: SourceType,
    ) -> Option<Expression<'a>> {
        match self {
            Replacement::Boolean(value) => Some(ast.expression_boolean_literal(span, *value)),
            Replacement::Number(value) => Some(number_expression(ast, span, *value)),
            Replacement::String(value) => {
                let atom = ast.allocator.alloc_str(value);
                Some(ast.expression_string_literal(span, atom, None))
            }
            Replacement::Expression(text) => {
                let mut expr = parse_expression(ast.allocator, text, source_type)?;
                SpanReset { span }.visit_expression(&mut expr);
                Some(expr)
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Replacement::Boolean(_) => "boolean",
            Replacement::Number(_) => "number",
            Replacement::String(_) => "string",
            Replacement::Expression(_) => "expression",
        }
    }
}

fn is_quoted(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 2
        && matches!(bytes[0], b'"' | b'\'' | b'`')
        && bytes[0] == bytes[bytes.len() - 1]
}

fn classify_quoted(text: &str) -> Replacement {
    let allocator = Allocator::default();
    match parse_expression(&allocator, text, SourceType::mjs()) {
        Some(Expression::StringLiteral(lit)) => Replacement::String(lit.value.to_string()),
        Some(Expression::TemplateLiteral(tpl)) if tpl.expressions.is_empty() => {
            match tpl.quasis.first().and_then(|q| q.value.cooked.as_ref()) {
                Some(cooked) => Replacement::String(cooked.to_string()),
                None => Replacement::String(text[1..text.len() - 1].to_string()),
            }
        }
        Some(_) => Replacement::Expression(text.to_string()),
        None => Replacement::String(text[1..text.len() - 1].to_string()),
    }
}

fn number_expression<'a>(ast: AstBuilder<'a>, span: Span, value: f64) -> Expression<'a> {
    if value.is_nan() {
        return ast.expression_identifier(span, "NaN");
    }

    let magnitude = value.abs();
    let literal = if magnitude.is_infinite() {
        ast.expression_identifier(span, "Infinity")
    } else {
        ast.expression_numeric_literal(span, magnitude, None, NumberBase::Decimal)
    };

    if value.is_sign_negative() {
        ast.expression_unary(span, UnaryOperator::UnaryNegation, literal)
    } else {
        literal
    }
}

/// Moves every span of a spliced subtree onto the replaced node's span
struct SpanReset {
    span: Span,
}

impl<'a> VisitMut<'a> for SpanReset {
    fn visit_span(&mut self, it: &mut Span) {
        *it = self.span;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use oxc_span::SPAN;

    fn string(s: &str) -> ReplaceValue {
        ReplaceValue::String(s.to_string())
    }

    #[test]
    fn test_classify_booleans_are_case_sensitive() {
        assert_eq!(Replacement::classify("true"), Replacement::Boolean(true));
        assert_eq!(Replacement::classify("false"), Replacement::Boolean(false));
        assert_eq!(
            Replacement::classify("True"),
            Replacement::Expression("True".to_string())
        );
    }

    #[test]
    fn test_classify_quoted_strings() {
        assert_eq!(
            Replacement::classify("\"development\""),
            Replacement::String("development".to_string())
        );
        assert_eq!(
            Replacement::classify("'production'"),
            Replacement::String("production".to_string())
        );
        assert_eq!(
            Replacement::classify("`plain`"),
            Replacement::String("plain".to_string())
        );
        assert_eq!(
            Replacement::classify(r#""say \"hi\"""#),
            Replacement::String("say \"hi\"".to_string())
        );
    }

    #[test]
    fn test_classify_quote_delimited_expressions() {
        assert_eq!(
            Replacement::classify("\"a\" + \"b\""),
            Replacement::Expression("\"a\" + \"b\"".to_string())
        );
        assert_eq!(
            Replacement::classify("`v${x}`"),
            Replacement::Expression("`v${x}`".to_string())
        );
        // unbalanced inner quote: not valid syntax, keep the inner text
        assert_eq!(
            Replacement::classify("\"a\"b\""),
            Replacement::String("a\"b".to_string())
        );
    }

    #[test]
    fn test_classify_passthrough() {
        assert_eq!(
            Replacement::classify("typeof window"),
            Replacement::Expression("typeof window".to_string())
        );
        assert_eq!(
            Replacement::classify("42"),
            Replacement::Expression("42".to_string())
        );
        assert_eq!(Replacement::classify("\""), Replacement::Expression("\"".to_string()));
    }

    #[test]
    fn test_resolve_direct_values() {
        let env = MapEnv::new();
        assert_eq!(
            Replacement::resolve(&ReplaceValue::Bool(true), &env),
            Resolution::Resolved(Replacement::Boolean(true))
        );
        assert_eq!(
            Replacement::resolve(&ReplaceValue::Number(2.5), &env),
            Resolution::Resolved(Replacement::Number(2.5))
        );
        assert_eq!(
            Replacement::resolve(&string("false"), &env),
            Resolution::Resolved(Replacement::Boolean(false))
        );
    }

    #[test]
    fn test_resolve_through_environment() {
        let env = MapEnv::new()
            .with("LMAO", "true")
            .with("ENVY_ENV", "\"production\"")
            .with("CHAINED", "process.env.LMAO");

        assert_eq!(
            Replacement::resolve(&string("process.env.LMAO"), &env),
            Resolution::Resolved(Replacement::Boolean(true))
        );
        assert_eq!(
            Replacement::resolve(&string("process.env.ENVY_ENV"), &env),
            Resolution::Resolved(Replacement::String("production".to_string()))
        );
        // one level only
        assert_eq!(
            Replacement::resolve(&string("process.env.CHAINED"), &env),
            Resolution::Resolved(Replacement::Expression("process.env.LMAO".to_string()))
        );
    }

    #[test]
    fn test_resolve_unset_variable() {
        let env = MapEnv::new();
        assert_eq!(
            Replacement::resolve(&string("process.env.NOT_EXIST"), &env),
            Resolution::Unset {
                name: "NOT_EXIST".to_string()
            }
        );
    }

    #[test]
    fn test_build_literals() {
        let allocator = Allocator::default();
        let ast = AstBuilder::new(&allocator);
        let js = SourceType::mjs();

        let expr = Replacement::Boolean(true).build(ast, SPAN, js).unwrap();
        assert!(matches!(expr, Expression::BooleanLiteral(ref b) if b.value));

        let expr = Replacement::String("x".to_string()).build(ast, SPAN, js).unwrap();
        assert!(matches!(expr, Expression::StringLiteral(ref s) if s.value.as_str() == "x"));

        let expr = Replacement::Number(-3.0).build(ast, SPAN, js).unwrap();
        assert!(matches!(expr, Expression::UnaryExpression(_)));

        let expr = Replacement::Number(0.0).build(ast, SPAN, js).unwrap();
        assert!(matches!(expr, Expression::NumericLiteral(_)));
    }

    #[test]
    fn test_build_expression_resets_spans() {
        let allocator = Allocator::default();
        let ast = AstBuilder::new(&allocator);
        let span = Span::new(100, 120);

        let expr = Replacement::Expression("a.b + c".to_string())
            .build(ast, span, SourceType::mjs())
            .unwrap();
        let Expression::BinaryExpression(bin) = &expr else {
            panic!("expected binary expression");
        };
        assert_eq!(bin.span, span);
        assert!(matches!(&bin.right, Expression::Identifier(id) if id.span == span));
    }

    #[test]
    fn test_build_unparsable_expression() {
        let allocator = Allocator::default();
        let ast = AstBuilder::new(&allocator);
        let built = Replacement::Expression("foo bar".to_string()).build(ast, SPAN, SourceType::mjs());
        assert!(built.is_none());
        let built = Replacement::Expression(String::new()).build(ast, SPAN, SourceType::mjs());
        assert!(built.is_none());
    }
}
