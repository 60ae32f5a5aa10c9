//! The substitution visitor

use super::replacement::{Replacement, Resolution};
use super::syntax::{render_expression, ExpressionShape};
use super::table::ReplacementTable;
use super::DefineStats;
use crate::env::EnvLookup;
use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, ObjectProperty};
use oxc_ast::AstBuilder;
use oxc_ast_visit::{walk_mut, VisitMut};
use oxc_span::{GetSpan, SourceType};

/// What happened at one expression node
enum Outcome<'a> {
    /// Not a key; keep walking into children
    NoMatch,
    /// Matched and replaced; the new node is final
    Replaced(Expression<'a>),
    /// Matched but the value could not be resolved or parsed
    Kept,
}

/// Replaces expressions whose printed text is a key of the table.
///
/// Only expression positions are visited: member property names, binding
/// identifiers and assignment targets are never rewritten.
pub struct DefineReplacer<'a, 't, E: EnvLookup> {
    ast: AstBuilder<'a>,
    table: &'t ReplacementTable,
    env: &'t E,
    source_type: SourceType,
    stats: DefineStats,
}

impl<'a, 't, E: EnvLookup> DefineReplacer<'a, 't, E> {
    pub fn new(
        allocator: &'a Allocator,
        table: &'t ReplacementTable,
        env: &'t E,
        source_type: SourceType,
    ) -> Self {
        Self {
            ast: AstBuilder::new(allocator),
            table,
            env,
            source_type,
            stats: DefineStats::default(),
        }
    }

    pub fn stats(&self) -> DefineStats {
        self.stats
    }

    fn substitute(&mut self, expr: &Expression<'a>) -> Outcome<'a> {
        if !self.table.may_match(ExpressionShape::of(expr)) {
            return Outcome::NoMatch;
        }

        let text = render_expression(expr);
        let Some(value) = self.table.lookup(&text) else {
            return Outcome::NoMatch;
        };

        let replacement = match Replacement::resolve(value, self.env) {
            Resolution::Resolved(replacement) => replacement,
            Resolution::Unset { name } => {
                log::debug!("Keeping `{}`: environment variable {} is not set", text, name);
                self.stats.unresolved += 1;
                return Outcome::Kept;
            }
        };

        match replacement.build(self.ast, expr.span(), self.source_type) {
            Some(new_expr) => {
                log::trace!("Replacing `{}` with {} {:?}", text, replacement.kind(), replacement);
                self.stats.replaced += 1;
                Outcome::Replaced(new_expr)
            }
            None => {
                log::debug!("Keeping `{}`: replacement {:?} does not parse", text, replacement);
                self.stats.rejected += 1;
                Outcome::Kept
            }
        }
    }
}

impl<'a, E: EnvLookup> VisitMut<'a> for DefineReplacer<'a, '_, E> {
    fn visit_expression(&mut self, expr: &mut Expression<'a>) {
        match self.substitute(expr) {
            Outcome::Replaced(new_expr) => *expr = new_expr,
            Outcome::Kept => {}
            Outcome::NoMatch => walk_mut::walk_expression(self, expr),
        }
    }

    fn visit_object_property(&mut self, it: &mut ObjectProperty<'a>) {
        // `{ __SERVER__ }` must become `{ __SERVER__: true }`
        if it.shorthand {
            match self.substitute(&it.value) {
                Outcome::Replaced(new_expr) => {
                    it.value = new_expr;
                    it.shorthand = false;
                    return;
                }
                Outcome::Kept => return,
                Outcome::NoMatch => {}
            }
        }
        walk_mut::walk_object_property(self, it);
    }
}
