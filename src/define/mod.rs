//! Define replacement
//!
//! Rewrites expressions whose printed source text matches a configured key,
//! so that a later minifier can fold `if (process.env.NODE_ENV === ...)`
//! style conditionals. The pass is a single walk over the program:
//!
//! 1. expressions whose root shape cannot match any key are skipped without
//!    being printed;
//! 2. candidate expressions are printed and looked up in the
//!    [`ReplacementTable`];
//! 3. a match is resolved (possibly through one environment variable),
//!    classified, and built into a fresh node that replaces the original.
//!    Replacement nodes are never visited again.
//!
//! Unresolvable or unparsable replacements leave the original node in place.

pub mod replacement;
pub mod replacer;
pub mod syntax;
pub mod table;

pub use replacement::{Replacement, Resolution};
pub use replacer::DefineReplacer;
pub use syntax::ExpressionShape;
pub use table::ReplacementTable;

use crate::config::DefineConfig;
use crate::env::{EnvLookup, ProcessEnv};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_ast_visit::VisitMut;
use serde::Serialize;
use std::ops::AddAssign;

/// Per-run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DefineStats {
    /// Nodes replaced
    pub replaced: usize,
    /// Matches left alone because their environment variable is unset
    pub unresolved: usize,
    /// Matches left alone because the replacement failed to parse
    pub rejected: usize,
}

impl AddAssign for DefineStats {
    fn add_assign(&mut self, other: Self) {
        self.replaced += other.replaced;
        self.unresolved += other.unresolved;
        self.rejected += other.rejected;
    }
}

/// The define pass: a normalized table plus an environment lookup
#[derive(Debug, Clone)]
pub struct DefinePlugin<E = ProcessEnv> {
    table: ReplacementTable,
    env: E,
}

impl DefinePlugin<ProcessEnv> {
    /// Create a plugin that reads the process environment
    pub fn new(config: &DefineConfig) -> Self {
        Self::with_env(config, ProcessEnv)
    }
}

impl<E: EnvLookup> DefinePlugin<E> {
    pub fn with_env(config: &DefineConfig, env: E) -> Self {
        Self {
            table: ReplacementTable::new(config),
            env,
        }
    }

    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Run the pass over one program, in place.
    ///
    /// Replacement values are parsed with the program's own source type.
    pub fn run<'a>(&self, allocator: &'a Allocator, program: &mut Program<'a>) -> DefineStats {
        if self.table.is_empty() {
            return DefineStats::default();
        }

        let mut replacer = DefineReplacer::new(allocator, &self.table, &self.env, program.source_type);
        replacer.visit_program(program);
        let stats = replacer.stats();
        log::debug!(
            "Define pass: {} replaced, {} unresolved, {} rejected",
            stats.replaced,
            stats.unresolved,
            stats.rejected
        );
        stats
    }
}
