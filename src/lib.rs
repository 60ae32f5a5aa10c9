//! define-rs: compile-time define replacement for JavaScript/TypeScript
//!
//! This library rewrites expressions such as `process.env.NODE_ENV`,
//! `typeof window` or `isNodeEnvironment()` into configured constants before
//! the rest of a build runs, so that a minifier can drop unreachable branches.

pub mod cli;
pub mod config;
pub mod define;
pub mod env;
pub mod error;
pub mod transformer;

pub use config::{DefineConfig, ReplaceValue};
pub use define::{DefinePlugin, DefineReplacer, DefineStats, ReplacementTable};
pub use env::{EnvLookup, MapEnv, ProcessEnv};
pub use error::{Error as DefineError, Result as DefineResult};
pub use transformer::{DefineTransformer, TransformOptions, TransformOutput};
