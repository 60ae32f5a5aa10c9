//! Source-to-source driver
//!
//! Parses a file with `oxc_parser`, runs the define pass over the program and
//! prints the result with `oxc_codegen`.

use crate::config::DefineConfig;
use crate::define::{DefinePlugin, DefineStats};
use crate::env::{EnvLookup, ProcessEnv};
use crate::error::{Error, Result};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

/// Printer options
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    pub minify: bool,
}

/// Printed code plus the pass counters
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub code: String,
    pub stats: DefineStats,
}

/// Transforms whole source files
pub struct DefineTransformer<E = ProcessEnv> {
    plugin: DefinePlugin<E>,
}

impl DefineTransformer<ProcessEnv> {
    pub fn new(config: &DefineConfig) -> Self {
        Self {
            plugin: DefinePlugin::new(config),
        }
    }
}

impl<E: EnvLookup> DefineTransformer<E> {
    pub fn with_env(config: &DefineConfig, env: E) -> Self {
        Self {
            plugin: DefinePlugin::with_env(config, env),
        }
    }

    pub fn plugin(&self) -> &DefinePlugin<E> {
        &self.plugin
    }

    /// Transform source text; `name` is only used in error messages
    pub fn transform_source(
        &self,
        name: &str,
        source: &str,
        source_type: SourceType,
        options: TransformOptions,
    ) -> Result<TransformOutput> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, source_type).parse();

        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Parse {
                path: name.to_string(),
                message,
            });
        }

        let mut program = ret.program;
        let stats = self.plugin.run(&allocator, &mut program);

        let code = Codegen::new()
            .with_options(CodegenOptions {
                minify: options.minify,
                ..Default::default()
            })
            .build(&program)
            .code;

        Ok(TransformOutput { code, stats })
    }

    /// Read and transform a file, picking the source type from its extension
    pub fn transform_file(&self, path: &Path, options: TransformOptions) -> Result<TransformOutput> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
        let output = self.transform_source(
            &path.display().to_string(),
            &source,
            source_type_for(path),
            options,
        )?;
        log::debug!(
            "{}: {} replacement(s)",
            path.display(),
            output.stats.replaced
        );
        Ok(output)
    }
}

/// Source type from a file extension, defaulting to an ES module
pub fn source_type_for(path: &Path) -> SourceType {
    SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs())
}
