use super::utils;
use crate::define::DefineStats;
use crate::error::{Error, Result};
use crate::transformer::{DefineTransformer, TransformOptions};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Arguments for the transform command
#[derive(Debug, Clone, Default)]
pub struct TransformArgs {
    pub inputs: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub defines: Vec<String>,
    pub output: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub minify: bool,
    pub stats: bool,
}

impl TransformArgs {
    fn destination(&self, input: &Path) -> Result<Option<PathBuf>> {
        if let Some(dir) = &self.out_dir {
            let name = input
                .file_name()
                .ok_or_else(|| Error::internal(format!("No file name in {}", input.display())))?;
            return Ok(Some(dir.join(name)));
        }
        Ok(self.output.clone())
    }
}

/// Run the transform subcommand
pub fn transform(args: &TransformArgs) -> Result<DefineStats> {
    if args.inputs.is_empty() {
        return Err(Error::config("no input files given"));
    }
    if args.output.is_some() && args.inputs.len() > 1 {
        return Err(Error::config(
            "--output takes a single input; use --out-dir for several files",
        ));
    }

    let config = utils::load_config(args.config.as_deref(), &args.defines)?;
    let transformer = DefineTransformer::new(&config);
    let options = TransformOptions {
        minify: args.minify,
    };

    // Files are independent; each gets its own allocator inside transform_file
    let results: Vec<_> = args
        .inputs
        .par_iter()
        .map(|input| transformer.transform_file(input, options))
        .collect();

    let mut total = DefineStats::default();
    for (input, result) in args.inputs.iter().zip(results) {
        let output = result?;
        utils::write_output(&output.code, args.destination(input)?.as_deref())?;

        if args.stats {
            eprintln!(
                "{}: {} replaced, {} unresolved, {} rejected",
                input.display(),
                output.stats.replaced,
                output.stats.unresolved,
                output.stats.rejected
            );
        }
        total += output.stats;
    }

    if args.stats && args.inputs.len() > 1 {
        eprintln!(
            "total: {} replaced, {} unresolved, {} rejected",
            total.replaced, total.unresolved, total.rejected
        );
    }

    Ok(total)
}
