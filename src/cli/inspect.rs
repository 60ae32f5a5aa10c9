use super::utils;
use crate::config::ReplaceValue;
use crate::define::{Replacement, ReplacementTable, Resolution};
use crate::env::{EnvLookup, ProcessEnv};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Debug, Clone, Default)]
pub struct InspectArgs {
    pub config: Option<PathBuf>,
    pub defines: Vec<String>,
    pub format: String,
}

/// How one table entry resolves in the current environment
#[derive(Debug, Clone, Serialize)]
pub struct InspectEntry {
    pub key: String,
    pub value: ReplaceValue,
    /// `boolean`, `number`, `string`, `expression` or `unresolved`
    pub kind: String,
    pub resolved: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub entries: Vec<InspectEntry>,
    pub dropped: Vec<String>,
}

/// Resolve every entry of `table` against `env`
pub fn build_report(table: &ReplacementTable, env: &impl EnvLookup) -> InspectReport {
    let entries = table
        .entries()
        .into_iter()
        .map(|(key, value)| {
            let (kind, resolved) = match Replacement::resolve(value, env) {
                Resolution::Resolved(replacement) => {
                    let text = match &replacement {
                        Replacement::Boolean(b) => b.to_string(),
                        Replacement::Number(n) => n.to_string(),
                        Replacement::String(s) => format!("{:?}", s),
                        Replacement::Expression(e) => e.clone(),
                    };
                    (replacement.kind().to_string(), Some(text))
                }
                Resolution::Unset { .. } => ("unresolved".to_string(), None),
            };
            InspectEntry {
                key: key.to_string(),
                value: value.clone(),
                kind,
                resolved,
            }
        })
        .collect();

    InspectReport {
        entries,
        dropped: table.dropped().to_vec(),
    }
}

/// Render the report as aligned text
pub fn format_text(report: &InspectReport) -> String {
    let width = report
        .entries
        .iter()
        .map(|e| e.key.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in &report.entries {
        let resolved = entry.resolved.as_deref().unwrap_or("(environment variable not set)");
        let _ = writeln!(
            out,
            "{:<width$}  {:<10}  {}",
            entry.key,
            entry.kind,
            resolved,
            width = width
        );
    }
    for key in &report.dropped {
        let _ = writeln!(out, "ignored key: {}", key);
    }
    out
}

/// Run the inspect subcommand
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let config = utils::load_config(args.config.as_deref(), &args.defines)?;
    let table = ReplacementTable::new(&config);
    let report = build_report(&table, &ProcessEnv);

    let rendered = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(&report)
            .map_err(|e| Error::internal(e.to_string()))?
            + "\n",
        "text" => format_text(&report),
        other => {
            return Err(Error::config(format!(
                "unknown format `{}` (expected text or json)",
                other
            )))
        }
    };

    utils::write_output(&rendered, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefineConfig;
    use crate::env::MapEnv;

    #[test]
    fn test_report_resolves_entries() {
        let config = DefineConfig::new()
            .with("__SERVER__", true)
            .with("process.env.NODE_ENV", "process.env.APP_ENV")
            .with("isNodeEnvironment()", "process.env.NOT_EXIST")
            .with("if (x) {}", true);
        let table = ReplacementTable::new(&config);
        let env = MapEnv::new().with("APP_ENV", "'staging'");

        let report = build_report(&table, &env);
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.dropped, vec!["if (x) {}".to_string()]);

        let by_key = |key: &str| {
            report
                .entries
                .iter()
                .find(|e| e.key == key)
                .expect("entry present")
        };
        assert_eq!(by_key("__SERVER__").kind, "boolean");
        assert_eq!(by_key("process.env.NODE_ENV").kind, "string");
        assert_eq!(
            by_key("process.env.NODE_ENV").resolved.as_deref(),
            Some("\"staging\"")
        );
        assert_eq!(by_key("isNodeEnvironment()").kind, "unresolved");
        assert_eq!(by_key("isNodeEnvironment()").resolved, None);
    }

    #[test]
    fn test_text_format_lists_dropped_keys() {
        let config = DefineConfig::new().with("DEBUG", false).with("a b", true);
        let table = ReplacementTable::new(&config);
        let text = format_text(&build_report(&table, &MapEnv::new()));
        assert!(text.contains("DEBUG"));
        assert!(text.contains("boolean"));
        assert!(text.contains("ignored key: a b"));
    }
}
