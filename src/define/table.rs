use super::syntax::{normalize_key, ExpressionShape};
use crate::config::{DefineConfig, ReplaceValue};
use std::collections::{HashMap, HashSet};

/// Normalized replacement table, built once per configuration
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    entries: HashMap<String, ReplaceValue>,
    shapes: HashSet<ExpressionShape>,
    dropped: Vec<String>,
}

impl ReplacementTable {
    /// Build the table from `config.replace`.
    ///
    /// Keys that are not expressions can never match and are dropped with a
    /// warning. When two keys normalize to the same text the first one in
    /// key order is kept.
    pub fn new(config: &DefineConfig) -> Self {
        let mut table = Self::default();

        for (key, value) in &config.replace {
            let Some((normalized, shape)) = normalize_key(key) else {
                log::warn!("Ignoring define key `{}`: not an expression", key);
                table.dropped.push(key.clone());
                continue;
            };

            if table.entries.contains_key(&normalized) {
                log::warn!(
                    "Ignoring define key `{}`: duplicates `{}` after normalization",
                    key,
                    normalized
                );
                table.dropped.push(key.clone());
                continue;
            }

            log::debug!("Define `{}` ({:?}) -> {}", normalized, shape, value);
            table.shapes.insert(shape);
            table.entries.insert(normalized, value.clone());
        }

        table
    }

    /// Exact, case-sensitive lookup of printed source text
    pub fn lookup(&self, text: &str) -> Option<&ReplaceValue> {
        self.entries.get(text)
    }

    /// Whether any key has the given root shape
    pub fn may_match(&self, shape: ExpressionShape) -> bool {
        self.shapes.contains(&shape)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by normalized key
    pub fn entries(&self) -> Vec<(&str, &ReplaceValue)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Keys that were rejected while building the table
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }
}

impl From<&DefineConfig> for ReplacementTable {
    fn from(config: &DefineConfig) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_uses_normalized_keys() {
        let config = DefineConfig::new()
            .with("process . env . NODE_ENV", "\"production\"")
            .with("__SERVER__", true);
        let table = ReplacementTable::new(&config);

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup("process.env.NODE_ENV"),
            Some(&ReplaceValue::String("\"production\"".to_string()))
        );
        assert_eq!(table.lookup("__SERVER__"), Some(&ReplaceValue::Bool(true)));
        assert_eq!(table.lookup("__server__"), None);
    }

    #[test]
    fn test_shapes_are_recorded() {
        let config = DefineConfig::new()
            .with("typeof window", "\"undefined\"")
            .with("isNodeEnvironment()", "true");
        let table = ReplacementTable::new(&config);

        assert!(table.may_match(ExpressionShape::Unary));
        assert!(table.may_match(ExpressionShape::Call));
        assert!(!table.may_match(ExpressionShape::Member));
        assert!(!table.may_match(ExpressionShape::Identifier));
    }

    #[test]
    fn test_non_expression_keys_are_dropped() {
        let config = DefineConfig::new()
            .with("if (x) {}", true)
            .with("", true)
            .with("DEBUG", false);
        let table = ReplacementTable::new(&config);

        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped().len(), 2);
    }

    #[test]
    fn test_duplicate_normalized_keys_keep_first() {
        let config = DefineConfig::new()
            .with("a.b", "1")
            .with("a .b", "2");
        let table = ReplacementTable::new(&config);

        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped(), &["a.b".to_string()]);
        assert_eq!(
            table.lookup("a.b"),
            Some(&ReplaceValue::String("2".to_string()))
        );
    }

    #[test]
    fn test_entries_are_sorted() {
        let config = DefineConfig::new().with("b", true).with("a", false);
        let table = ReplacementTable::new(&config);
        let keys: Vec<_> = table.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
