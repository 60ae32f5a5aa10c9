//! Replacement configuration
//!
//! The only recognized option is `replace`: a map from source-text pattern to
//! a string, boolean or number. It can be loaded from a JSON file or built
//! from `KEY=VALUE` pairs given on the command line.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A configured replacement value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplaceValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for ReplaceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplaceValue::Bool(b) => write!(f, "{}", b),
            ReplaceValue::Number(n) => write!(f, "{}", n),
            ReplaceValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for ReplaceValue {
    fn from(value: bool) -> Self {
        ReplaceValue::Bool(value)
    }
}

impl From<f64> for ReplaceValue {
    fn from(value: f64) -> Self {
        ReplaceValue::Number(value)
    }
}

impl From<&str> for ReplaceValue {
    fn from(value: &str) -> Self {
        ReplaceValue::String(value.to_string())
    }
}

impl From<String> for ReplaceValue {
    fn from(value: String) -> Self {
        ReplaceValue::String(value)
    }
}

/// Setup-time configuration for the define pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefineConfig {
    #[serde(default)]
    pub replace: BTreeMap<String, ReplaceValue>,
}

impl DefineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a single replacement
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ReplaceValue>) -> Self {
        self.replace.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ReplaceValue>) {
        self.replace.insert(key.into(), value.into());
    }

    /// Parse a JSON configuration: `{ "replace": { "__SERVER__": true } }`
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text).map_err(|e| match e {
            Error::Config { message } => {
                Error::config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    /// Apply `KEY=VALUE` definitions on top of this configuration.
    ///
    /// Later definitions win over earlier ones and over file entries.
    pub fn apply_defines<I, S>(&mut self, defines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for define in defines {
            let (key, value) = parse_define(define.as_ref())?;
            self.replace.insert(key, value);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.replace.is_empty()
    }
}

/// Split a command-line definition at its first `=`.
///
/// The value is always taken as a string; `true`/`false` and numeric text are
/// classified when the replacement is built, so `-D __SERVER__=true` behaves
/// like the JSON boolean.
pub fn parse_define(arg: &str) -> Result<(String, ReplaceValue)> {
    let (key, value) = arg.split_once('=').ok_or_else(|| Error::InvalidDefine {
        arg: arg.to_string(),
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidDefine {
            arg: arg.to_string(),
        });
    }
    Ok((key.to_string(), ReplaceValue::String(value.to_string())))
}
