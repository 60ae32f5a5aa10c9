//! Environment variable lookup
//!
//! Replacement values of the form `process.env.NAME` are resolved through an
//! [`EnvLookup`] at transform time. The lookup is injected into the
//! transform rather than read ambiently, so tests can supply a fixed map
//! instead of mutating the real process environment.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Namespace prefix that marks a replacement value as an environment reference
pub const ENV_NAMESPACE: &str = "process.env.";

static ENV_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^process\.env\.([A-Za-z_$][A-Za-z0-9_$]*)$").expect("valid env reference regex")
});

/// Source of environment variable values
pub trait EnvLookup {
    /// Returns the value of `name`, or `None` when it is unset
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed set of variables, independent of the process environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Extracts the variable name from a `process.env.NAME` reference.
///
/// Returns `None` for anything else, including computed access such as
/// `process.env["NAME"]` and longer member chains.
pub fn env_reference(value: &str) -> Option<&str> {
    ENV_REFERENCE
        .captures(value.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
