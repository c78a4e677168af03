//! Query configuration.
//!
//! Everything here has a sensible `Default`; embedding applications that keep
//! their settings in a file can deserialize a [`QueryConfig`] with serde.

use serde::Deserialize;
use std::collections::BTreeSet;

/// Settings that shape statement text
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// When set, only method calls with these qualified names are rendered
    pub allowed_methods: Option<BTreeSet<String>>,
}

impl TranslatorConfig {
    /// Restrict method calls to the given qualified names
    pub fn allow_methods<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_methods: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_method_allowed(&self, qualified_name: &str) -> bool {
        self.allowed_methods
            .as_ref()
            .map_or(true, |allowed| allowed.contains(qualified_name))
    }
}

/// What to do with a row whose values cannot be coerced into the record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Fail the enumeration and release the cursor
    #[default]
    Fail,
    /// Log the row and move on to the next one
    SkipRow,
}

/// Top-level configuration attached to an entity set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub translator: TranslatorConfig,
    pub mismatch_policy: MismatchPolicy,
}

impl QueryConfig {
    pub fn with_translator(mut self, translator: TranslatorConfig) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }
}

/// Install `env_logger` with `default_filter` unless `RUST_LOG` says otherwise.
///
/// Returns false if a logger was already installed.
pub fn init_logger(default_filter: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init()
        .is_ok()
}
