//! # Configuration
//!
//! Which private collection the chaincode writes to, and where history logs
//! live inside it.

use std::env;

/// Default private data collection.
pub const DEFAULT_COLLECTION: &str = "attorney_pdc";

/// Default history log key suffix.
pub const DEFAULT_HISTORY_KEY_SUFFIX: &str = "_HIST";

/// Configuration for private state redirection.
///
/// Passed explicitly to the wiring helpers; nothing reads it globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateStateConfig {
    /// Private data collection all state operations are redirected to.
    pub collection: String,

    /// Prepended to a key to form its history log key (default: empty).
    pub history_key_prefix: String,

    /// Appended to a key to form its history log key (default: `_HIST`).
    pub history_key_suffix: String,
}

impl Default for PrivateStateConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            history_key_prefix: String::new(),
            history_key_suffix: DEFAULT_HISTORY_KEY_SUFFIX.to_string(),
        }
    }
}

impl PrivateStateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AC_PDC_COLLECTION`: Collection name (default: attorney_pdc)
    /// - `AC_HISTORY_KEY_PREFIX`: History key prefix (default: empty)
    /// - `AC_HISTORY_KEY_SUFFIX`: History key suffix (default: _HIST)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            collection: env::var("AC_PDC_COLLECTION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.collection),

            history_key_prefix: env::var("AC_HISTORY_KEY_PREFIX")
                .unwrap_or(defaults.history_key_prefix),

            history_key_suffix: env::var("AC_HISTORY_KEY_SUFFIX")
                .unwrap_or(defaults.history_key_suffix),
        }
    }

    /// Set the private collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the history key prefix.
    pub fn with_history_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.history_key_prefix = prefix.into();
        self
    }

    /// Set the history key suffix.
    pub fn with_history_key_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.history_key_suffix = suffix.into();
        self
    }

    pub fn history_keys(&self) -> HistoryKeyScheme {
        HistoryKeyScheme::new(&self.history_key_prefix, &self.history_key_suffix)
    }

    /// History log key for `key`.
    pub fn history_key(&self, key: &str) -> String {
        self.history_keys().derive(key)
    }
}

/// Derivation of history log keys: `prefix + key + suffix`.
///
/// Every key that starts with the prefix and ends with the suffix belongs to
/// the log namespace, whether or not a log exists under it. With both empty
/// the namespaces coincide and every key is a log key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryKeyScheme {
    prefix: String,
    suffix: String,
}

impl Default for HistoryKeyScheme {
    fn default() -> Self {
        Self::new("", DEFAULT_HISTORY_KEY_SUFFIX)
    }
}

impl HistoryKeyScheme {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn derive(&self, key: &str) -> String {
        let mut derived = String::with_capacity(self.prefix.len() + key.len() + self.suffix.len());
        derived.push_str(&self.prefix);
        derived.push_str(key);
        derived.push_str(&self.suffix);
        derived
    }

    /// Whether `key` could name a history log under this scheme.
    pub fn is_history_key(&self, key: &str) -> bool {
        key.len() >= self.prefix.len() + self.suffix.len()
            && key.starts_with(self.prefix.as_str())
            && key.ends_with(self.suffix.as_str())
    }

    /// Prefix and suffix are both empty, so log keys alias primary keys.
    pub fn is_degenerate(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}
