use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::utils::validation::{parse_delimiter, DEFAULT_DELIMITER};

/// Seed recorded with every run for reproducibility
pub const RANDOM_SEED: u64 = 4711;

pub const DELIMITER_KEY: &str = "delimiter";
pub const RANDOM_SEED_KEY: &str = "random_seed";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read parameters: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse parameters: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Parameters file must contain a JSON object")]
    NotAnObject,

    #[error("Parameter 'delimiter' must be a single character, got {0}")]
    InvalidDelimiter(String),
}

/// Parameters of one run, ordered by name
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    values: BTreeMap<String, Value>,
}

impl Default for Parameters {
    fn default() -> Self {
        let mut values = BTreeMap::new();
        values.insert(
            DELIMITER_KEY.to_string(),
            Value::String(DEFAULT_DELIMITER.to_string()),
        );
        Self { values }
    }
}

impl Parameters {
    /// Load parameters, layering a JSON object file over the defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read,
    /// `ConfigError::Parse` for invalid JSON, or `ConfigError::NotAnObject`
    /// if the top-level value is not an object.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse parameters from a JSON object string, layered over the defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for invalid JSON or
    /// `ConfigError::NotAnObject` if the value is not an object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => Ok(Self::default().merged(map)),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    fn merged(mut self, overrides: Map<String, Value>) -> Self {
        for (key, value) in overrides {
            debug!("Parameter {key} = {value}");
            self.values.insert(key, value);
        }
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Record the reproducibility seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set(RANDOM_SEED_KEY, seed);
        self
    }

    /// The field separator used when parsing the gene matrix
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDelimiter` unless the parameter is a
    /// one-character string.
    pub fn delimiter(&self) -> Result<char, ConfigError> {
        match self.values.get(DELIMITER_KEY) {
            None => Ok(DEFAULT_DELIMITER),
            Some(Value::String(s)) => {
                parse_delimiter(s).ok_or_else(|| ConfigError::InvalidDelimiter(format!("{s:?}")))
            }
            Some(other) => Err(ConfigError::InvalidDelimiter(other.to_string())),
        }
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.values.get(RANDOM_SEED_KEY).and_then(Value::as_u64)
    }

    /// All parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
