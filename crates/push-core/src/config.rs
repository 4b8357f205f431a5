//! Configuration types for the interpreter and instruction set.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Caller-imposed bounds on the values a run may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of copies a single duplication may add
    pub growth_cap: usize,
    /// Maximum length of a string, vector, or code value (in points)
    pub collection_size_cap: usize,
    /// Maximum magnitude of an integer, in bits
    pub max_integer_bits: u64,
    /// Maximum length of the output buffer, in bytes
    pub output_cap: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            growth_cap: 500,
            collection_size_cap: 1000,
            max_integer_bits: 1024,
            output_cap: 10_000,
        }
    }
}

/// Interpreter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Maximum number of exec items processed per run
    pub step_limit: usize,
    /// Value-size limits applied to every state the interpreter runs
    pub limits: Limits,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            step_limit: 500,
            limits: Limits::default(),
        }
    }
}

impl InterpreterConfig {
    /// Parse a configuration from JSON; omitted fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Instruction set synthesis parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionSetConfig {
    /// Input names; each gets an `input_<name>` instruction
    pub inputs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = InterpreterConfig::default();
        assert_eq!(config.step_limit, 500);
        assert_eq!(config.limits.growth_cap, 500);
        assert_eq!(config.limits.collection_size_cap, 1000);

        let set_config = InstructionSetConfig::default();
        assert!(set_config.inputs.is_empty());
    }

    #[test]
    fn test_partial_json() {
        let config = InterpreterConfig::from_json(r#"{"step_limit": 2000}"#).unwrap();
        assert_eq!(config.step_limit, 2000);
        assert_eq!(config.limits, Limits::default());

        let config =
            InterpreterConfig::from_json(r#"{"limits": {"max_integer_bits": 64}}"#).unwrap();
        assert_eq!(config.step_limit, 500);
        assert_eq!(config.limits.max_integer_bits, 64);
        assert_eq!(config.limits.output_cap, 10_000);
    }

    #[test]
    fn test_invalid_json() {
        let err = InterpreterConfig::from_json("{step_limit:").unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }
}
