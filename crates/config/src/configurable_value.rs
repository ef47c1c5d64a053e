//! Configurable value types that can load from environment variables or plain values

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use solar_roi_types::SecretString;
use std::fmt;

/// A configurable value that can be loaded from environment variables or used as plain text
///
/// Accepted forms in configuration sources:
/// - `{"type": "env", "value": "OPENAI_API_KEY"}`
/// - `{"type": "plain", "value": "..."}`
/// - `"env:OPENAI_API_KEY"` or a bare string (plain)
///
/// Serializing writes plain values as `[REDACTED]`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(from = "ConfigurableValueRepr")]
pub struct ConfigurableValue {
	/// Type of value: "env" for environment variable, "plain" for direct value
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// The value: either environment variable name or the actual value
	pub value: String,
}

/// Type of configurable value
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	/// Load value from environment variable (name specified in `value` field)
	Env,
	/// Use the value directly from the `value` field
	Plain,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigurableValueRepr {
	Tagged {
		#[serde(rename = "type")]
		value_type: ValueType,
		value: String,
	},
	Shorthand(String),
}

impl From<ConfigurableValueRepr> for ConfigurableValue {
	fn from(repr: ConfigurableValueRepr) -> Self {
		match repr {
			ConfigurableValueRepr::Tagged { value_type, value } => Self { value_type, value },
			ConfigurableValueRepr::Shorthand(value) => ConfigurableValue::from(value),
		}
	}
}

impl Serialize for ConfigurableValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("ConfigurableValue", 2)?;
		state.serialize_field("type", &self.value_type)?;
		match self.value_type {
			ValueType::Env => state.serialize_field("value", &self.value)?,
			ValueType::Plain => state.serialize_field("value", REDACTED)?,
		}
		state.end()
	}
}

const REDACTED: &str = "[REDACTED]";

impl ConfigurableValue {
	/// Create a new environment variable reference
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	/// Create a new plain value
	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve the actual value based on the type
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve into a `SecretString`, rejecting blank values
	pub fn resolve_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		let secret = SecretString::new(self.resolve()?);
		if secret.is_empty() {
			return Err(ConfigurableValueError::EmptyValue(self.description()));
		}
		Ok(secret)
	}

	/// Plain values end up in config files and process listings
	pub fn is_plain(&self) -> bool {
		matches!(self.value_type, ValueType::Plain)
	}

	/// Get a description of this configurable value for logging
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}
}

/// Errors that can occur when resolving configurable values
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),

	#[error("Empty value from {0}")]
	EmptyValue(String),
}

// Never print plain values
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		if let Some(env_var) = value.strip_prefix("env:") {
			Self::from_env(env_var)
		} else {
			Self::from_plain(value)
		}
	}
}

impl From<String> for ConfigurableValue {
	fn from(value: String) -> Self {
		ConfigurableValue::from(value.as_str())
	}
}
