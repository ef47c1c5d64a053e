//! Provider credentials that never show up in logs
//!
//! API keys and search engine identifiers are held in a `SecretString`, which
//! wipes its buffer on drop and redacts itself in every formatting path.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

const REDACTED: &str = "[REDACTED]";

/// Credential string, zeroized when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Borrow the raw value, e.g. to place it in a query string or header
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretString").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_string())
	}
}

impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString::new)
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		let (a, b) = (self.inner.as_bytes(), other.inner.as_bytes());
		if a.len() != b.len() {
			return false;
		}
		a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
	}
}

impl Eq for SecretString {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_api_key_is_redacted_in_debug_and_display() {
		let key = SecretString::from("AIzaSy-maps-key");
		assert_eq!(key.expose_secret(), "AIzaSy-maps-key");
		assert!(!format!("{:?}", key).contains("AIzaSy"));
		assert_eq!(key.to_string(), "[REDACTED]");
	}

	#[test]
	fn test_api_key_is_redacted_when_serialized() {
		let key = SecretString::from("sk-openai");
		assert_eq!(serde_json::to_string(&key).unwrap(), "\"[REDACTED]\"");

		let parsed: SecretString = serde_json::from_str("\"cx-engine\"").unwrap();
		assert_eq!(parsed.expose_secret(), "cx-engine");
	}

	#[test]
	fn test_blank_secret_is_empty() {
		assert!(SecretString::from("  ").is_empty());
		assert!(!SecretString::from("cx").is_empty());
	}

	#[test]
	fn test_equality() {
		assert_eq!(SecretString::from("same"), SecretString::from("same"));
		assert_ne!(SecretString::from("same"), SecretString::from("other"));
		assert_ne!(SecretString::from("same"), SecretString::from("sam"));
	}
}
