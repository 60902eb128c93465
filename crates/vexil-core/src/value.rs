// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed flag values and the coercion rules between them.

use serde::{Deserialize, Serialize};

/// The declared type of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
	Boolean,
	String,
	Number,
}

/// A typed flag value.
///
/// Serializes in the externally tagged wire shape used by the flag API,
/// e.g. `{"boolean": true}`, `{"string": "dark"}`, `{"number": 1.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagValue {
	Boolean(bool),
	String(String),
	Number(f64),
}

impl FlagValue {
	/// The kind this value naturally belongs to.
	pub fn kind(&self) -> FlagKind {
		match self {
			FlagValue::Boolean(_) => FlagKind::Boolean,
			FlagValue::String(_) => FlagKind::String,
			FlagValue::Number(_) => FlagKind::Number,
		}
	}

	/// Coerces the value to a boolean.
	///
	/// Strings coerce truthy for `"true"` and `"1"`; numbers are truthy
	/// when non-zero. Total over all well-formed values.
	pub fn as_bool(&self) -> bool {
		match self {
			FlagValue::Boolean(b) => *b,
			FlagValue::String(s) => s == "true" || s == "1",
			FlagValue::Number(n) => *n != 0.0,
		}
	}

	/// Coerces the value to a string.
	pub fn as_string(&self) -> String {
		match self {
			FlagValue::Boolean(b) => b.to_string(),
			FlagValue::String(s) => s.clone(),
			FlagValue::Number(n) => n.to_string(),
		}
	}

	/// Coerces the value to a number.
	///
	/// Booleans become `0.0`/`1.0`; unparseable strings become `0.0`.
	pub fn as_number(&self) -> f64 {
		match self {
			FlagValue::Boolean(b) => {
				if *b {
					1.0
				} else {
					0.0
				}
			}
			FlagValue::String(s) => s.parse().unwrap_or(0.0),
			FlagValue::Number(n) => *n,
		}
	}
}

impl From<bool> for FlagValue {
	fn from(value: bool) -> Self {
		FlagValue::Boolean(value)
	}
}

impl From<&str> for FlagValue {
	fn from(value: &str) -> Self {
		FlagValue::String(value.to_string())
	}
}

impl From<String> for FlagValue {
	fn from(value: String) -> Self {
		FlagValue::String(value)
	}
}

impl From<f64> for FlagValue {
	fn from(value: f64) -> Self {
		FlagValue::Number(value)
	}
}

impl From<i64> for FlagValue {
	fn from(value: i64) -> Self {
		FlagValue::Number(value as f64)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_externally_tagged() {
		let json = serde_json::to_string(&FlagValue::Boolean(true)).unwrap();
		assert_eq!(json, r#"{"boolean":true}"#);

		let json = serde_json::to_string(&FlagValue::String("dark".to_string())).unwrap();
		assert_eq!(json, r#"{"string":"dark"}"#);

		let json = serde_json::to_string(&FlagValue::Number(1.5)).unwrap();
		assert_eq!(json, r#"{"number":1.5}"#);
	}

	#[test]
	fn deserializes_externally_tagged() {
		let value: FlagValue = serde_json::from_str(r#"{"boolean":false}"#).unwrap();
		assert_eq!(value, FlagValue::Boolean(false));

		let value: FlagValue = serde_json::from_str(r#"{"number":42.0}"#).unwrap();
		assert_eq!(value, FlagValue::Number(42.0));
	}

	#[test]
	fn bool_coercions() {
		assert!(FlagValue::Boolean(true).as_bool());
		assert!(!FlagValue::Boolean(false).as_bool());
		assert!(FlagValue::String("true".to_string()).as_bool());
		assert!(FlagValue::String("1".to_string()).as_bool());
		assert!(!FlagValue::String("no".to_string()).as_bool());
		assert!(FlagValue::Number(2.0).as_bool());
		assert!(!FlagValue::Number(0.0).as_bool());
	}

	#[test]
	fn string_coercions() {
		assert_eq!(FlagValue::Boolean(true).as_string(), "true");
		assert_eq!(FlagValue::Number(2.5).as_string(), "2.5");
		assert_eq!(FlagValue::String("dark".to_string()).as_string(), "dark");
	}

	#[test]
	fn number_coercions() {
		assert_eq!(FlagValue::Boolean(true).as_number(), 1.0);
		assert_eq!(FlagValue::Boolean(false).as_number(), 0.0);
		assert_eq!(FlagValue::String("3.5".to_string()).as_number(), 3.5);
		assert_eq!(FlagValue::String("not a number".to_string()).as_number(), 0.0);
		assert_eq!(FlagValue::Number(7.0).as_number(), 7.0);
	}

	#[test]
	fn kind_matches_variant() {
		assert_eq!(FlagValue::Boolean(true).kind(), FlagKind::Boolean);
		assert_eq!(FlagValue::from("x").kind(), FlagKind::String);
		assert_eq!(FlagValue::from(1.0).kind(), FlagKind::Number);
	}
}
