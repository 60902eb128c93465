// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Flag and target types: the immutable result of an evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rollout::Rollout;
use crate::value::{FlagKind, FlagValue};

/// A versioned value assignment inside a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetValue {
	pub version: String,
	pub value: FlagValue,
}

/// A resolved value assignment with an optional validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
	pub version: String,
	#[serde(default)]
	pub expired_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub published_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub scheduled_at: Option<DateTime<Utc>>,
	pub value: TargetValue,
}

impl Target {
	/// Creates a target carrying the given value, with no validity window.
	pub fn new(version: impl Into<String>, value: impl Into<FlagValue>) -> Self {
		Self {
			version: version.into(),
			expired_at: None,
			published_at: None,
			scheduled_at: None,
			value: TargetValue {
				version: "v1".to_string(),
				value: value.into(),
			},
		}
	}

	/// The typed value this target assigns.
	pub fn value(&self) -> &FlagValue {
		&self.value.value
	}
}

/// A named, typed flag with a resolved target, opaque rules, and an
/// optional percentage rollout.
///
/// Flags are immutable evaluation results; they are produced by the flag
/// manager, never constructed piecemeal by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
	pub version: String,
	#[serde(rename = "type")]
	pub kind: FlagKind,
	pub key: String,
	pub name: String,
	pub target: Target,
	/// Conditional overrides. Rule evaluation lives in the manager; the
	/// shape is carried through opaquely.
	#[serde(default)]
	pub rules: Vec<serde_json::Value>,
	/// Present only when the flag is subject to a percentage rollout.
	/// Absence is distinguishable from an inactive rollout.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rollout: Option<Rollout>,
}

impl Flag {
	/// Creates a flag with the given target and no rules or rollout.
	pub fn new(
		version: impl Into<String>,
		kind: FlagKind,
		key: impl Into<String>,
		name: impl Into<String>,
		target: Target,
	) -> Self {
		Self {
			version: version.into(),
			kind,
			key: key.into(),
			name: name.into(),
			target,
			rules: Vec::new(),
			rollout: None,
		}
	}

	/// Attaches rollout metadata.
	pub fn with_rollout(mut self, rollout: Rollout) -> Self {
		self.rollout = Some(rollout);
		self
	}

	/// The resolved target value.
	pub fn value(&self) -> &FlagValue {
		self.target.value()
	}

	/// The value coerced to a boolean. Total over well-formed targets.
	pub fn as_bool(&self) -> bool {
		self.value().as_bool()
	}

	/// The value coerced to a string.
	pub fn as_string(&self) -> String {
		self.value().as_string()
	}

	/// The value coerced to a number.
	pub fn as_number(&self) -> f64 {
		self.value().as_number()
	}

	/// Shorthand for boolean flags: `as_bool`.
	pub fn is_enabled(&self) -> bool {
		self.as_bool()
	}

	/// Whether an active rollout is attached. A missing rollout behaves
	/// exactly like an inactive one here.
	pub fn has_active_rollout(&self) -> bool {
		self.rollout.as_ref().is_some_and(Rollout::is_active)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rollout::RolloutStatus;

	fn rollout_flag_json() -> serde_json::Value {
		serde_json::json!({
			"version": "fla_1",
			"type": "boolean",
			"key": "rollout-flag",
			"name": "Rollout Flag",
			"target": {
				"version": "tar_1",
				"expired_at": null,
				"published_at": "2026-02-20T00:00:00+00:00",
				"scheduled_at": null,
				"value": {"version": "v1", "value": {"boolean": false}},
			},
			"rules": [],
			"rollout": {
				"target": {
					"version": "tar_ro",
					"expired_at": null,
					"published_at": "2026-02-24T00:00:00+00:00",
					"scheduled_at": null,
					"value": {"version": "v1", "value": {"boolean": true}},
				},
				"rules": [],
				"percentage": 50,
				"salt": "test-salt",
				"status": "active",
			},
		})
	}

	#[test]
	fn parses_rollout_metadata() {
		let flag: Flag = serde_json::from_value(rollout_flag_json()).unwrap();

		let rollout = flag.rollout.as_ref().unwrap();
		assert_eq!(rollout.percentage, 50);
		assert_eq!(rollout.salt, "test-salt");
		assert_eq!(rollout.status, RolloutStatus::Active);
		assert!(flag.has_active_rollout());
		assert!(!flag.as_bool());
		assert!(rollout.target.value().as_bool());
	}

	#[test]
	fn parses_flag_without_rollout() {
		let flag: Flag = serde_json::from_value(serde_json::json!({
			"version": "fla_1",
			"type": "boolean",
			"key": "no-rollout",
			"name": "No Rollout",
			"target": {
				"version": "tar_1",
				"expired_at": null,
				"published_at": null,
				"scheduled_at": null,
				"value": {"version": "v1", "value": {"boolean": true}},
			},
			"rules": [],
		}))
		.unwrap();

		assert!(flag.rollout.is_none());
		assert!(!flag.has_active_rollout());
		assert!(flag.as_bool());
	}

	#[test]
	fn rollout_roundtrip_preserves_fields() {
		let flag: Flag = serde_json::from_value(rollout_flag_json()).unwrap();
		let json = serde_json::to_value(&flag).unwrap();

		assert_eq!(json["rollout"]["percentage"], 50);
		assert_eq!(json["rollout"]["salt"], "test-salt");
		assert_eq!(json["rollout"]["status"], "active");

		let reparsed: Flag = serde_json::from_value(json).unwrap();
		assert_eq!(reparsed, flag);
	}

	#[test]
	fn rollout_key_absent_when_none() {
		let flag = Flag::new(
			"fla_2",
			FlagKind::String,
			"theme",
			"Theme",
			Target::new("tar_1", "dark"),
		);
		let json = serde_json::to_value(&flag).unwrap();
		assert!(json.get("rollout").is_none());
	}

	#[test]
	fn coercion_accessors_follow_kind() {
		let flag = Flag::new(
			"fla_3",
			FlagKind::Number,
			"page-size",
			"Page Size",
			Target::new("tar_1", 25i64),
		);
		assert_eq!(flag.as_number(), 25.0);
		assert_eq!(flag.as_string(), "25");
		assert!(flag.as_bool());
	}
}
