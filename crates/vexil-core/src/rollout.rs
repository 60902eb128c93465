// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Percentage rollouts and deterministic bucket assignment.
//!
//! Bucket assignment must agree bit-for-bit across every SDK that talks to
//! the same flag service, so the algorithm is fixed: CRC-32 (IEEE) of
//! `"{salt}:{identifier}"`, reduced modulo 100, in the bucket iff the
//! result is below the rollout percentage. Subjects without an identifier
//! are never in any bucket.

use serde::{Deserialize, Serialize};

use crate::flag::Target;

/// Whether a rollout is currently applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolloutStatus {
	Active,
	Inactive,
}

/// Percentage-based override of a flag's target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rollout {
	/// The target applied to subjects inside the bucket.
	pub target: Target,
	/// Conditional overrides scoped to the rollout; carried opaquely.
	#[serde(default)]
	pub rules: Vec<serde_json::Value>,
	/// Share of the population inside the bucket, 0–100.
	pub percentage: u8,
	/// Salt mixed into the bucket hash so distinct flags bucket independently.
	pub salt: String,
	pub status: RolloutStatus,
}

impl Rollout {
	pub fn is_active(&self) -> bool {
		self.status == RolloutStatus::Active
	}

	/// Whether this rollout's target applies to the given subject.
	///
	/// Inactive rollouts and anonymous subjects never match.
	pub fn applies_to(&self, identifier: Option<&str>) -> bool {
		self.is_active() && is_in_bucket(&self.salt, identifier, self.percentage)
	}
}

/// Deterministic bucket number in `[0, 99]` for a salt and identifier.
pub fn bucket(salt: &str, identifier: &str) -> u32 {
	crc32fast::hash(format!("{salt}:{identifier}").as_bytes()) % 100
}

/// Decides rollout membership for a subject.
///
/// Anonymous subjects (no identifier) are never in the bucket, including at
/// 100%. Percentages above 100 are clamped to 100, so 0 never matches and
/// 100 always matches an identified subject.
pub fn is_in_bucket(salt: &str, identifier: Option<&str>, percentage: u8) -> bool {
	let Some(identifier) = identifier else {
		return false;
	};
	bucket(salt, identifier) < u32::from(percentage.min(100))
}
