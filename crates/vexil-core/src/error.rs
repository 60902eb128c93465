// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for flag evaluation.

use thiserror::Error;

/// Errors surfaced by flag evaluation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FlagsError {
	/// No target, inline default, or collection default resolved for the key.
	#[error("flag not found: {key}")]
	NotFound { key: String },

	/// Failure raised by the flag manager (network, cache I/O).
	///
	/// The client layer carries these through unchanged; they are never
	/// retried or swallowed at this level.
	#[error("flag manager error: {0}")]
	Manager(String),

	/// Rule refresh failed.
	#[error("rule refresh failed: {0}")]
	Refresh(String),
}

impl FlagsError {
	/// Constructs a [`FlagsError::NotFound`] for the given key.
	pub fn not_found(key: impl Into<String>) -> Self {
		Self::NotFound { key: key.into() }
	}
}

/// Result type alias for flag operations.
pub type Result<T> = std::result::Result<T, FlagsError>;
