// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller-supplied fallback values keyed by flag key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::FlagValue;

/// Fallback values used when a flag key has no rule or target resolution.
///
/// Precedence at evaluation time is inline per-call default, then the
/// value held here, then a not-found error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultsCollection {
	values: HashMap<String, FlagValue>,
}

impl DefaultsCollection {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the default for a flag key, replacing any previous value.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> &mut Self {
		self.values.insert(key.into(), value.into());
		self
	}

	/// Builder-style variant of [`set`](Self::set).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> Self {
		self.set(key, value);
		self
	}

	/// Looks up the default for a flag key.
	pub fn get(&self, key: &str) -> Option<&FlagValue> {
		self.values.get(key)
	}

	/// Removes and returns the default for a flag key.
	pub fn remove(&mut self, key: &str) -> Option<FlagValue> {
		self.values.remove(key)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over (key, value) pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl<K: Into<String>, V: Into<FlagValue>> FromIterator<(K, V)> for DefaultsCollection {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
