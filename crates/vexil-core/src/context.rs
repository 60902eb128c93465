// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Evaluation context: the subject a flag is evaluated for.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The subject (user, organization, service, ...) and its attributes.
///
/// Contexts are plain owned values. Composing a context into a client or
/// manager moves (or clones) it; the composed copy is independent, so
/// mutating the caller's own copy afterwards never affects evaluation.
///
/// Subjects without an identifier never match percentage rollouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
	/// Subject type tag, e.g. "user", "organization", "service".
	#[serde(rename = "type")]
	pub kind: String,
	/// Stable unique id of the subject, if known.
	pub identifier: Option<String>,
	/// Display label.
	pub name: Option<String>,
	/// Attribute key to ordered values, used for rule matching.
	#[serde(default)]
	pub attributes: HashMap<String, Vec<String>>,
}

impl Context {
	/// Creates an anonymous context of the given subject type.
	pub fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			identifier: None,
			name: None,
			attributes: HashMap::new(),
		}
	}

	/// Creates a context for a single identified subject.
	pub fn single(kind: impl Into<String>, identifier: impl Into<String>) -> Self {
		Self {
			identifier: Some(identifier.into()),
			..Self::new(kind)
		}
	}

	/// Sets the display name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Appends a value to the attribute's ordered value list.
	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes
			.entry(key.into())
			.or_default()
			.push(value.into());
		self
	}

	/// Replaces all values for an attribute.
	pub fn set_attribute(&mut self, key: impl Into<String>, values: Vec<String>) {
		self.attributes.insert(key.into(), values);
	}

	/// Looks up an attribute's values by key.
	pub fn attribute(&self, key: &str) -> Option<&[String]> {
		self.attributes.get(key).map(Vec::as_slice)
	}

	/// The subject identifier, if present.
	pub fn identifier(&self) -> Option<&str> {
		self.identifier.as_deref()
	}
}
