// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The immutable flag client.

use tracing::debug;

use vexil_core::{Context, DefaultsCollection, Flag, FlagValue, Result};

use crate::manager::FlagManager;

/// A value representing the evaluation configuration in effect.
///
/// A client wraps a composed [`FlagManager`] and delegates every
/// operation to it. The composition methods ([`with_context`](Self::with_context),
/// [`with_defaults`](Self::with_defaults)) return a new client and leave
/// the receiver untouched, so a base client can be shared and specialized
/// per call site:
///
/// ```
/// use vexil::{Client, MemoryFlagManager};
/// use vexil_core::Context;
///
/// let base = Client::new(MemoryFlagManager::new());
/// let for_user = base.with_context(Context::single("user", "user-0"));
/// let for_org = base.with_context(Context::single("organization", "org-1"));
/// // `base`, `for_user`, and `for_org` evaluate independently.
/// ```
///
/// There is no global accessor: construct one client per process or per
/// request scope and pass it to consumers explicitly.
#[derive(Debug, Clone)]
pub struct Client<M: FlagManager> {
	manager: M,
}

impl<M: FlagManager> Client<M> {
	/// Wraps a flag manager.
	pub fn new(manager: M) -> Self {
		Self { manager }
	}

	/// Returns a new client evaluating under the given context.
	///
	/// The context is taken by value; the client owns its copy, so the
	/// caller mutating their own context afterwards has no effect here.
	pub fn with_context(&self, context: Context) -> Self {
		Self {
			manager: self.manager.with_context(context),
		}
	}

	/// Returns a new client with the given defaults bound.
	pub fn with_defaults(&self, defaults: DefaultsCollection) -> Self {
		Self {
			manager: self.manager.with_defaults(defaults),
		}
	}

	/// Evaluates every known flag under the current context.
	pub fn all(&self) -> Result<Vec<Flag>> {
		self.manager.all()
	}

	/// Evaluates a single flag by key.
	///
	/// Fails with [`FlagsError::NotFound`](vexil_core::FlagsError::NotFound)
	/// when the key resolves to nothing and no bound collection default
	/// covers it. Manager failures propagate unchanged.
	pub fn single(&self, key: &str) -> Result<Flag> {
		debug!(key, "evaluating flag");
		self.manager.single(key, None)
	}

	/// Evaluates a single flag, falling back to `default` when the key is
	/// otherwise unresolved. The inline default wins over any bound
	/// collection default.
	pub fn single_or(&self, key: &str, default: impl Into<FlagValue>) -> Result<Flag> {
		debug!(key, "evaluating flag with inline default");
		self.manager.single(key, Some(default.into()))
	}

	/// Reports that a flag was evaluated. Fire-and-forget: never fails and
	/// never affects evaluation control flow.
	pub fn report_usage(&self, key: &str, context: Option<&Context>) {
		self.manager.report_usage(key, context);
	}

	/// Forces the manager to drop cached rule state and re-fetch. Blocks
	/// until the refresh completes or fails.
	pub fn refresh_rules(&self) -> Result<()> {
		debug!("refreshing flag rules");
		self.manager.refresh_rules()
	}
}
