// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The flag manager seam and the in-memory implementation.
//!
//! [`FlagManager`] is the collaborator interface the [`Client`](crate::Client)
//! delegates to. [`MemoryFlagManager`] is a fixture-driven implementation of
//! it: useful as an offline/static manager and as the deterministic fake
//! for interface-level tests, instead of call-expectation mocks.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vexil_core::{Context, DefaultsCollection, Flag, FlagsError, FlagValue, Result, Target};

use crate::config::Config;

/// Evaluation engine interface consumed by the client layer.
///
/// Composition methods are pure: they return a new manager value and leave
/// the receiver untouched, which is what lets a base client be reused
/// across independently configured call sites. The remaining operations
/// are synchronous; implementations must tolerate concurrent `all`/
/// `single`/`refresh_rules` calls without corrupting shared rule state.
pub trait FlagManager: Clone + Send + Sync {
	/// Returns a new manager evaluating under the given context.
	fn with_context(&self, context: Context) -> Self;

	/// Returns a new manager with the given defaults bound.
	fn with_defaults(&self, defaults: DefaultsCollection) -> Self;

	/// Evaluates every known flag under the current context.
	///
	/// No default substitution applies here.
	fn all(&self) -> Result<Vec<Flag>>;

	/// Evaluates a single flag.
	///
	/// When the key is unresolved, an inline `default` wins over any bound
	/// collection default; with neither, the result is
	/// [`FlagsError::NotFound`].
	fn single(&self, key: &str, default: Option<FlagValue>) -> Result<Flag>;

	/// Fire-and-forget usage notification. Must never fail or block
	/// evaluation; transport problems are the implementation's to swallow.
	fn report_usage(&self, key: &str, context: Option<&Context>);

	/// Drops cached rule state and re-reads from the source. Returns once
	/// the refresh has completed or failed.
	fn refresh_rules(&self) -> Result<()>;
}

/// A recorded usage report, kept by [`MemoryFlagManager`] for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
	pub key: String,
	pub context_kind: Option<String>,
	pub context_identifier: Option<String>,
	pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct ManagerState {
	/// Live rule state, keyed by flag key. BTreeMap keeps `all()` ordering
	/// deterministic.
	flags: BTreeMap<String, Flag>,
	usage: Vec<UsageRecord>,
	refreshes: u64,
}

/// Fixture-driven flag manager.
///
/// Rule state lives behind a shared lock so composed copies (from
/// [`with_context`](FlagManager::with_context) /
/// [`with_defaults`](FlagManager::with_defaults)) observe the same flags,
/// while each copy owns its context and defaults independently.
/// [`refresh_rules`](FlagManager::refresh_rules) restores the
/// construction-time snapshot, mirroring a drop-cache-and-refetch.
#[derive(Clone)]
pub struct MemoryFlagManager {
	state: Arc<RwLock<ManagerState>>,
	/// Pristine snapshot taken at construction; `refresh_rules` restores it.
	snapshot: Arc<BTreeMap<String, Flag>>,
	context: Option<Context>,
	defaults: DefaultsCollection,
	usage_reporting: bool,
}

impl MemoryFlagManager {
	/// Creates an empty manager.
	pub fn new() -> Self {
		Self::from_flags(std::iter::empty())
	}

	/// Creates a manager holding the given fixture flags.
	pub fn from_flags(flags: impl IntoIterator<Item = Flag>) -> Self {
		let snapshot: BTreeMap<String, Flag> =
			flags.into_iter().map(|f| (f.key.clone(), f)).collect();
		Self {
			state: Arc::new(RwLock::new(ManagerState {
				flags: snapshot.clone(),
				usage: Vec::new(),
				refreshes: 0,
			})),
			snapshot: Arc::new(snapshot),
			context: None,
			defaults: DefaultsCollection::new(),
			usage_reporting: true,
		}
	}

	/// Creates an empty manager honoring the config's usage-reporting toggle.
	pub fn from_config(config: &Config) -> Self {
		Self::new().with_usage_reporting(config.enable_usage_reporting)
	}

	/// Enables or disables usage recording.
	pub fn with_usage_reporting(mut self, enabled: bool) -> Self {
		self.usage_reporting = enabled;
		self
	}

	/// Replaces a flag in the live rule state only.
	///
	/// The construction-time snapshot is untouched, so a later
	/// `refresh_rules` discards this change.
	pub fn set_flag(&self, flag: Flag) {
		self.write_state().flags.insert(flag.key.clone(), flag);
	}

	/// Usage reports recorded so far, oldest first.
	pub fn usage_reports(&self) -> Vec<UsageRecord> {
		self.read_state().usage.clone()
	}

	/// How many times `refresh_rules` has run.
	pub fn refresh_count(&self) -> u64 {
		self.read_state().refreshes
	}

	fn read_state(&self) -> std::sync::RwLockReadGuard<'_, ManagerState> {
		self.state.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, ManagerState> {
		self.state.write().unwrap_or_else(PoisonError::into_inner)
	}

	/// Applies rollout metadata to a resolved flag: when the rollout is
	/// active and the bound subject's identifier falls inside the bucket,
	/// the rollout target becomes the flag's target. Rollout metadata
	/// stays attached either way.
	fn apply_rollout(&self, mut flag: Flag) -> Flag {
		let identifier = self.context.as_ref().and_then(Context::identifier);
		if let Some(rollout) = &flag.rollout {
			if rollout.applies_to(identifier) {
				flag.target = rollout.target.clone();
			}
		}
		flag
	}

	/// Synthesizes a flag carrying a default value for an unresolved key.
	fn default_flag(&self, key: &str, value: FlagValue) -> Flag {
		Flag::new(
			"default",
			value.kind(),
			key,
			key,
			Target::new("default", value),
		)
	}
}

impl Default for MemoryFlagManager {
	fn default() -> Self {
		Self::new()
	}
}

impl FlagManager for MemoryFlagManager {
	fn with_context(&self, context: Context) -> Self {
		Self {
			context: Some(context),
			..self.clone()
		}
	}

	fn with_defaults(&self, defaults: DefaultsCollection) -> Self {
		Self {
			defaults,
			..self.clone()
		}
	}

	fn all(&self) -> Result<Vec<Flag>> {
		let flags = self
			.read_state()
			.flags
			.values()
			.cloned()
			.map(|f| self.apply_rollout(f))
			.collect();
		Ok(flags)
	}

	fn single(&self, key: &str, default: Option<FlagValue>) -> Result<Flag> {
		if let Some(flag) = self.read_state().flags.get(key).cloned() {
			return Ok(self.apply_rollout(flag));
		}

		// Unresolved: inline default beats collection default.
		default
			.or_else(|| self.defaults.get(key).cloned())
			.map(|value| self.default_flag(key, value))
			.ok_or_else(|| FlagsError::not_found(key))
	}

	fn report_usage(&self, key: &str, context: Option<&Context>) {
		if !self.usage_reporting {
			debug!(key, "usage reporting disabled, dropping report");
			return;
		}

		let context = context.or(self.context.as_ref());
		self.write_state().usage.push(UsageRecord {
			key: key.to_string(),
			context_kind: context.map(|c| c.kind.clone()),
			context_identifier: context.and_then(|c| c.identifier.clone()),
			recorded_at: Utc::now(),
		});
	}

	fn refresh_rules(&self) -> Result<()> {
		let mut state = self.write_state();
		state.flags = (*self.snapshot).clone();
		state.refreshes += 1;
		debug!(flags = state.flags.len(), "rule state refreshed");
		Ok(())
	}
}
