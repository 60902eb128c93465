// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature flag client SDK for Vexil.
//!
//! This crate wires the core flag types (`vexil-core`) to an application:
//! it defines the [`FlagManager`] evaluation seam, the immutable
//! [`Client`] wrapper over it, and the SDK bootstrap [`Config`].
//!
//! # Design
//!
//! - **Explicit dependency injection.** There is no global accessor or
//!   container binding: build one [`Client`] per process or request scope
//!   and hand it to consumers. Clients are cheap to clone.
//! - **Immutable composition.** [`Client::with_context`] and
//!   [`Client::with_defaults`] return new values; a base client stays
//!   reusable and unaffected by its specializations.
//! - **Synchronous contract.** No operation spawns background work.
//!   Callers who need a non-blocking [`Client::refresh_rules`] run it on
//!   their own task.
//!
//! # Example
//!
//! ```
//! use vexil::{Client, MemoryFlagManager};
//! use vexil_core::{Context, DefaultsCollection};
//!
//! let manager = MemoryFlagManager::new();
//! let client = Client::new(manager)
//!     .with_context(Context::single("user", "user-0"))
//!     .with_defaults(DefaultsCollection::new().with("dark-mode", false));
//!
//! let flag = client.single("dark-mode")?;
//! assert!(!flag.is_enabled());
//! # Ok::<(), vexil_core::FlagsError>(())
//! ```

pub mod client;
pub mod config;
pub mod manager;

pub use client::Client;
pub use config::{CacheBackend, Config, ConfigError, DEFAULT_API_ENDPOINT, DEFAULT_CACHE_TTL};
pub use manager::{FlagManager, MemoryFlagManager, UsageRecord};

// Re-export core types for convenience
pub use vexil_core::{
	Context, DefaultsCollection, Flag, FlagKind, FlagsError, FlagValue, Result, Rollout,
	RolloutStatus, Target, TargetValue,
};
