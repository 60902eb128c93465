// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Vexil feature flag SDK.
//!
//! This crate provides the shared value types used by the client SDK
//! (`vexil`): flags, targets, rollouts, evaluation contexts, default
//! collections, and the deterministic rollout bucket assignment.
//!
//! # Overview
//!
//! - [`Flag`] is the immutable result of an evaluation: a typed target
//!   value plus opaque rules and optional [`Rollout`] metadata.
//! - [`Context`] describes the subject being evaluated (user, org,
//!   service) and its attributes.
//! - [`DefaultsCollection`] holds caller-supplied fallback values.
//! - [`rollout::is_in_bucket`] decides percentage rollout membership with
//!   a hash fixed for cross-SDK agreement.
//!
//! # Example
//!
//! ```
//! use vexil_core::{rollout, Context};
//!
//! let ctx = Context::single("user", "user-0").with_attribute("plan", "enterprise");
//!
//! // CRC-32("test-salt:user-0") % 100 == 34, inside a 50% rollout.
//! assert!(rollout::is_in_bucket("test-salt", ctx.identifier(), 50));
//! ```

pub mod context;
pub mod defaults;
pub mod error;
pub mod flag;
pub mod rollout;
pub mod value;

pub use context::Context;
pub use defaults::DefaultsCollection;
pub use error::{FlagsError, Result};
pub use flag::{Flag, Target, TargetValue};
pub use rollout::{bucket, is_in_bucket, Rollout, RolloutStatus};
pub use value::{FlagKind, FlagValue};
