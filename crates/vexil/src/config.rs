// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SDK bootstrap configuration.
//!
//! Configuration is loaded from `VEXIL_*` environment variables or built
//! directly. The library never reads the environment implicitly; call
//! [`Config::from_env`] at startup and pass the result where it is needed.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default rule cache lifetime: one hour.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Default API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.vexil.dev";

/// Errors from loading or validating configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	/// The environment token is required for non-null operation.
	#[error("environment token is required (set VEXIL_ENVIRONMENT_TOKEN)")]
	MissingToken,

	/// Filesystem caching needs a directory to write into.
	#[error("cache directory is required when the cache backend is 'filesystem'")]
	MissingCacheDirectory,

	/// Unrecognized cache backend name.
	#[error("invalid cache backend '{0}': expected 'memory', 'filesystem', or 'null'")]
	InvalidBackend(String),

	/// Cache TTL was not a whole number of seconds.
	#[error("invalid cache TTL '{0}': expected seconds as an integer")]
	InvalidTtl(String),

	/// Boolean variable was neither true/false/1/0.
	#[error("invalid boolean '{0}': expected 'true', 'false', '1', or '0'")]
	InvalidBool(String),
}

/// Where rule state is cached between fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
	/// In-process cache, dropped on restart.
	#[default]
	Memory,
	/// On-disk cache under [`Config::cache_directory`].
	Filesystem,
	/// No caching; every evaluation refetches.
	Null,
}

impl FromStr for CacheBackend {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"memory" => Ok(CacheBackend::Memory),
			"filesystem" => Ok(CacheBackend::Filesystem),
			"null" => Ok(CacheBackend::Null),
			other => Err(ConfigError::InvalidBackend(other.to_string())),
		}
	}
}

/// SDK configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
	/// Environment token issued by the flag service.
	pub environment_token: String,
	/// How long fetched rules stay fresh.
	pub cache_ttl: Duration,
	pub cache_backend: CacheBackend,
	/// Required when `cache_backend` is [`CacheBackend::Filesystem`].
	pub cache_directory: Option<PathBuf>,
	/// When disabled, managers drop usage reports instead of recording them.
	pub enable_usage_reporting: bool,
	pub api_endpoint: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			environment_token: String::new(),
			cache_ttl: DEFAULT_CACHE_TTL,
			cache_backend: CacheBackend::default(),
			cache_directory: None,
			enable_usage_reporting: true,
			api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
		}
	}
}

impl Config {
	/// Creates a config with the given token and defaults for the rest.
	pub fn new(environment_token: impl Into<String>) -> Self {
		Self {
			environment_token: environment_token.into(),
			..Self::default()
		}
	}

	/// Loads configuration from `VEXIL_*` environment variables.
	///
	/// Unset variables keep their defaults; malformed values are errors
	/// rather than silent fallbacks. Validation (token presence, backend
	/// requirements) is separate — call [`validate`](Self::validate) before
	/// connecting.
	pub fn from_env() -> Result<Self, ConfigError> {
		let mut config = Self::default();

		if let Ok(token) = env::var("VEXIL_ENVIRONMENT_TOKEN") {
			config.environment_token = token;
		}
		if let Ok(ttl) = env::var("VEXIL_CACHE_TTL") {
			let secs: u64 = ttl.parse().map_err(|_| ConfigError::InvalidTtl(ttl))?;
			config.cache_ttl = Duration::from_secs(secs);
		}
		if let Ok(backend) = env::var("VEXIL_CACHE_BACKEND") {
			config.cache_backend = backend.parse()?;
		}
		if let Ok(dir) = env::var("VEXIL_CACHE_DIRECTORY") {
			if !dir.is_empty() {
				config.cache_directory = Some(PathBuf::from(dir));
			}
		}
		if let Ok(flag) = env::var("VEXIL_ENABLE_USAGE_REPORTING") {
			config.enable_usage_reporting = parse_bool(&flag)?;
		}
		if let Ok(endpoint) = env::var("VEXIL_API_ENDPOINT") {
			config.api_endpoint = endpoint;
		}

		Ok(config)
	}

	/// Checks invariants that only matter once the SDK goes live.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.environment_token.is_empty() {
			return Err(ConfigError::MissingToken);
		}
		if self.cache_backend == CacheBackend::Filesystem && self.cache_directory.is_none() {
			return Err(ConfigError::MissingCacheDirectory);
		}
		Ok(())
	}
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
	match value {
		"true" | "1" => Ok(true),
		"false" | "0" => Ok(false),
		other => Err(ConfigError::InvalidBool(other.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = Config::default();
		assert_eq!(config.cache_ttl, Duration::from_secs(3600));
		assert_eq!(config.cache_backend, CacheBackend::Memory);
		assert!(config.enable_usage_reporting);
		assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
	}

	#[test]
	fn validate_requires_token() {
		assert_eq!(Config::default().validate(), Err(ConfigError::MissingToken));
		assert_eq!(Config::new("tok_test").validate(), Ok(()));
	}

	#[test]
	fn validate_filesystem_requires_directory() {
		let mut config = Config::new("tok_test");
		config.cache_backend = CacheBackend::Filesystem;
		assert_eq!(config.validate(), Err(ConfigError::MissingCacheDirectory));

		config.cache_directory = Some(PathBuf::from("/var/cache/vexil"));
		assert_eq!(config.validate(), Ok(()));
	}

	#[test]
	fn backend_parsing() {
		assert_eq!("memory".parse(), Ok(CacheBackend::Memory));
		assert_eq!("filesystem".parse(), Ok(CacheBackend::Filesystem));
		assert_eq!("null".parse(), Ok(CacheBackend::Null));
		assert_eq!(
			"redis".parse::<CacheBackend>(),
			Err(ConfigError::InvalidBackend("redis".to_string()))
		);
	}

	#[test]
	fn bool_parsing() {
		assert_eq!(parse_bool("true"), Ok(true));
		assert_eq!(parse_bool("0"), Ok(false));
		assert_eq!(
			parse_bool("yes"),
			Err(ConfigError::InvalidBool("yes".to_string()))
		);
	}

	// Environment manipulation stays in one test: cargo runs tests in
	// parallel and the process environment is shared.
	#[test]
	fn from_env_reads_all_variables() {
		env::set_var("VEXIL_ENVIRONMENT_TOKEN", "tok_env");
		env::set_var("VEXIL_CACHE_TTL", "120");
		env::set_var("VEXIL_CACHE_BACKEND", "filesystem");
		env::set_var("VEXIL_CACHE_DIRECTORY", "/tmp/vexil-cache");
		env::set_var("VEXIL_ENABLE_USAGE_REPORTING", "false");
		env::set_var("VEXIL_API_ENDPOINT", "https://flags.example.com");

		let config = Config::from_env().unwrap();
		assert_eq!(config.environment_token, "tok_env");
		assert_eq!(config.cache_ttl, Duration::from_secs(120));
		assert_eq!(config.cache_backend, CacheBackend::Filesystem);
		assert_eq!(
			config.cache_directory,
			Some(PathBuf::from("/tmp/vexil-cache"))
		);
		assert!(!config.enable_usage_reporting);
		assert_eq!(config.api_endpoint, "https://flags.example.com");
		assert_eq!(config.validate(), Ok(()));

		env::set_var("VEXIL_CACHE_TTL", "soon");
		assert_eq!(
			Config::from_env(),
			Err(ConfigError::InvalidTtl("soon".to_string()))
		);

		for var in [
			"VEXIL_ENVIRONMENT_TOKEN",
			"VEXIL_CACHE_TTL",
			"VEXIL_CACHE_BACKEND",
			"VEXIL_CACHE_DIRECTORY",
			"VEXIL_ENABLE_USAGE_REPORTING",
			"VEXIL_API_ENDPOINT",
		] {
			env::remove_var(var);
		}
	}
}
