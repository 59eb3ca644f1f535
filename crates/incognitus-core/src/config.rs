// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration: which tenant and application to request flags for,
//! and where the service lives.

use crate::error::{ConfigError, Result};

/// Service endpoint used when no base URL is configured.
pub const DEFAULT_URL: &str = "https://incognitus.io/api";

/// Header carrying the tenant identifier on every request.
pub const TENANT_HEADER: &str = "X-Tenant";

/// Header carrying the application identifier on every request.
pub const APPLICATION_HEADER: &str = "X-Application";

pub const ENV_TENANT_ID: &str = "INCOGNITUS_TENANT_ID";
pub const ENV_APPLICATION_ID: &str = "INCOGNITUS_APPLICATION_ID";
pub const ENV_BASE_URL: &str = "INCOGNITUS_BASE_URL";

/// Validated, immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	tenant_id: String,
	application_id: String,
	base_url: String,
}

impl Config {
	/// Creates a configuration against [`DEFAULT_URL`].
	///
	/// # Errors
	///
	/// - [`ConfigError::MissingTenantId`] if `tenant_id` is empty.
	/// - [`ConfigError::MissingApplicationId`] if `application_id` is empty.
	pub fn new(tenant_id: impl Into<String>, application_id: impl Into<String>) -> Result<Self> {
		let tenant_id = tenant_id.into();
		let application_id = application_id.into();

		if tenant_id.is_empty() {
			return Err(ConfigError::MissingTenantId);
		}
		if application_id.is_empty() {
			return Err(ConfigError::MissingApplicationId);
		}

		Ok(Self {
			tenant_id,
			application_id,
			base_url: DEFAULT_URL.to_string(),
		})
	}

	/// Points the configuration at a different service endpoint.
	///
	/// Trailing slashes are removed so paths can be appended directly.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
		let base_url = base_url.into();
		let trimmed = base_url.trim().trim_end_matches('/');

		let host = trimmed
			.strip_prefix("https://")
			.or_else(|| trimmed.strip_prefix("http://"));
		match host {
			Some(rest) if !rest.is_empty() => {}
			_ => return Err(ConfigError::InvalidBaseUrl(base_url)),
		}

		self.base_url = trimmed.to_string();
		Ok(self)
	}

	/// Loads configuration from environment variables.
	///
	/// # Required Environment Variables
	///
	/// - `INCOGNITUS_TENANT_ID`
	/// - `INCOGNITUS_APPLICATION_ID`
	///
	/// `INCOGNITUS_BASE_URL` is optional and overrides [`DEFAULT_URL`].
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let tenant_id =
			lookup(ENV_TENANT_ID).ok_or_else(|| ConfigError::MissingEnv(ENV_TENANT_ID.to_string()))?;
		let application_id = lookup(ENV_APPLICATION_ID)
			.ok_or_else(|| ConfigError::MissingEnv(ENV_APPLICATION_ID.to_string()))?;

		let config = Self::new(tenant_id, application_id)?;
		match lookup(ENV_BASE_URL).filter(|url| !url.trim().is_empty()) {
			Some(url) => config.with_base_url(url),
			None => Ok(config),
		}
	}

	pub fn tenant_id(&self) -> &str {
		&self.tenant_id
	}

	pub fn application_id(&self) -> &str {
		&self.application_id
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// URL of the endpoint listing every feature.
	pub fn features_url(&self) -> String {
		format!("{}/feature", self.base_url)
	}

	/// URL of the endpoint for a single feature. The name is encoded as one
	/// path segment.
	pub fn feature_url(&self, name: &str) -> String {
		format!("{}/feature/{}", self.base_url, urlencoding::encode(name))
	}

	/// The identifying headers attached to every request.
	pub fn headers(&self) -> [(&'static str, String); 2] {
		[
			(TENANT_HEADER, self.tenant_id.clone()),
			(APPLICATION_HEADER, self.application_id.clone()),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| map.get(key).cloned()
	}

	#[test]
	fn sets_tenant_id() {
		let config = Config::new("abc", "def").unwrap();
		assert_eq!(config.tenant_id(), "abc");
	}

	#[test]
	fn sets_application_id() {
		let config = Config::new("abc", "def").unwrap();
		assert_eq!(config.application_id(), "def");
	}

	#[test]
	fn rejects_missing_tenant_id() {
		let err = Config::new("", "def").unwrap_err();
		assert_eq!(err, ConfigError::MissingTenantId);
		assert!(err.to_string().contains("Tenant ID is required"));
	}

	#[test]
	fn rejects_missing_application_id() {
		let err = Config::new("abc", "").unwrap_err();
		assert_eq!(err, ConfigError::MissingApplicationId);
		assert!(err.to_string().contains("Application ID is required"));
	}

	#[test]
	fn tenant_checked_first_when_both_missing() {
		assert_eq!(Config::new("", "").unwrap_err(), ConfigError::MissingTenantId);
	}

	#[test]
	fn defaults_to_well_known_url() {
		let config = Config::new("abc", "def").unwrap();
		assert_eq!(config.base_url(), DEFAULT_URL);
		assert_eq!(config.features_url(), format!("{DEFAULT_URL}/feature"));
		assert_eq!(
			config.feature_url("foobar"),
			format!("{DEFAULT_URL}/feature/foobar")
		);
	}

	#[test]
	fn base_url_override_trims_trailing_slash() {
		let config = Config::new("abc", "def")
			.unwrap()
			.with_base_url("http://localhost:8080/api/")
			.unwrap();
		assert_eq!(config.base_url(), "http://localhost:8080/api");
		assert_eq!(config.features_url(), "http://localhost:8080/api/feature");
	}

	#[test]
	fn base_url_override_rejects_non_http() {
		let config = Config::new("abc", "def").unwrap();
		assert!(matches!(
			config.clone().with_base_url("ftp://example.com"),
			Err(ConfigError::InvalidBaseUrl(_))
		));
		assert!(matches!(
			config.with_base_url("https://"),
			Err(ConfigError::InvalidBaseUrl(_))
		));
	}

	#[test]
	fn feature_url_encodes_name_as_one_segment() {
		let config = Config::new("abc", "def").unwrap();
		assert_eq!(
			config.feature_url("a/b c"),
			format!("{DEFAULT_URL}/feature/a%2Fb%20c")
		);
	}

	#[test]
	fn headers_carry_both_identifiers() {
		let config = Config::new("abc", "def").unwrap();
		let headers = config.headers();
		assert_eq!(headers[0], (TENANT_HEADER, "abc".to_string()));
		assert_eq!(headers[1], (APPLICATION_HEADER, "def".to_string()));
	}

	#[test]
	fn from_lookup_reads_all_variables() {
		let config = Config::from_lookup(lookup_from(&[
			(ENV_TENANT_ID, "abc"),
			(ENV_APPLICATION_ID, "def"),
			(ENV_BASE_URL, "https://flags.example.com/"),
		]))
		.unwrap();
		assert_eq!(config.tenant_id(), "abc");
		assert_eq!(config.application_id(), "def");
		assert_eq!(config.base_url(), "https://flags.example.com");
	}

	#[test]
	fn from_lookup_requires_tenant_variable() {
		let err = Config::from_lookup(lookup_from(&[(ENV_APPLICATION_ID, "def")])).unwrap_err();
		assert_eq!(err, ConfigError::MissingEnv(ENV_TENANT_ID.to_string()));
	}

	#[test]
	fn from_lookup_validates_empty_values() {
		let err = Config::from_lookup(lookup_from(&[
			(ENV_TENANT_ID, "abc"),
			(ENV_APPLICATION_ID, ""),
		]))
		.unwrap_err();
		assert_eq!(err, ConfigError::MissingApplicationId);
	}

	#[test]
	fn from_lookup_ignores_blank_base_url() {
		let config = Config::from_lookup(lookup_from(&[
			(ENV_TENANT_ID, "abc"),
			(ENV_APPLICATION_ID, "def"),
			(ENV_BASE_URL, "  "),
		]))
		.unwrap();
		assert_eq!(config.base_url(), DEFAULT_URL);
	}
}
