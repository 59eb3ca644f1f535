// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Incognitus feature flag SDK.
//!
//! This crate holds the pieces that do not touch the network:
//! - [`Config`]: the validated tenant/application pair and service endpoint
//! - [`Feature`]: a named boolean flag as returned by the service
//! - The wire records for the list and single-feature endpoints
//!
//! # Example
//!
//! ```
//! use incognitus_core::Config;
//!
//! let config = Config::new("abc", "def").unwrap();
//! assert_eq!(config.tenant_id(), "abc");
//! assert_eq!(config.features_url(), "https://incognitus.io/api/feature");
//! ```

pub mod config;
pub mod error;
pub mod feature;

pub use config::{
	Config, APPLICATION_HEADER, DEFAULT_URL, ENV_APPLICATION_ID, ENV_BASE_URL, ENV_TENANT_ID,
	TENANT_HEADER,
};
pub use error::{ConfigError, Result};
pub use feature::{Feature, FeatureListResponse, FeatureStatusResponse};
