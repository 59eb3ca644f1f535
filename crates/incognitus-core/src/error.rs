// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration errors.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building a [`crate::Config`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// The tenant identifier was empty.
	#[error("Tenant ID is required")]
	MissingTenantId,

	/// The application identifier was empty.
	#[error("Application ID is required")]
	MissingApplicationId,

	/// The service URL is not an http(s) URL.
	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),

	/// A required environment variable is not set.
	#[error("missing environment variable: {0}")]
	MissingEnv(String),
}
