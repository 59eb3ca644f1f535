// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the feature flags SDK.

use incognitus_common_http::DEFAULT_RETRYABLE_STATUSES;
use incognitus_core::ConfigError;
use thiserror::Error;

/// Result type alias for the flags SDK.
pub type Result<T> = std::result::Result<T, IncognitusError>;

/// Failures reported by a [`crate::Transport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
	/// The request did not complete within the transport's deadline.
	#[error("request timed out")]
	Timeout,

	/// The service could not be reached.
	#[error("failed to connect to feature service: {0}")]
	Connection(String),

	/// The service answered with a non-success status.
	#[error("feature service returned an error: {status} - {message}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, if any.
		message: String,
	},
}

impl TransportError {
	/// HTTP status of the failure, if the service answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			TransportError::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Whether the failure is transient under the default retry policy:
	/// timeouts, connection failures, and the default retryable statuses.
	pub fn is_retryable(&self) -> bool {
		match self {
			TransportError::Timeout | TransportError::Connection(_) => true,
			TransportError::Status { status, .. } => DEFAULT_RETRYABLE_STATUSES
				.iter()
				.any(|s| s.as_u16() == *status),
		}
	}
}

impl From<reqwest::Error> for TransportError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			TransportError::Timeout
		} else if let Some(status) = err.status() {
			TransportError::Status {
				status: status.as_u16(),
				message: err.to_string(),
			}
		} else {
			TransportError::Connection(err.to_string())
		}
	}
}

/// A remote call that failed, with the URL it was made against.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
	/// The transport failed or the service returned a non-success status.
	#[error("request to {url} failed: {source}")]
	Transport {
		url: String,
		#[source]
		source: TransportError,
	},

	/// The response body did not match the expected shape.
	#[error("failed to decode response from {url}: {message}")]
	Decode { url: String, message: String },
}

impl RemoteError {
	/// HTTP status of the failure, if the service answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			RemoteError::Transport { source, .. } => source.status(),
			RemoteError::Decode { .. } => None,
		}
	}

	pub fn url(&self) -> &str {
		match self {
			RemoteError::Transport { url, .. } | RemoteError::Decode { url, .. } => url,
		}
	}

	fn is_retryable(&self) -> bool {
		match self {
			RemoteError::Transport { source, .. } => source.is_retryable(),
			RemoteError::Decode { .. } => false,
		}
	}
}

/// Errors surfaced by the feature flags SDK.
#[derive(Error, Debug)]
pub enum IncognitusError {
	/// The configuration was rejected.
	#[error(transparent)]
	InvalidConfig(#[from] ConfigError),

	/// The client was used before a successful initialization.
	#[error("Incognitus service not initialized; call initialize first")]
	NotSupported,

	/// The initial feature fetch failed; the previous client state is kept.
	#[error("failed to initialize feature client: {0}")]
	Initialization(#[source] RemoteError),

	/// A feature list request failed.
	#[error(transparent)]
	Remote(#[from] RemoteError),
}

impl IncognitusError {
	/// Returns true if repeating the call may succeed without caller changes.
	pub fn is_retryable(&self) -> bool {
		match self {
			IncognitusError::Initialization(e) | IncognitusError::Remote(e) => e.is_retryable(),
			IncognitusError::InvalidConfig(_) | IncognitusError::NotSupported => false,
		}
	}

	/// HTTP status behind a remote failure, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			IncognitusError::Initialization(e) | IncognitusError::Remote(e) => e.status(),
			_ => None,
		}
	}
}
