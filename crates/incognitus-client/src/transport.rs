// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transport adapter: the seam between the client and the network.
//!
//! The client only ever issues GET requests with a handful of headers and
//! decodes the body itself. [`HttpTransport`] is the reqwest implementation;
//! hosts with their own HTTP stack implement [`Transport`] directly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use incognitus_common_http::{retry, RetryConfig, RetryableError};
use reqwest::Client;
use tracing::debug;

use crate::error::TransportError;

/// A GET request issued by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
	pub url: String,
	pub headers: Vec<(&'static str, String)>,
}

impl TransportRequest {
	pub fn get(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			headers: Vec::new(),
		}
	}

	pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.headers.push((name, value.into()));
		self
	}
}

/// Performs GET requests on behalf of the client.
///
/// Implementations must report any non-2xx status as
/// [`TransportError::Status`] and any timeout as [`TransportError::Timeout`];
/// they must never hand back the body of a failed response as a success.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
	async fn get(&self, request: TransportRequest) -> Result<Bytes, TransportError>;
}

/// Shared transport handle.
pub type SharedTransport = Arc<dyn Transport>;

/// Builder for [`HttpTransport`].
pub struct HttpTransportBuilder {
	timeout: Duration,
	retry_config: RetryConfig,
	user_agent: Option<String>,
}

impl HttpTransportBuilder {
	pub fn new() -> Self {
		Self {
			timeout: HttpTransport::DEFAULT_TIMEOUT,
			retry_config: RetryConfig::disabled(),
			user_agent: None,
		}
	}

	/// Sets the per-request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Sets the retry policy. The default makes a single attempt.
	pub fn retry_config(mut self, config: RetryConfig) -> Self {
		self.retry_config = config;
		self
	}

	/// Overrides the User-Agent header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	pub fn build(self) -> Result<HttpTransport, TransportError> {
		let builder = match self.user_agent {
			Some(ua) => incognitus_common_http::builder_with_user_agent(ua),
			None => incognitus_common_http::builder(),
		};

		let client = builder
			.timeout(self.timeout)
			.build()
			.map_err(|e| TransportError::Connection(e.to_string()))?;

		Ok(HttpTransport {
			client,
			retry_config: self.retry_config,
		})
	}
}

impl Default for HttpTransportBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: Client,
	retry_config: RetryConfig,
}

impl HttpTransport {
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

	pub fn builder() -> HttpTransportBuilder {
		HttpTransportBuilder::new()
	}

	/// Builds a transport with the default timeout and no retries.
	pub fn new() -> Result<Self, TransportError> {
		HttpTransportBuilder::new().build()
	}

	async fn get_once(&self, request: &TransportRequest) -> Result<Bytes, TransportError> {
		let mut builder = self.client.get(&request.url);
		for (name, value) in &request.headers {
			builder = builder.header(*name, value);
		}

		let response = builder.send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				message: response.text().await.unwrap_or_default(),
			});
		}

		Ok(response.bytes().await?)
	}

	/// Statuses are retried only when listed in the policy; timeouts and
	/// connection failures always are.
	fn classify(&self, error: TransportError) -> AttemptError {
		let retryable = match &error {
			TransportError::Status { status, .. } => self.retry_config.is_retryable_status(*status),
			TransportError::Timeout | TransportError::Connection(_) => true,
		};
		AttemptError { error, retryable }
	}
}

/// A failed attempt, classified against the transport's retry policy.
#[derive(Debug)]
struct AttemptError {
	error: TransportError,
	retryable: bool,
}

impl RetryableError for AttemptError {
	fn is_retryable(&self) -> bool {
		self.retryable
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn get(&self, request: TransportRequest) -> Result<Bytes, TransportError> {
		debug!(url = %request.url, "GET");
		retry(&self.retry_config, || async {
			self.get_once(&request).await.map_err(|e| self.classify(e))
		})
		.await
		.map_err(|attempt| attempt.error)
	}
}
