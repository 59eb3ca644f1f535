// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

/// Creates a new HTTP client builder with the standard SDK User-Agent header.
///
/// Use this when you need to customize the client (e.g., set timeout).
///
/// # Example
/// ```ignore
/// let client = incognitus_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a new HTTP client builder with a custom User-Agent header.
///
/// Hosts embedding the SDK use this to append their own product token.
pub fn builder_with_user_agent(user_agent: impl Into<String>) -> ClientBuilder {
	Client::builder().user_agent(user_agent.into())
}

/// Returns the standard SDK User-Agent string.
///
/// Format: `incognitus-rust/{version}`
pub fn user_agent() -> String {
	format!("incognitus-rust/{}", env!("CARGO_PKG_VERSION"))
}
