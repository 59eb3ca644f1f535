// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature Flags Rust SDK for Incognitus.
//!
//! The client fetches every feature for a tenant/application pair once at
//! initialization and answers flag checks from that snapshot. Flags that were
//! not in the snapshot are looked up individually; if that lookup fails for
//! any reason the flag reads as disabled.
//!
//! # Features
//!
//! - **Process-wide client**: [`initialize`], [`instance`], [`is_ready`]
//! - **Local caching**: cached flags are answered without I/O
//! - **Fail-closed lookups**: [`FeatureClient::get_feature`] never errors
//! - **Pluggable transport**: implement [`Transport`] to bring your own HTTP stack
//!
//! # Example
//!
//! ```ignore
//! use incognitus_client::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("tenant-id", "application-id")?;
//!     let client = incognitus_client::initialize(config).await?;
//!
//!     if client.is_enabled("new_checkout").await {
//!         // ...
//!     }
//!
//!     // Anywhere else in the process:
//!     let client = incognitus_client::instance()?;
//!     let all = client.get_all_features().await?;
//!
//!     Ok(())
//! }
//! ```

mod cache;
mod client;
mod error;
mod singleton;
#[cfg(test)]
mod testing;
mod transport;

pub use client::FeatureClient;
pub use error::{IncognitusError, RemoteError, Result, TransportError};
pub use singleton::{
	initialize, initialize_with_transport, instance, is_ready, reset, ClientSlot,
};
pub use transport::{
	HttpTransport, HttpTransportBuilder, SharedTransport, Transport, TransportRequest,
};

// Re-export core types for convenience
pub use incognitus_common_http::RetryConfig;
pub use incognitus_core::{Config, ConfigError, Feature, DEFAULT_URL};
