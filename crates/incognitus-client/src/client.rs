// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature client: fetches the feature list once, then answers flag queries
//! from the cache, falling back to a per-feature lookup on a miss.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use incognitus_core::{Config, Feature, FeatureListResponse, FeatureStatusResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cache::FeatureCache;
use crate::error::{IncognitusError, RemoteError, Result};
use crate::transport::{HttpTransport, SharedTransport, TransportRequest};

/// Client for querying feature flags for one tenant/application pair.
///
/// A client is immutable once connected: its configuration and cache never
/// change. Re-initialization produces a new client rather than mutating this
/// one, so a `FeatureClient` can be shared freely across tasks.
pub struct FeatureClient {
	config: Config,
	cache: FeatureCache,
	transport: SharedTransport,
}

impl FeatureClient {
	/// Connects over HTTP and populates the cache from the feature list.
	pub async fn connect(config: Config) -> Result<Self> {
		let transport = HttpTransport::new().map_err(|source| {
			IncognitusError::Initialization(RemoteError::Transport {
				url: config.features_url(),
				source,
			})
		})?;

		Self::connect_with_transport(config, Arc::new(transport)).await
	}

	/// Populates the cache from the feature list using the given transport.
	///
	/// # Errors
	///
	/// Returns [`IncognitusError::Initialization`] if the list cannot be
	/// fetched or decoded.
	pub async fn connect_with_transport(config: Config, transport: SharedTransport) -> Result<Self> {
		let features = fetch_features(&config, &transport)
			.await
			.map_err(IncognitusError::Initialization)?;
		let cache = FeatureCache::from_features(features);

		info!(
			tenant_id = config.tenant_id(),
			application_id = config.application_id(),
			features = cache.len(),
			"Feature client initialized"
		);

		Ok(Self {
			config,
			cache,
			transport,
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Fetches the current feature list from the service.
	///
	/// Always a remote call; the cache is neither consulted nor updated.
	pub async fn get_all_features(&self) -> Result<Vec<Feature>> {
		Ok(fetch_features(&self.config, &self.transport).await?)
	}

	/// True iff `name` was in the feature list at initialization.
	pub fn has_cached_feature(&self, name: &str) -> bool {
		self.cache.contains(name)
	}

	/// Returns whether a feature is enabled.
	///
	/// Cached features are answered locally. Anything else is looked up on
	/// the single-feature endpoint, and any failure of that lookup (network
	/// error, timeout, non-success status including 404, malformed body)
	/// resolves to `false`.
	pub async fn get_feature(&self, name: &str) -> bool {
		if let Some(enabled) = self.cache.get(name) {
			debug!(feature = name, enabled, "feature cache hit");
			return enabled;
		}

		debug!(feature = name, "feature cache miss");
		match self.fetch_feature(name).await {
			Ok(enabled) => enabled,
			// Fail closed: an unknown or unreachable flag reads as disabled.
			Err(e) => {
				warn!(feature = name, error = %e, "feature lookup failed, treating as disabled");
				false
			}
		}
	}

	pub async fn is_enabled(&self, name: &str) -> bool {
		self.get_feature(name).await
	}

	pub async fn is_disabled(&self, name: &str) -> bool {
		!self.get_feature(name).await
	}

	/// Number of features in the cache.
	pub fn cached_feature_count(&self) -> usize {
		self.cache.len()
	}

	/// When the cache was populated.
	pub fn cache_populated_at(&self) -> DateTime<Utc> {
		self.cache.populated_at()
	}

	async fn fetch_feature(&self, name: &str) -> std::result::Result<bool, RemoteError> {
		let url = self.config.feature_url(name);
		let status: FeatureStatusResponse = fetch_json(&self.config, &self.transport, url).await?;
		Ok(status.is_enabled)
	}
}

impl fmt::Debug for FeatureClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FeatureClient")
			.field("config", &self.config)
			.field("cached_features", &self.cache.len())
			.finish_non_exhaustive()
	}
}

async fn fetch_features(
	config: &Config,
	transport: &SharedTransport,
) -> std::result::Result<Vec<Feature>, RemoteError> {
	let list: FeatureListResponse = fetch_json(config, transport, config.features_url()).await?;
	Ok(list.features)
}

/// Issues a GET with the identifying headers and decodes the body as `T`.
async fn fetch_json<T: DeserializeOwned>(
	config: &Config,
	transport: &SharedTransport,
	url: String,
) -> std::result::Result<T, RemoteError> {
	let request = config
		.headers()
		.into_iter()
		.fold(TransportRequest::get(url.clone()), |req, (name, value)| {
			req.header(name, value)
		});

	let body = transport
		.get(request)
		.await
		.map_err(|source| RemoteError::Transport {
			url: url.clone(),
			source,
		})?;

	serde_json::from_slice(&body).map_err(|e| RemoteError::Decode {
		url,
		message: e.to_string(),
	})
}
