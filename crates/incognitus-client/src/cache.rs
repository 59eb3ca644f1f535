// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local in-memory cache of feature states.
//!
//! The cache is built once from the full feature list and is read-only from
//! then on. Replacing it means building a new one; entries are never merged.
//! Because nothing mutates it, concurrent lookups need no locking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use incognitus_core::Feature;

/// Snapshot of feature states keyed by case-sensitive feature name.
#[derive(Debug, Clone, Default)]
pub(crate) struct FeatureCache {
	features: HashMap<String, bool>,
	populated_at: DateTime<Utc>,
}

impl FeatureCache {
	/// Builds a cache from a feature list. Later entries win on duplicate names.
	pub fn from_features(features: impl IntoIterator<Item = Feature>) -> Self {
		let features = features
			.into_iter()
			.map(|f| (f.name, f.is_enabled))
			.collect();

		Self {
			features,
			populated_at: Utc::now(),
		}
	}

	/// Returns the cached enabled state, or `None` if the name is not cached.
	pub fn get(&self, name: &str) -> Option<bool> {
		self.features.get(name).copied()
	}

	/// True iff `name` is cached, whatever its value.
	pub fn contains(&self, name: &str) -> bool {
		self.features.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.features.len()
	}

	/// When the snapshot was taken.
	pub fn populated_at(&self) -> DateTime<Utc> {
		self.populated_at
	}
}
