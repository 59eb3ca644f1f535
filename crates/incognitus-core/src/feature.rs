// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature records and the response bodies of the feature endpoints.

use serde::{Deserialize, Serialize};

/// A named boolean flag as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
	pub name: String,
	#[serde(rename = "isEnabled")]
	pub is_enabled: bool,
}

impl Feature {
	pub fn new(name: impl Into<String>, is_enabled: bool) -> Self {
		Self {
			name: name.into(),
			is_enabled,
		}
	}
}

/// Body of `GET <base_url>/feature`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureListResponse {
	#[serde(rename = "Features")]
	pub features: Vec<Feature>,
}

/// Body of `GET <base_url>/feature/<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureStatusResponse {
	#[serde(rename = "isEnabled")]
	pub is_enabled: bool,
}
