// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransportError;
use crate::transport::{Transport, TransportRequest};

pub(crate) const LIST_URL: &str = "https://incognitus.io/api/feature";
pub(crate) const FOOBAR_URL: &str = "https://incognitus.io/api/feature/foobar";

/// Serves canned responses by URL and records every request. Unknown URLs
/// answer 404.
#[derive(Default)]
pub(crate) struct FakeTransport {
	responses: HashMap<String, Result<String, TransportError>>,
	requests: Mutex<Vec<TransportRequest>>,
}

impl FakeTransport {
	pub(crate) fn with(mut self, url: &str, response: Result<&str, TransportError>) -> Self {
		self
			.responses
			.insert(url.to_string(), response.map(str::to_string));
		self
	}

	pub(crate) fn requests(&self) -> Vec<TransportRequest> {
		self.requests.lock().unwrap().clone()
	}
}

#[async_trait]
impl Transport for FakeTransport {
	async fn get(&self, request: TransportRequest) -> Result<Bytes, TransportError> {
		self.requests.lock().unwrap().push(request.clone());
		match self.responses.get(&request.url) {
			Some(Ok(body)) => Ok(Bytes::from(body.clone())),
			Some(Err(e)) => Err(e.clone()),
			None => Err(TransportError::Status {
				status: 404,
				message: "not found".to_string(),
			}),
		}
	}
}
