// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process-wide client lifecycle.
//!
//! A [`ClientSlot`] is either uninitialized or holds the live
//! [`FeatureClient`]. The free functions in this module operate on a single
//! process-wide slot; embedders that want their own lifetime can construct a
//! `ClientSlot` directly.
//!
//! Initializations are serialized: each one holds the slot's init lock while
//! it fetches the feature list, then swaps the finished client in with a
//! single write. The last initialization to succeed is the one that stays
//! visible, and a failed one leaves the previous client (or the
//! uninitialized state) in place.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use incognitus_core::Config;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::client::FeatureClient;
use crate::error::{IncognitusError, Result};
use crate::transport::SharedTransport;

/// Holder for at most one live [`FeatureClient`].
#[derive(Debug, Default)]
pub struct ClientSlot {
	current: RwLock<Option<Arc<FeatureClient>>>,
	init_lock: Mutex<()>,
}

impl ClientSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Connects over HTTP and makes the new client current.
	pub async fn initialize(&self, config: Config) -> Result<Arc<FeatureClient>> {
		let _guard = self.init_lock.lock().await;
		let result = FeatureClient::connect(config).await;
		self.finish_initialize(result)
	}

	/// Connects with the given transport and makes the new client current.
	pub async fn initialize_with_transport(
		&self,
		config: Config,
		transport: SharedTransport,
	) -> Result<Arc<FeatureClient>> {
		let _guard = self.init_lock.lock().await;
		let result = FeatureClient::connect_with_transport(config, transport).await;
		self.finish_initialize(result)
	}

	fn finish_initialize(&self, result: Result<FeatureClient>) -> Result<Arc<FeatureClient>> {
		match result {
			Ok(client) => {
				let client = Arc::new(client);
				self.install(Arc::clone(&client));
				Ok(client)
			}
			Err(e) => {
				warn!(error = %e, ready = self.is_ready(), "feature client initialization failed");
				Err(e)
			}
		}
	}

	/// Makes an already connected client current, replacing any previous one.
	pub fn install(&self, client: Arc<FeatureClient>) {
		*self
			.current
			.write()
			.unwrap_or_else(PoisonError::into_inner) = Some(client);
	}

	/// Returns the current client.
	///
	/// # Errors
	///
	/// Returns [`IncognitusError::NotSupported`] before a successful
	/// initialization.
	pub fn instance(&self) -> Result<Arc<FeatureClient>> {
		self
			.current
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
			.ok_or(IncognitusError::NotSupported)
	}

	pub fn is_ready(&self) -> bool {
		self
			.current
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.is_some()
	}

	/// Drops the current client, returning the slot to uninitialized.
	pub fn reset(&self) {
		let previous = self
			.current
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.take();
		if previous.is_some() {
			info!("Feature client reset");
		}
	}
}

static GLOBAL: OnceLock<ClientSlot> = OnceLock::new();

fn global() -> &'static ClientSlot {
	GLOBAL.get_or_init(ClientSlot::new)
}

/// Initializes the process-wide client over HTTP.
///
/// May be called again at any time; a successful call replaces the previous
/// client and its cache wholesale.
pub async fn initialize(config: Config) -> Result<Arc<FeatureClient>> {
	global().initialize(config).await
}

/// Initializes the process-wide client with a custom transport.
pub async fn initialize_with_transport(
	config: Config,
	transport: SharedTransport,
) -> Result<Arc<FeatureClient>> {
	global().initialize_with_transport(config, transport).await
}

/// Returns the process-wide client, or [`IncognitusError::NotSupported`] if
/// none has been initialized.
pub fn instance() -> Result<Arc<FeatureClient>> {
	global().instance()
}

/// Whether the process-wide client has been initialized.
pub fn is_ready() -> bool {
	global().is_ready()
}

/// Returns the process-wide slot to uninitialized.
///
/// The SDK never calls this itself; it exists for tests and for hosts that
/// manage their own shutdown.
pub fn reset() {
	global().reset()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{RemoteError, TransportError};
	use crate::testing::{FakeTransport, LIST_URL};

	fn config(tenant: &str, application: &str) -> Config {
		Config::new(tenant, application).unwrap()
	}

	fn serving(body: &'static str) -> SharedTransport {
		Arc::new(FakeTransport::default().with(LIST_URL, Ok(body)))
	}

	fn failing(status: u16) -> SharedTransport {
		Arc::new(FakeTransport::default().with(
			LIST_URL,
			Err(TransportError::Status {
				status,
				message: String::new(),
			}),
		))
	}

	#[test]
	fn test_new_slot_is_uninitialized() {
		let slot = ClientSlot::new();
		assert!(!slot.is_ready());
		assert!(matches!(slot.instance(), Err(IncognitusError::NotSupported)));
	}

	#[tokio::test]
	async fn test_initialize_makes_slot_ready() {
		let slot = ClientSlot::new();
		let client = slot
			.initialize_with_transport(config("abc", "def"), serving(r#"{"Features": []}"#))
			.await
			.unwrap();

		assert!(slot.is_ready());
		let first = slot.instance().unwrap();
		let second = slot.instance().unwrap();
		assert!(Arc::ptr_eq(&client, &first));
		assert!(Arc::ptr_eq(&first, &second));
	}

	#[tokio::test]
	async fn test_failed_initialize_stays_uninitialized() {
		let slot = ClientSlot::new();
		let err = slot
			.initialize_with_transport(config("abc", "def"), failing(500))
			.await
			.unwrap_err();

		assert!(matches!(
			err,
			IncognitusError::Initialization(RemoteError::Transport { .. })
		));
		assert!(!slot.is_ready());
		assert!(matches!(slot.instance(), Err(IncognitusError::NotSupported)));
	}

	#[tokio::test]
	async fn test_failed_reinitialize_keeps_previous_client() {
		let slot = ClientSlot::new();
		let original = slot
			.initialize_with_transport(
				config("abc", "def"),
				serving(r#"{"Features": [{"name": "foobar", "isEnabled": true}]}"#),
			)
			.await
			.unwrap();

		assert!(slot
			.initialize_with_transport(config("ghi", "jkl"), failing(503))
			.await
			.is_err());

		let current = slot.instance().unwrap();
		assert!(Arc::ptr_eq(&original, &current));
		assert_eq!(current.config().tenant_id(), "abc");
		assert!(current.has_cached_feature("foobar"));
	}

	#[tokio::test]
	async fn test_reinitialize_replaces_config_and_cache() {
		let slot = ClientSlot::new();
		let first = slot
			.initialize_with_transport(
				config("abc", "def"),
				serving(r#"{"Features": [{"name": "foobar", "isEnabled": true}]}"#),
			)
			.await
			.unwrap();

		let second = slot
			.initialize_with_transport(
				config("ghi", "jkl"),
				serving(r#"{"Features": [{"name": "fizzbuzz", "isEnabled": false}]}"#),
			)
			.await
			.unwrap();

		assert!(!Arc::ptr_eq(&first, &second));
		let current = slot.instance().unwrap();
		assert!(Arc::ptr_eq(&second, &current));
		assert_eq!(current.config().tenant_id(), "ghi");
		assert_eq!(current.config().application_id(), "jkl");
		assert!(current.has_cached_feature("fizzbuzz"));
		assert!(!current.has_cached_feature("foobar"));
		assert_eq!(current.cached_feature_count(), 1);

		// The old handle is untouched.
		assert!(first.has_cached_feature("foobar"));
	}

	#[tokio::test]
	async fn test_reset_returns_to_uninitialized() {
		let slot = ClientSlot::new();
		slot
			.initialize_with_transport(config("abc", "def"), serving(r#"{"Features": []}"#))
			.await
			.unwrap();

		slot.reset();
		assert!(!slot.is_ready());
		assert!(matches!(slot.instance(), Err(IncognitusError::NotSupported)));

		// Resetting twice is harmless.
		slot.reset();
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn test_concurrent_initializations_leave_one_consistent_client() {
		let slot = Arc::new(ClientSlot::new());

		let mut handles = Vec::new();
		for i in 0..8 {
			let slot = Arc::clone(&slot);
			handles.push(tokio::spawn(async move {
				let tenant = format!("tenant-{i}");
				let body: &'static str = if i % 2 == 0 {
					r#"{"Features": [{"name": "even", "isEnabled": true}]}"#
				} else {
					r#"{"Features": [{"name": "odd", "isEnabled": true}]}"#
				};
				slot
					.initialize_with_transport(config(&tenant, "app"), serving(body))
					.await
					.unwrap()
			}));
		}
		for handle in handles {
			handle.await.unwrap();
		}

		let current = slot.instance().unwrap();
		let index: usize = current
			.config()
			.tenant_id()
			.trim_start_matches("tenant-")
			.parse()
			.unwrap();
		let expected = if index % 2 == 0 { "even" } else { "odd" };
		assert!(current.has_cached_feature(expected));
		assert_eq!(current.cached_feature_count(), 1);
	}
}
