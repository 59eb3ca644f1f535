// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the Incognitus SDK.
//!
//! This crate provides:
//! - A pre-configured HTTP client with a consistent User-Agent header
//! - Retry logic with exponential backoff for transient failures

mod client;
mod retry;

pub use client::{builder, builder_with_user_agent, user_agent};
pub use retry::{retry, RetryConfig, RetryableError, DEFAULT_RETRYABLE_STATUSES};
