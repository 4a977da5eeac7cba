// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::event::ExpiryObserver;

/// Engine construction parameters.
#[derive(Clone)]
pub struct EngineConfig {
	/// Capacity of the bounded inbound task queue. Submissions block
	/// while the queue is full. Zero is treated as one.
	pub queue_capacity: usize,
	/// Observer notified after expiry-triggered removals.
	pub observer: Option<ExpiryObserver>,
}

impl EngineConfig {
	pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

	pub fn new() -> Self {
		Self {
			queue_capacity: Self::DEFAULT_QUEUE_CAPACITY,
			observer: None,
		}
	}

	pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
		self.queue_capacity = capacity;
		self
	}

	pub fn with_observer(mut self, observer: ExpiryObserver) -> Self {
		self.observer = Some(observer);
		self
	}
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self::new()
	}
}
