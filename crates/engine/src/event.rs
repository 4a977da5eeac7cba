// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

/// Events delivered to the configured [`ExpiryObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
	/// An entry was removed because its expiry timer elapsed.
	Expired,
}

/// Callback invoked with `(Event::Expired, name)` after an
/// expiry-triggered removal has committed.
///
/// The observer runs on the timer task that completed the removal, never
/// on the executor, and fires exactly once per expired entry. It must not
/// fail; containment of a panicking observer is the caller's
/// responsibility.
pub type ExpiryObserver = Arc<dyn Fn(Event, &[u8]) + Send + Sync>;
