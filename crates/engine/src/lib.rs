// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Serialized in-memory key-value engine.
//!
//! All mutable state is owned by a single executor task. Callers submit
//! `(command, argument)` pairs through a bounded queue and await the
//! outcome on a one-shot reply slot, so no locks guard the store itself.
//! Entries may carry an expiry timer; elapsed timers re-enter the engine
//! through the same queue, which keeps deletions serialized with every
//! other mutation.

pub use command::Command;
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::Error;
pub use event::{Event, ExpiryObserver};

mod command;
mod config;
mod engine;
mod error;
mod event;
mod value;

pub type Result<T> = std::result::Result<T, Error>;
