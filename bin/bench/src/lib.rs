// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared setup for the stash benchmarks.

use std::sync::Arc;

use stash_engine::{Engine, EngineConfig};
use tokio::runtime::Runtime;

/// Builds a runtime with a started engine on it.
pub fn create_engine() -> (Runtime, Arc<Engine>) {
	let runtime = Runtime::new().unwrap();
	let engine = runtime.block_on(async {
		let engine = Arc::new(Engine::new(EngineConfig::new()));
		engine.started().await;
		engine
	});
	(runtime, engine)
}
