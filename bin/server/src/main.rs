// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `stashd`, the stash server daemon.
//!
//! Constructs an engine, wires SIGINT to a graceful listener shutdown
//! and serves the line protocol on the configured address.

use std::sync::Arc;

use clap::Parser;
use stash_engine::{Command, Engine, EngineConfig};
use stash_server::{DEFAULT_ADDR, ServerConfig, listen_and_serve};
use tokio::{signal, sync::oneshot};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stashd")]
#[command(about = "In-memory key-value store served over a line-oriented TCP protocol", long_about = None)]
#[command(version)]
struct Config {
	/// Listen address
	#[arg(short, long, env = "STASHD_ADDR", default_value = DEFAULT_ADDR)]
	addr: String,

	/// Capacity of the engine's inbound task queue
	#[arg(short, long, env = "STASHD_QUEUE_CAPACITY", default_value = "10")]
	queue_capacity: usize,
}

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let config = Config::parse();

	let engine = Arc::new(Engine::new(
		EngineConfig::new().with_queue_capacity(config.queue_capacity),
	));
	engine.started().await;

	let (stop_tx, stop_rx) = oneshot::channel();
	tokio::spawn(async move {
		if signal::ctrl_c().await.is_ok() {
			info!("interrupt received, stopping");
			let _ = stop_tx.send(());
		}
	});

	let handler = {
		let engine = Arc::clone(&engine);
		move |cmd: Vec<u8>, arg: Vec<u8>| {
			let engine = Arc::clone(&engine);
			async move {
				let cmd = Command::parse(&cmd)?;
				engine.exec(cmd, &arg).await
			}
		}
	};

	let server_config = ServerConfig {
		stop: Some(stop_rx),
		..Default::default()
	};
	match listen_and_serve(&config.addr, handler, server_config).await {
		Ok(()) => info!("finished"),
		Err(err) => error!(%err, "server failed"),
	}

	let _ = engine.close().await;
}
