// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt::Display, future::Future, io};

use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::{ServerConfig, connection};

/// Listen address used when none is configured.
pub const DEFAULT_ADDR: &str = "0.0.0.0:7777";

/// Response code for replies from a successful handler call.
pub const OPERATION_OK: u16 = 200;
/// Response code for replies from a failed handler call.
pub const OPERATION_ERROR: u16 = 300;

/// Announces `addr` (the default address when empty) and accepts
/// incoming connections until the configured stop signal fires.
///
/// Every request line is split into `(command, argument)` and passed to
/// `handler`; the reply is framed back to the client with
/// [`OPERATION_OK`], a handler error with [`OPERATION_ERROR`] and the
/// error's display text. Each connection is served by its own task.
pub async fn listen_and_serve<H, F, E>(
	addr: &str,
	handler: H,
	config: ServerConfig,
) -> io::Result<()>
where
	H: Fn(Vec<u8>, Vec<u8>) -> F + Clone + Send + Sync + 'static,
	F: Future<Output = Result<Vec<u8>, E>> + Send + 'static,
	E: Display + Send + 'static,
{
	let addr = if addr.is_empty() {
		DEFAULT_ADDR
	} else {
		addr
	};

	let listener = TcpListener::bind(addr).await?;
	let local_addr = listener.local_addr()?;
	info!(addr = %local_addr, "listening");

	if let Some(ready) = config.ready {
		let _ = ready.send(local_addr);
	}

	let stop = async move {
		match config.stop {
			Some(stop) => {
				// A dropped sender counts as a stop signal too.
				let _ = stop.await;
			}
			None => std::future::pending().await,
		}
	};
	tokio::pin!(stop);

	loop {
		tokio::select! {
			_ = &mut stop => {
				info!("received stop signal");
				return Ok(());
			}
			accepted = listener.accept() => {
				let (stream, peer) = accepted?;
				debug!(%peer, "connected");
				tokio::spawn(connection::serve(stream, peer, handler.clone()));
			}
		}
	}
}
