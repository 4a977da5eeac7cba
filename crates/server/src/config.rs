// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::net::SocketAddr;

use tokio::sync::oneshot;

/// Optional server parameters.
#[derive(Default)]
pub struct ServerConfig {
	/// Closes the listener when signalled. Connections already
	/// accepted keep running until their client disconnects.
	pub stop: Option<oneshot::Receiver<()>>,
	/// Receives the bound local address once the listener is up;
	/// useful when binding port 0.
	pub ready: Option<oneshot::Sender<SocketAddr>>,
}
