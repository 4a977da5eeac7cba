// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Line-oriented TCP protocol server.
//!
//! Accepts connections, reads one request per CRLF-terminated line,
//! passes `(command, argument)` to a user-supplied handler and writes a
//! single `<code> <reply>` response line. The server knows nothing about
//! commands; it only frames bytes.

pub use config::ServerConfig;
pub use server::{DEFAULT_ADDR, OPERATION_ERROR, OPERATION_OK, listen_and_serve};

mod config;
mod connection;
mod server;
