// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Client transport for the stash line protocol.
//!
//! Commands go out as single CRLF-terminated lines; literal CR/LF inside
//! a command is escaped so multi-line payloads survive the framing, and
//! the same escapes are reversed on the reply.

pub use escape::{decode, encode};

mod escape;

use std::io;

use tokio::{
	io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
	net::{
		TcpStream,
		tcp::{OwnedReadHalf, OwnedWriteHalf},
	},
};

/// Errors surfaced by the client transport.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	#[error(transparent)]
	Io(#[from] io::Error),
	#[error("connection closed")]
	ConnectionClosed,
	#[error("malformed response line: {0:?}")]
	InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// A client connection to a stash server.
pub struct Client {
	reader: BufReader<OwnedReadHalf>,
	writer: OwnedWriteHalf,
}

impl Client {
	/// Connects to the given address.
	pub async fn connect(addr: &str) -> Result<Self> {
		let stream = TcpStream::connect(addr).await?;
		let (reader, writer) = stream.into_split();
		Ok(Self {
			reader: BufReader::new(reader),
			writer,
		})
	}

	/// Sends one command line and waits for the reply, returning the
	/// response code and the unescaped reply text.
	pub async fn cmd(&mut self, line: &str) -> Result<(u16, String)> {
		let mut request = encode(line).into_bytes();
		request.extend_from_slice(b"\r\n");
		self.writer.write_all(&request).await?;
		self.writer.flush().await?;

		let mut response = Vec::new();
		if self.reader.read_until(b'\n', &mut response).await? == 0 {
			return Err(ClientError::ConnectionClosed);
		}
		let response = strip_crlf(&response);
		let response = String::from_utf8_lossy(response);

		let Some((code, reply)) = response.split_once(' ') else {
			return Err(ClientError::InvalidResponse(response.to_string()));
		};
		let Ok(code) = code.parse::<u16>() else {
			return Err(ClientError::InvalidResponse(response.to_string()));
		};
		Ok((code, decode(reply)))
	}

	/// Closes the connection.
	pub async fn close(mut self) -> Result<()> {
		self.writer.shutdown().await?;
		Ok(())
	}
}

/// Strips the trailing line terminator, and nothing else; replies may
/// legitimately be empty.
fn strip_crlf(line: &[u8]) -> &[u8] {
	let line = line.strip_suffix(b"\n").unwrap_or(line);
	line.strip_suffix(b"\r").unwrap_or(line)
}
