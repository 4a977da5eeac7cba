// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt::Display, future::Future, io, net::SocketAddr, time::Instant};

use tokio::{
	io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
	net::{TcpStream, tcp::OwnedWriteHalf},
};
use tracing::debug;

use crate::{OPERATION_ERROR, OPERATION_OK};

/// Serves one client connection until EOF, `quit`, or an I/O failure.
///
/// Everything stays byte-oriented: request lines and replies are
/// arbitrary bytes, only the trailing CRLF is framing.
pub(crate) async fn serve<H, F, E>(stream: TcpStream, peer: SocketAddr, handler: H)
where
	H: Fn(Vec<u8>, Vec<u8>) -> F,
	F: Future<Output = Result<Vec<u8>, E>> + Send + 'static,
	E: Display + Send + 'static,
{
	let (reader, mut writer) = stream.into_split();
	let mut reader = BufReader::new(reader);
	let mut line = Vec::new();

	loop {
		line.clear();
		match reader.read_until(b'\n', &mut line).await {
			Ok(0) => {
				debug!(%peer, "connection closed");
				return;
			}
			Ok(_) => {}
			Err(err) => {
				debug!(%peer, %err, "read failed");
				return;
			}
		}

		let (cmd, arg) = parse_request(&line);
		if cmd == b"quit" {
			debug!(%peer, "quit, connection closed");
			return;
		}

		let start = Instant::now();
		let outcome = handler(cmd.to_vec(), arg.to_vec()).await;
		let elapsed = start.elapsed();

		let (code, reply) = match outcome {
			Ok(reply) => {
				debug!(%peer, ?elapsed, "request served");
				(OPERATION_OK, reply)
			}
			Err(err) => {
				debug!(%peer, ?elapsed, %err, "request failed");
				(OPERATION_ERROR, err.to_string().into_bytes())
			}
		};

		if let Err(err) = send(&mut writer, code, &reply).await {
			debug!(%peer, %err, "write failed");
			return;
		}
	}
}

async fn send(writer: &mut OwnedWriteHalf, code: u16, reply: &[u8]) -> io::Result<()> {
	let mut response = Vec::with_capacity(reply.len() + 8);
	response.extend_from_slice(code.to_string().as_bytes());
	response.push(b' ');
	response.extend_from_slice(reply);
	response.extend_from_slice(b"\r\n");
	writer.write_all(&response).await?;
	writer.flush().await
}

/// Splits a request line into command name and optional argument on the
/// first space. The argument itself is not split further; the handler
/// owns its grammar.
fn parse_request(line: &[u8]) -> (&[u8], &[u8]) {
	let line = line.trim_ascii();
	match line.iter().position(|&byte| byte == b' ') {
		Some(space) => (&line[..space], line[space + 1..].trim_ascii()),
		None => (line, &[]),
	}
}
