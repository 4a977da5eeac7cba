// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use crate::Error;

/// Commands understood by the engine executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
	Nop,
	Get,
	Set,
	Push,
	Pop,
	Remove,
	Ttl,
	Keys,
}

impl Command {
	/// Resolves a command name, as received from the wire, to its
	/// [`Command`].
	pub fn parse(name: &[u8]) -> crate::Result<Self> {
		match name {
			b"nop" => Ok(Command::Nop),
			b"get" => Ok(Command::Get),
			b"set" => Ok(Command::Set),
			b"push" => Ok(Command::Push),
			b"pop" => Ok(Command::Pop),
			b"remove" => Ok(Command::Remove),
			b"ttl" => Ok(Command::Ttl),
			b"keys" => Ok(Command::Keys),
			_ => Err(Error::InvalidCommand),
		}
	}
}

impl Display for Command {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Command::Nop => f.write_str("nop"),
			Command::Get => f.write_str("get"),
			Command::Set => f.write_str("set"),
			Command::Push => f.write_str("push"),
			Command::Pop => f.write_str("pop"),
			Command::Remove => f.write_str("remove"),
			Command::Ttl => f.write_str("ttl"),
			Command::Keys => f.write_str("keys"),
		}
	}
}
