// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::num::ParseIntError;

/// Stable error identities surfaced by the engine.
///
/// Callers match on the variant, never on the message text. Numeric
/// arguments that fail to parse carry the underlying [`ParseIntError`]
/// unchanged, so index bounds violations (`InvalidIndex`) stay
/// distinguishable from malformed numbers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("invalid command name")]
	InvalidCommand,
	#[error("engine already closed")]
	AlreadyClosed,
	#[error("engine not started")]
	NotStarted,
	#[error("invalid command format")]
	InvalidFormat,
	#[error("not found")]
	NotFound,
	#[error("key not found")]
	KeyNotFound,
	#[error("invalid index")]
	InvalidIndex,
	#[error("invalid type")]
	InvalidType,
	#[error(transparent)]
	Parse(#[from] ParseIntError),
}
