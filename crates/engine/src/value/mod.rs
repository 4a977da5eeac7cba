// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub(crate) use dict::Dict;
pub(crate) use list::List;
pub(crate) use scalar::Scalar;

mod dict;
mod list;
mod scalar;

use crate::Result;

/// Reply payload reserved for successful mutating operations.
pub(crate) const OK: &[u8] = b"Ok";

pub(crate) fn ok() -> Result<Vec<u8>> {
	Ok(OK.to_vec())
}

/// Parses an unsigned decimal argument (index, resize count, ttl).
///
/// Non-numeric input surfaces the parse failure itself, which callers
/// must not collapse into `InvalidIndex`.
pub(crate) fn parse_unsigned(field: &[u8]) -> Result<u64> {
	Ok(String::from_utf8_lossy(field).parse::<u64>()?)
}

/// A stored value.
///
/// Every variant answers the full operation vocabulary; an operation a
/// variant cannot support returns `Error::InvalidType`. The executor
/// dispatches through these methods only and never inspects the variant
/// tag itself.
pub(crate) enum Value {
	Scalar(Scalar),
	List(List),
	Dict(Dict),
}

impl Value {
	pub(crate) fn scalar(payload: &[u8]) -> Self {
		Value::Scalar(Scalar::new(payload))
	}

	pub(crate) fn list(first: &[u8]) -> Self {
		Value::List(List::new(first))
	}

	pub(crate) fn dict(key: &[u8], value: &[u8]) -> Self {
		Value::Dict(Dict::new(key, value))
	}

	pub(crate) fn get(&self) -> Result<Vec<u8>> {
		match self {
			Value::Scalar(value) => value.get(),
			Value::List(value) => value.get(),
			Value::Dict(value) => value.get(),
		}
	}

	pub(crate) fn set(&mut self, new: &[u8]) -> Result<Vec<u8>> {
		match self {
			Value::Scalar(value) => value.set(new),
			Value::List(value) => value.set(new),
			Value::Dict(value) => value.set(new),
		}
	}

	pub(crate) fn get_key(&self, key: &[u8]) -> Result<Vec<u8>> {
		match self {
			Value::Scalar(value) => value.get_key(key),
			Value::List(value) => value.get_key(key),
			Value::Dict(value) => value.get_key(key),
		}
	}

	/// Assigns under `key`; `None` removes the key where the variant
	/// supports removal.
	pub(crate) fn set_key(&mut self, key: &[u8], new: Option<&[u8]>) -> Result<Vec<u8>> {
		match self {
			Value::Scalar(value) => value.set_key(key, new),
			Value::List(value) => value.set_key(key, new),
			Value::Dict(value) => value.set_key(key, new),
		}
	}

	pub(crate) fn push(&mut self, new: &[u8]) -> Result<Vec<u8>> {
		match self {
			Value::Scalar(value) => value.push(new),
			Value::List(value) => value.push(new),
			Value::Dict(value) => value.push(new),
		}
	}

	pub(crate) fn pop(&mut self) -> Result<Vec<u8>> {
		match self {
			Value::Scalar(value) => value.pop(),
			Value::List(value) => value.pop(),
			Value::Dict(value) => value.pop(),
		}
	}

	/// Advisory emptiness used by the executor to auto-delete a list
	/// after `pop`.
	pub(crate) fn is_empty(&self) -> bool {
		match self {
			Value::Scalar(value) => value.is_empty(),
			Value::List(value) => value.is_empty(),
			Value::Dict(value) => value.is_empty(),
		}
	}

	/// Comma-joined key listing; only dictionaries have one.
	pub(crate) fn keys(&self) -> Result<Vec<u8>> {
		match self {
			Value::Scalar(value) => value.keys(),
			Value::List(value) => value.keys(),
			Value::Dict(value) => value.keys(),
		}
	}
}

/// Joins byte-string items with commas, in iteration order.
pub(crate) fn join_names<'a>(names: impl Iterator<Item = &'a Vec<u8>>) -> Vec<u8> {
	let mut joined = Vec::new();
	for (i, name) in names.enumerate() {
		if i > 0 {
			joined.push(b',');
		}
		joined.extend_from_slice(name);
	}
	joined
}
