// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{ok, parse_unsigned};
use crate::{Error, Result};

/// An ordered sequence of byte strings, indexable by position.
pub(crate) struct List {
	items: Vec<Vec<u8>>,
}

impl List {
	pub(crate) fn new(first: &[u8]) -> Self {
		Self {
			items: vec![first.to_vec()],
		}
	}

	/// Length as decimal text.
	pub(crate) fn get(&self) -> Result<Vec<u8>> {
		Ok(self.items.len().to_string().into_bytes())
	}

	/// Resizes to the given decimal count: truncates, or extends with
	/// empty byte strings.
	pub(crate) fn set(&mut self, new: &[u8]) -> Result<Vec<u8>> {
		let count = parse_unsigned(new)?;
		let count = usize::try_from(count).map_err(|_| Error::InvalidIndex)?;
		self.items.resize(count, Vec::new());
		ok()
	}

	pub(crate) fn get_key(&self, key: &[u8]) -> Result<Vec<u8>> {
		match self.items.get(self.index(key)?) {
			Some(item) => Ok(item.clone()),
			None => Err(Error::InvalidIndex),
		}
	}

	pub(crate) fn set_key(&mut self, key: &[u8], new: Option<&[u8]>) -> Result<Vec<u8>> {
		let index = self.index(key)?;
		match self.items.get_mut(index) {
			Some(item) => {
				*item = new.unwrap_or_default().to_vec();
				ok()
			}
			None => Err(Error::InvalidIndex),
		}
	}

	pub(crate) fn push(&mut self, new: &[u8]) -> Result<Vec<u8>> {
		self.items.push(new.to_vec());
		ok()
	}

	/// Removes and returns the last element. An empty list is
	/// unreachable here: the executor deletes a list the moment `pop`
	/// empties it.
	pub(crate) fn pop(&mut self) -> Result<Vec<u8>> {
		self.items.pop().ok_or(Error::InvalidIndex)
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub(crate) fn keys(&self) -> Result<Vec<u8>> {
		Err(Error::NotFound)
	}

	fn index(&self, key: &[u8]) -> Result<usize> {
		let index = parse_unsigned(key)?;
		usize::try_from(index).map_err(|_| Error::InvalidIndex)
	}
}
