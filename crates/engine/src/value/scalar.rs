// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::ok;
use crate::{Error, Result};

/// A plain byte-string payload.
pub(crate) struct Scalar {
	payload: Vec<u8>,
}

impl Scalar {
	pub(crate) fn new(payload: &[u8]) -> Self {
		Self {
			payload: payload.to_vec(),
		}
	}

	pub(crate) fn get(&self) -> Result<Vec<u8>> {
		Ok(self.payload.clone())
	}

	pub(crate) fn set(&mut self, new: &[u8]) -> Result<Vec<u8>> {
		// Replaces the payload entirely, whatever its previous length.
		self.payload = new.to_vec();
		ok()
	}

	pub(crate) fn get_key(&self, _key: &[u8]) -> Result<Vec<u8>> {
		Err(Error::InvalidType)
	}

	pub(crate) fn set_key(&mut self, _key: &[u8], _new: Option<&[u8]>) -> Result<Vec<u8>> {
		Err(Error::InvalidType)
	}

	pub(crate) fn push(&mut self, _new: &[u8]) -> Result<Vec<u8>> {
		Err(Error::InvalidType)
	}

	pub(crate) fn pop(&mut self) -> Result<Vec<u8>> {
		Err(Error::InvalidType)
	}

	/// A scalar never reports empty; it exists until removed.
	pub(crate) fn is_empty(&self) -> bool {
		false
	}

	pub(crate) fn keys(&self) -> Result<Vec<u8>> {
		Err(Error::NotFound)
	}
}
