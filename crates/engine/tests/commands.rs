// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Command semantics across the three value variants.

use stash_engine::{Command, Engine, EngineConfig, Error};

async fn create_engine() -> Engine {
	let engine = Engine::new(EngineConfig::new());
	engine.started().await;
	engine
}

/// Runs `(command, argument, expected)` rows against one engine.
async fn run_table(engine: &Engine, table: &[(Command, &str, Result<&str, Error>)]) {
	for (i, (cmd, arg, expected)) in table.iter().enumerate() {
		let outcome = engine.exec(*cmd, arg.as_bytes()).await;
		let expected = expected.clone().map(|reply| reply.as_bytes().to_vec());
		assert_eq!(outcome, expected, "[{i}] '{cmd} {arg}'");
	}
}

#[tokio::test]
async fn test_nop() {
	let engine = create_engine().await;
	run_table(
		&engine,
		&[(Command::Nop, "", Ok("Ok")), (Command::Nop, "arg1,arg2, arg3", Ok("Ok"))],
	)
	.await;
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_not_found() {
	let engine = create_engine().await;
	engine.exec(Command::Set, b"str,value").await.unwrap();
	engine.exec(Command::Push, b"list,1").await.unwrap();

	run_table(
		&engine,
		&[
			(Command::Get, "name", Err(Error::NotFound)),
			(Command::Get, "name,key", Err(Error::NotFound)),
			(Command::Pop, "name", Err(Error::NotFound)),
			(Command::Remove, "name", Err(Error::NotFound)),
			(Command::Remove, "name,key", Err(Error::NotFound)),
			(Command::Ttl, "name,12345", Err(Error::NotFound)),
			(Command::Keys, "name", Err(Error::NotFound)),
			// Existing names that are not dictionaries have no key
			// listing either.
			(Command::Keys, "str", Err(Error::NotFound)),
			(Command::Keys, "list", Err(Error::NotFound)),
		],
	)
	.await;
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_invalid_format() {
	let engine = create_engine().await;
	run_table(
		&engine,
		&[
			(Command::Get, "", Err(Error::InvalidFormat)),
			(Command::Get, "1,2,3", Err(Error::InvalidFormat)),
			(Command::Set, "", Err(Error::InvalidFormat)),
			(Command::Set, "1", Err(Error::InvalidFormat)),
			(Command::Set, "1,2,3,4", Err(Error::InvalidFormat)),
			(Command::Push, "", Err(Error::InvalidFormat)),
			(Command::Push, "1", Err(Error::InvalidFormat)),
			(Command::Push, "1,2,3", Err(Error::InvalidFormat)),
			(Command::Pop, "", Err(Error::InvalidFormat)),
			(Command::Pop, "1,2", Err(Error::InvalidFormat)),
			(Command::Remove, "", Err(Error::InvalidFormat)),
			(Command::Remove, "a,b,c", Err(Error::InvalidFormat)),
			(Command::Ttl, "", Err(Error::InvalidFormat)),
			(Command::Ttl, "a", Err(Error::InvalidFormat)),
			(Command::Ttl, "a,b,c", Err(Error::InvalidFormat)),
			(Command::Keys, "x,y", Err(Error::InvalidFormat)),
		],
	)
	.await;
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_invalid_type() {
	let engine = create_engine().await;
	engine.exec(Command::Set, b"str, value").await.unwrap();
	engine.exec(Command::Set, b"dict,key,value").await.unwrap();

	run_table(
		&engine,
		&[
			(Command::Get, "str,key", Err(Error::InvalidType)),
			(Command::Set, "str,key,value", Err(Error::InvalidType)),
			(Command::Set, "dict,key", Err(Error::InvalidType)),
			(Command::Push, "dict,value", Err(Error::InvalidType)),
			(Command::Pop, "dict", Err(Error::InvalidType)),
			(Command::Push, "str,value", Err(Error::InvalidType)),
			(Command::Pop, "str", Err(Error::InvalidType)),
		],
	)
	.await;
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_invalid_index() {
	let engine = create_engine().await;
	engine.exec(Command::Push, b"list,value").await.unwrap();

	run_table(
		&engine,
		&[
			(Command::Get, "list,1", Err(Error::InvalidIndex)),
			(Command::Set, "list,1,new-value", Err(Error::InvalidIndex)),
		],
	)
	.await;
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_numeric_parse_errors() {
	let engine = create_engine().await;
	engine.exec(Command::Push, b"list,value").await.unwrap();
	engine.exec(Command::Set, b"str,value").await.unwrap();

	// Non-numeric indices and timeouts surface the parse failure
	// itself, not InvalidIndex.
	for (cmd, arg) in [
		(Command::Get, &b"list,xxx"[..]),
		(Command::Set, b"list,xxx"),
		(Command::Set, b"list,xxx,new-value"),
		(Command::Ttl, b"list,new-value"),
		(Command::Ttl, b"str,12ms"),
	] {
		match engine.exec(cmd, arg).await {
			Err(Error::Parse(_)) => {}
			outcome => panic!("'{cmd} {}' returned {outcome:?}", String::from_utf8_lossy(arg)),
		}
	}
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_scalar_commands() {
	let engine = create_engine().await;
	run_table(
		&engine,
		&[
			(Command::Set, "str,1", Ok("Ok")),
			(Command::Get, "str", Ok("1")),
			(Command::Set, "str,2", Ok("Ok")),
			(Command::Get, "str", Ok("2")),
			// Replacement is not bounded by the previous length.
			(Command::Set, "str,a much longer value", Ok("Ok")),
			(Command::Get, "str", Ok("a much longer value")),
			(Command::Remove, "str", Ok("Ok")),
			(Command::Get, "str", Err(Error::NotFound)),
			// Escaped commas stay literal in names and values.
			(Command::Set, r"str a\,bc,\,cde\,", Ok("Ok")),
			(Command::Get, r"str a\,bc", Ok(r"\,cde\,")),
		],
	)
	.await;
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_list_commands() {
	let engine = create_engine().await;
	run_table(
		&engine,
		&[
			(Command::Push, "list,1", Ok("Ok")),
			(Command::Push, "list,2", Ok("Ok")),
			(Command::Get, "list,0", Ok("1")),
			(Command::Get, "list,1", Ok("2")),
			(Command::Set, "list,0,0", Ok("Ok")),
			(Command::Set, "list,1,1", Ok("Ok")),
			(Command::Get, "list,0", Ok("0")),
			(Command::Get, "list,1", Ok("1")),
			// Two-argument set resizes: truncate, then zero-extend.
			(Command::Set, "list,1", Ok("Ok")),
			(Command::Get, "list", Ok("1")),
			(Command::Set, "list,2", Ok("Ok")),
			(Command::Get, "list", Ok("2")),
			(Command::Get, "list,1", Ok("")),
			(Command::Set, "list,1,1", Ok("Ok")),
			(Command::Get, "list", Ok("2")),
			(Command::Pop, "list", Ok("1")),
			(Command::Get, "list", Ok("1")),
			// Popping the last element deletes the whole entry.
			(Command::Pop, "list", Ok("0")),
			(Command::Get, "list", Err(Error::NotFound)),
		],
	)
	.await;
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_dict_commands() {
	let engine = create_engine().await;
	run_table(
		&engine,
		&[
			(Command::Set, "dict,key1,value1", Ok("Ok")),
			(Command::Get, "dict", Ok("1")),
			(Command::Keys, "dict", Ok("key1")),
			(Command::Set, "dict,key2,value2", Ok("Ok")),
			(Command::Get, "dict", Ok("2")),
			(Command::Get, "dict,key1", Ok("value1")),
			(Command::Get, "dict,key2", Ok("value2")),
			(Command::Set, "dict,key1,nvalue1", Ok("Ok")),
			(Command::Set, "dict,key2,nvalue2", Ok("Ok")),
			(Command::Get, "dict,key1", Ok("nvalue1")),
			(Command::Get, "dict,key2", Ok("nvalue2")),
			(Command::Remove, "dict,key2", Ok("Ok")),
			(Command::Keys, "dict", Ok("key1")),
			(Command::Get, "dict,key1", Ok("nvalue1")),
			(Command::Get, "dict,key2", Err(Error::KeyNotFound)),
			(Command::Set, "dict,key2,nvalue2", Ok("Ok")),
		],
	)
	.await;

	// Listing order is unspecified; sort before comparing.
	let listed = engine.exec(Command::Keys, b"dict").await.unwrap();
	let mut keys: Vec<&str> =
		std::str::from_utf8(&listed).unwrap().split(',').collect();
	keys.sort_unstable();
	assert_eq!(keys.join(","), "key1,key2");

	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_emptied_dict_is_retained() {
	// Unlike lists, a dictionary whose last key is removed stays in
	// the store with cardinality zero.
	let engine = create_engine().await;
	run_table(
		&engine,
		&[
			(Command::Set, "dict,key,value", Ok("Ok")),
			(Command::Remove, "dict,key", Ok("Ok")),
			(Command::Get, "dict", Ok("0")),
			(Command::Keys, "dict", Ok("")),
		],
	)
	.await;
	engine.close().await.unwrap();
}

#[tokio::test]
async fn test_keys_listing() {
	let engine = create_engine().await;
	engine.exec(Command::Set, b"str, value").await.unwrap();
	engine.exec(Command::Push, b"list, value").await.unwrap();
	engine.exec(Command::Set, b"dict, name, value").await.unwrap();

	let listed = engine.exec(Command::Keys, b"").await.unwrap();
	let mut names: Vec<&str> =
		std::str::from_utf8(&listed).unwrap().split(',').collect();
	names.sort_unstable();
	assert_eq!(names.join(","), "dict,list,str");

	engine.close().await.unwrap();
}
