// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `stash`, the interactive REPL for the stash server.
//!
//! Reads commands from standard input, sends them over the wire and
//! prints the replies. Exits on EOF or a connection error.

use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use stash_client::Client;
use stash_server::OPERATION_OK;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "stash")]
#[command(about = "Interactive client for the stash key-value server", long_about = None)]
#[command(version)]
struct Config {
	/// Server host
	#[arg(short = 'H', long, env = "STASH_HOST", default_value = "127.0.0.1")]
	host: String,

	/// Server port
	#[arg(short, long, env = "STASH_PORT", default_value = "7777")]
	port: u16,
}

#[tokio::main]
async fn main() {
	if let Err(err) = run().await {
		eprintln!("{err}");
		std::process::exit(1);
	}
}

async fn run() -> Result<()> {
	let config = Config::parse();
	let mut client = Client::connect(&format!("{}:{}", config.host, config.port)).await?;

	println!("Connected...");
	println!("Use 'help' command for help");

	let mut editor = DefaultEditor::new()?;
	loop {
		match editor.readline("> ") {
			Ok(line) => {
				let line = line.trim();
				if line.is_empty() {
					continue;
				}
				let _ = editor.add_history_entry(line);

				if line == "help" {
					help();
					continue;
				}

				match client.cmd(line).await {
					Ok((code, reply)) if code == OPERATION_OK => println!("{reply}"),
					Ok((code, reply)) => println!("{code} {reply}"),
					Err(err) => {
						eprintln!("{err}");
						break;
					}
				}
			}
			Err(ReadlineError::Interrupted) => continue,
			Err(ReadlineError::Eof) => break,
			Err(err) => return Err(err.into()),
		}
	}

	let _ = client.close().await;
	Ok(())
}

/// Prints short help on commands.
fn help() {
	println!("  set name, [key,] value");
	println!("  get name [,key]");
	println!("  push name, value");
	println!("  pop name");
	println!("  keys [name]");
	println!("  ttl name, milliseconds");
	println!("  remove name [,key]");
	println!("  nop");
	println!("  quit");
	println!("  help");
}
