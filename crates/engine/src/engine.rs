// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	sync::atomic::{AtomicBool, Ordering},
	time::Duration,
};

use parking_lot::Mutex;
use tokio::{
	sync::{mpsc, oneshot, watch},
	task::JoinHandle,
	time::sleep,
};
use tracing::{debug, trace};

use crate::{
	Command, EngineConfig, Error, Result,
	event::{Event, ExpiryObserver},
	value::{Value, join_names, ok, parse_unsigned},
};

/// A task travelling through the inbound queue.
enum Task {
	/// A submitted command with its one-shot reply slot.
	Command {
		cmd: Command,
		arg: Vec<u8>,
		reply: oneshot::Sender<Result<Vec<u8>>>,
	},
	/// Self-enqueued removal from an elapsed expiry timer. The executor
	/// confirms whether the removal committed; a stale generation (the
	/// timer was rearmed or its entry already gone) commits nothing.
	Expired {
		name: Vec<u8>,
		generation: u64,
		confirm: oneshot::Sender<bool>,
	},
}

/// Serialized command engine owning the name→value and name→timer maps.
///
/// Construction spawns the executor task and returns immediately; the
/// engine accepts submissions once the executor has signalled readiness
/// (see [`Engine::started`]). Submissions after [`Engine::close`] return
/// [`Error::AlreadyClosed`], submissions before the executor runs return
/// [`Error::NotStarted`].
///
/// Must be constructed inside a tokio runtime.
pub struct Engine {
	queue: Mutex<Option<mpsc::Sender<Task>>>,
	executor: Mutex<Option<JoinHandle<()>>>,
	started: watch::Receiver<bool>,
	closing: AtomicBool,
}

impl Engine {
	pub fn new(config: EngineConfig) -> Self {
		let (queue, inbound) = mpsc::channel(config.queue_capacity.max(1));
		let (started_tx, started) = watch::channel(false);

		let executor = Executor {
			inbound,
			feedback: queue.downgrade(),
			observer: config.observer,
			started: started_tx,
			entries: HashMap::new(),
			timers: HashMap::new(),
			generation: 0,
		};
		let executor = tokio::spawn(executor.run());

		Self {
			queue: Mutex::new(Some(queue)),
			executor: Mutex::new(Some(executor)),
			started,
			closing: AtomicBool::new(false),
		}
	}

	/// Completes once the executor is accepting tasks.
	pub async fn started(&self) {
		let mut started = self.started.clone();
		let _ = started.wait_for(|running| *running).await;
	}

	/// Whether the executor is currently running.
	pub fn is_started(&self) -> bool {
		*self.started.borrow()
	}

	/// Submits a command and waits for its outcome.
	///
	/// Blocks while the inbound queue is full. Tasks are executed in
	/// arrival order; all effects happen on the executor.
	pub async fn exec(&self, cmd: Command, arg: &[u8]) -> Result<Vec<u8>> {
		if self.closing.load(Ordering::Acquire) {
			return Err(Error::AlreadyClosed);
		}
		if !self.is_started() {
			return Err(Error::NotStarted);
		}
		let queue = self.queue.lock().clone().ok_or(Error::AlreadyClosed)?;

		let (reply, outcome) = oneshot::channel();
		queue.send(Task::Command {
			cmd,
			arg: arg.to_vec(),
			reply,
		})
		.await
		.map_err(|_| Error::AlreadyClosed)?;

		outcome.await.map_err(|_| Error::AlreadyClosed)?
	}

	/// Closes the queue and waits for the executor to drain.
	///
	/// The executor stops every outstanding expiry timer before it
	/// exits. A second close returns [`Error::AlreadyClosed`].
	pub async fn close(&self) -> Result<()> {
		self.closing.store(true, Ordering::Release);

		let queue = self.queue.lock().take();
		if queue.is_none() {
			return Err(Error::AlreadyClosed);
		}
		drop(queue);

		let executor = self.executor.lock().take();
		if let Some(executor) = executor {
			let _ = executor.await;
		}
		Ok(())
	}
}

/// Sole owner and mutator of the engine state.
struct Executor {
	inbound: mpsc::Receiver<Task>,
	/// Handle expiry timers use to re-enter the queue. Weak, so an
	/// outstanding timer never keeps a closed engine alive.
	feedback: mpsc::WeakSender<Task>,
	observer: Option<ExpiryObserver>,
	started: watch::Sender<bool>,
	entries: HashMap<Vec<u8>, Value>,
	timers: HashMap<Vec<u8>, ExpiryTimer>,
	generation: u64,
}

struct ExpiryTimer {
	generation: u64,
	task: JoinHandle<()>,
}

impl Executor {
	async fn run(mut self) {
		let _ = self.started.send(true);

		while let Some(task) = self.inbound.recv().await {
			match task {
				Task::Command {
					cmd,
					arg,
					reply,
				} => {
					let _ = reply.send(self.dispatch(cmd, &arg));
				}
				Task::Expired {
					name,
					generation,
					confirm,
				} => {
					let _ = confirm.send(self.expire(&name, generation));
				}
			}
		}

		for (_, timer) in self.timers.drain() {
			timer.task.abort();
		}
		let _ = self.started.send(false);
	}

	fn dispatch(&mut self, cmd: Command, arg: &[u8]) -> Result<Vec<u8>> {
		trace!(%cmd, "executing");
		match cmd {
			Command::Nop => ok(),
			Command::Get => self.get(arg),
			Command::Set => self.set(arg),
			Command::Push => self.push(arg),
			Command::Pop => self.pop(arg),
			Command::Remove => self.remove(arg),
			Command::Ttl => self.ttl(arg),
			Command::Keys => self.keys(arg),
		}
	}

	fn get(&self, arg: &[u8]) -> Result<Vec<u8>> {
		if arg.is_empty() {
			return Err(Error::InvalidFormat);
		}
		let fields = split_fields(arg);
		match fields.as_slice() {
			[name] => match self.entries.get(*name) {
				Some(value) => value.get(),
				None => Err(Error::NotFound),
			},
			[name, key] => match self.entries.get(*name) {
				Some(value) => value.get_key(key),
				None => Err(Error::NotFound),
			},
			_ => Err(Error::InvalidFormat),
		}
	}

	fn set(&mut self, arg: &[u8]) -> Result<Vec<u8>> {
		if arg.is_empty() {
			return Err(Error::InvalidFormat);
		}
		let fields = split_fields(arg);
		match fields.as_slice() {
			[name, new] => match self.entries.get_mut(*name) {
				Some(value) => value.set(new),
				None => {
					self.entries.insert(name.to_vec(), Value::scalar(new));
					ok()
				}
			},
			[name, key, new] => match self.entries.get_mut(*name) {
				Some(value) => value.set_key(key, Some(new)),
				None => {
					self.entries.insert(name.to_vec(), Value::dict(key, new));
					ok()
				}
			},
			_ => Err(Error::InvalidFormat),
		}
	}

	fn push(&mut self, arg: &[u8]) -> Result<Vec<u8>> {
		if arg.is_empty() {
			return Err(Error::InvalidFormat);
		}
		let fields = split_fields(arg);
		match fields.as_slice() {
			[name, new] => match self.entries.get_mut(*name) {
				Some(value) => value.push(new),
				None => {
					self.entries.insert(name.to_vec(), Value::list(new));
					ok()
				}
			},
			_ => Err(Error::InvalidFormat),
		}
	}

	fn pop(&mut self, arg: &[u8]) -> Result<Vec<u8>> {
		if arg.is_empty() {
			return Err(Error::InvalidFormat);
		}
		let fields = split_fields(arg);
		match fields.as_slice() {
			[name] => {
				let Some(value) = self.entries.get_mut(*name) else {
					return Err(Error::NotFound);
				};
				let popped = value.pop();
				// An emptied list is deleted together with its
				// timer; no expiry event fires for it.
				if value.is_empty() {
					self.entries.remove(*name);
					self.stop_timer(name);
				}
				popped
			}
			_ => Err(Error::InvalidFormat),
		}
	}

	fn remove(&mut self, arg: &[u8]) -> Result<Vec<u8>> {
		if arg.is_empty() {
			return Err(Error::InvalidFormat);
		}
		let fields = split_fields(arg);
		match fields.as_slice() {
			[name] => {
				if self.entries.remove(*name).is_none() {
					return Err(Error::NotFound);
				}
				self.stop_timer(name);
				ok()
			}
			[name, key] => match self.entries.get_mut(*name) {
				Some(value) => value.set_key(key, None),
				None => Err(Error::NotFound),
			},
			_ => Err(Error::InvalidFormat),
		}
	}

	fn ttl(&mut self, arg: &[u8]) -> Result<Vec<u8>> {
		if arg.is_empty() {
			return Err(Error::InvalidFormat);
		}
		let fields = split_fields(arg);
		match fields.as_slice() {
			[name, timeout] => {
				let millis = parse_unsigned(timeout)?;
				if !self.entries.contains_key(*name) {
					return Err(Error::NotFound);
				}
				self.arm_timer(name, Duration::from_millis(millis));
				ok()
			}
			_ => Err(Error::InvalidFormat),
		}
	}

	fn keys(&self, arg: &[u8]) -> Result<Vec<u8>> {
		if arg.is_empty() {
			return Ok(join_names(self.entries.keys()));
		}
		let fields = split_fields(arg);
		match fields.as_slice() {
			[name] => match self.entries.get(*name) {
				Some(value) => value.keys(),
				None => Err(Error::NotFound),
			},
			_ => Err(Error::InvalidFormat),
		}
	}

	/// Schedules (or reschedules) expiry of `name`.
	///
	/// Rearming replaces: the previous timer task is aborted and the
	/// generation advanced, so a racing firing of the old deadline can
	/// no longer commit.
	fn arm_timer(&mut self, name: &[u8], after: Duration) {
		self.generation += 1;
		let generation = self.generation;
		let task = spawn_expiry(
			self.feedback.clone(),
			self.observer.clone(),
			name.to_vec(),
			generation,
			after,
		);
		if let Some(previous) = self.timers.insert(
			name.to_vec(),
			ExpiryTimer {
				generation,
				task,
			},
		) {
			previous.task.abort();
		}
		debug!(name = %String::from_utf8_lossy(name), ?after, "expiry timer armed");
	}

	fn stop_timer(&mut self, name: &[u8]) {
		if let Some(timer) = self.timers.remove(name) {
			timer.task.abort();
		}
	}

	/// Handles an elapsed timer re-entering through the queue. Returns
	/// whether the removal committed.
	fn expire(&mut self, name: &[u8], generation: u64) -> bool {
		match self.timers.get(name) {
			Some(timer) if timer.generation == generation => {
				self.timers.remove(name);
				self.entries.remove(name);
				debug!(name = %String::from_utf8_lossy(name), "entry expired");
				true
			}
			// Stale firing: rearmed, or the entry was already
			// deleted and the timer stopped with it.
			_ => false,
		}
	}
}

/// One-shot expiry task. Sleeps, then re-enters the engine through the
/// queue so the removal is serialized with every other mutation. The
/// observer is invoked only after the executor confirms the removal
/// committed, and never on the executor task.
fn spawn_expiry(
	queue: mpsc::WeakSender<Task>,
	observer: Option<ExpiryObserver>,
	name: Vec<u8>,
	generation: u64,
	after: Duration,
) -> JoinHandle<()> {
	tokio::spawn(async move {
		sleep(after).await;

		let Some(queue) = queue.upgrade() else {
			return;
		};
		let (confirm, committed) = oneshot::channel();
		let expired = Task::Expired {
			name: name.clone(),
			generation,
			confirm,
		};
		if queue.send(expired).await.is_err() {
			return;
		}
		drop(queue);

		if committed.await.unwrap_or(false) {
			if let Some(observer) = &observer {
				observer(Event::Expired, &name);
			}
		}
	})
}

/// Splits an argument into fields on unescaped commas.
///
/// A backslash immediately before a comma suppresses the split; both
/// bytes stay in the field. Fields are trimmed of ASCII whitespace.
fn split_fields(arg: &[u8]) -> Vec<&[u8]> {
	let mut fields = Vec::with_capacity(3);
	let mut escaped = false;
	let mut start = 0;
	for (i, &byte) in arg.iter().enumerate() {
		if byte == b'\\' {
			escaped = true;
			continue;
		}
		if byte == b',' && !escaped {
			fields.push(arg[start..i].trim_ascii());
			start = i + 1;
		}
		escaped = false;
	}
	fields.push(arg[start..].trim_ascii());
	fields
}
