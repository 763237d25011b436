//! Execution of the asynchronous search direction
//!
//! The coordinator runs one direction on the calling thread and hands the
//! other to a [`TaskRunner`]. Handles support a blocking join and cooperative
//! cancellation: a cancelled task that has not started never runs, and a
//! running one is left to stop on its own through the shared finished flag.

use crate::error::{Error, Result};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Work handed to a runner
pub type Task = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// How a task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    Cancelled,
}

/// Handle to a spawned task
pub trait TaskHandle: Send {
    /// Request cancellation; a no-op if the task already started or finished
    fn cancel(&self);

    /// Block until the task has finished or is known never to run
    ///
    /// Errors returned by the task are passed through unchanged; a panic
    /// becomes [`Error::TaskFailed`].
    fn join(self: Box<Self>) -> Result<TaskOutcome>;
}

/// Runs tasks off the calling thread
pub trait TaskRunner: Send + Sync {
    fn spawn(&self, task: Task) -> Result<Box<dyn TaskHandle>>;
}

/// Runs each task on its own named OS thread
#[derive(Debug, Clone)]
pub struct ThreadRunner {
    name: String,
}

impl ThreadRunner {
    pub fn new() -> Self {
        Self::named("pnba-forward")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ThreadRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner for ThreadRunner {
    fn spawn(&self, task: Task) -> Result<Box<dyn TaskHandle>> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let thread = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                if flag.load(Ordering::SeqCst) {
                    return Ok(TaskOutcome::Cancelled);
                }
                task().map(|()| TaskOutcome::Completed)
            })?;

        Ok(Box::new(ThreadHandle { thread, cancelled }))
    }
}

struct ThreadHandle {
    thread: thread::JoinHandle<Result<TaskOutcome>>,
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle for ThreadHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn join(self: Box<Self>) -> Result<TaskOutcome> {
        match self.thread.join() {
            Ok(result) => result,
            Err(panic) => Err(Error::TaskFailed(panic_message(panic.as_ref()))),
        }
    }
}

/// Runs tasks on a tokio runtime's blocking thread pool
///
/// Joining blocks the calling thread, so call the search from a blocking
/// context (for example inside `spawn_blocking`), not from an async task.
#[derive(Debug, Clone)]
pub struct TokioRunner {
    handle: tokio::runtime::Handle,
}

impl TokioRunner {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Runner for the runtime the caller is executing in
    pub fn current() -> Result<Self> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|e| Error::invalid(format!("no tokio runtime: {}", e)))
    }
}

impl TaskRunner for TokioRunner {
    fn spawn(&self, task: Task) -> Result<Box<dyn TaskHandle>> {
        let join = self.handle.spawn_blocking(task);
        Ok(Box::new(TokioHandle { join }))
    }
}

struct TokioHandle {
    join: tokio::task::JoinHandle<Result<()>>,
}

impl TaskHandle for TokioHandle {
    fn cancel(&self) {
        // Only prevents a blocking task that has not started yet.
        self.join.abort();
    }

    fn join(self: Box<Self>) -> Result<TaskOutcome> {
        match futures::executor::block_on(self.join) {
            Ok(result) => result.map(|()| TaskOutcome::Completed),
            Err(e) if e.is_cancelled() => Ok(TaskOutcome::Cancelled),
            Err(e) if e.is_panic() => Err(Error::TaskFailed(panic_message(e.into_panic().as_ref()))),
            Err(e) => Err(Error::TaskFailed(e.to_string())),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked".to_string()
    }
}
