//! Cancellable background work on a dedicated thread.
//!
//! A [`TaskHandle`] owns the thread and a [`CancelToken`] the operation can
//! poll. [`TaskSlot`] keeps at most one live task: submitting a new one
//! cancels the previous, so only the latest request's result is observed.

use std::thread::JoinHandle;

use libris_import::CancelToken;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Background task panicked")]
    Panicked,
}

/// Spawns operations onto their own thread.
pub struct BackgroundTask;

impl BackgroundTask {
    /// Run `op` on a new thread. The operation receives the task's cancel
    /// token and should check it between units of work.
    pub fn spawn<T, F>(op: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce(&CancelToken) -> T + Send + 'static,
    {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let join = std::thread::spawn(move || op(&token));
        TaskHandle { cancel, join }
    }

    /// Run `op` on a new thread, then hand its result to `then` on the same
    /// thread. The continuation runs even if the task was cancelled, so it
    /// can observe partial results.
    pub fn spawn_then<T, F, C>(op: F, then: C) -> TaskHandle<()>
    where
        T: Send + 'static,
        F: FnOnce(&CancelToken) -> T + Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        Self::spawn(move |cancel| then(op(cancel)))
    }
}

/// Handle to a running background task.
pub struct TaskHandle<T> {
    cancel: CancelToken,
    join: JoinHandle<T>,
}

impl<T> TaskHandle<T> {
    /// Ask the task to stop at its next checkpoint.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Block until the task ends and return its result.
    pub fn join(self) -> Result<T, TaskError> {
        self.join.join().map_err(|_| TaskError::Panicked)
    }
}

/// Holds the most recent task of a kind; earlier ones are cancelled and
/// their results discarded.
pub struct TaskSlot<T> {
    current: Option<TaskHandle<T>>,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: Send + 'static> TaskSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running task and start `op` in its place.
    pub fn submit<F>(&mut self, op: F) -> &TaskHandle<T>
    where
        F: FnOnce(&CancelToken) -> T + Send + 'static,
    {
        self.cancel();
        self.current.insert(BackgroundTask::spawn(op))
    }

    /// Cancel the current task, if any, without waiting for it.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
    }

    pub fn is_busy(&self) -> bool {
        self.current.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Take the current task out of the slot, e.g. to join it.
    pub fn take(&mut self) -> Option<TaskHandle<T>> {
        self.current.take()
    }
}
