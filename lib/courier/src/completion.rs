//! Completion contexts for callback-style operations.
//!
//! Every callback passed to a `*_with` method of [`Client`](crate::Client) is
//! handed to a [`CompletionContext`] once the exchange is over. The default
//! context is [`MainQueue::global`], a single dedicated thread that runs
//! completions one after the other.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, OnceLock};
use std::thread;

use tokio::sync::mpsc;

/// A unit of work scheduled on a [`CompletionContext`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Where completion callbacks run.
///
/// Implementations must run each job exactly once.
pub trait CompletionContext: Send + Sync + 'static {
    /// Schedule a job.
    fn execute(&self, job: Job);
}

impl<C> CompletionContext for Arc<C>
where
    C: CompletionContext + ?Sized,
{
    fn execute(&self, job: Job) {
        (**self).execute(job);
    }
}

/// Serial executor backed by one dedicated thread.
///
/// Jobs run in submission order. A panicking job is logged and does not stop
/// the queue.
#[derive(Debug, Clone)]
pub struct MainQueue {
    sender: Option<mpsc::UnboundedSender<Job>>,
}

impl MainQueue {
    /// Name of the thread running the jobs.
    pub const THREAD_NAME: &'static str = "courier-main";

    /// Spawn a new queue and its thread.
    ///
    /// When the thread cannot be spawned, jobs run inline on the caller.
    #[must_use]
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        let spawned = thread::Builder::new()
            .name(Self::THREAD_NAME.to_string())
            .spawn(move || {
                while let Some(job) = receiver.blocking_recv() {
                    if catch_unwind(AssertUnwindSafe(job)).is_err() {
                        tracing::error!("completion callback panicked");
                    }
                }
                tracing::debug!("main queue closed");
            });

        match spawned {
            Ok(_) => Self {
                sender: Some(sender),
            },
            Err(err) => {
                tracing::warn!(error = %err, "cannot spawn main queue thread, running completions inline");
                Self { sender: None }
            }
        }
    }

    /// Process-wide queue, created on first use.
    #[must_use]
    pub fn global() -> Self {
        static GLOBAL: OnceLock<MainQueue> = OnceLock::new();
        GLOBAL.get_or_init(Self::new).clone()
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionContext for MainQueue {
    fn execute(&self, job: Job) {
        let Some(sender) = &self.sender else {
            job();
            return;
        };

        if let Err(mpsc::error::SendError(job)) = sender.send(job) {
            tracing::warn!("main queue is gone, running completion inline");
            job();
        }
    }
}

/// Runs jobs right away on the calling thread.
///
/// Handy in tests and in programs that do their own dispatching.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl CompletionContext for Immediate {
    fn execute(&self, job: Job) {
        job();
    }
}
