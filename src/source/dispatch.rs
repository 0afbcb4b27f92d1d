//! Execution contexts that load completions are delivered on.

use std::{
    sync::{
        Mutex, PoisonError,
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
    },
    time::Duration,
};

/// Unit of work handed to a [`Dispatcher`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs completion callbacks on a caller-designated context.
pub trait Dispatcher: Send + Sync {
    /// Schedule `job`.
    fn dispatch(&self, job: Job);
}

/// Runs jobs immediately on whichever thread dispatches them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inline;

impl Dispatcher for Inline {
    fn dispatch(&self, job: Job) {
        job();
    }
}

/// Queue of jobs drained by the thread that owns the sources (the "main" context).
#[derive(Debug)]
pub struct CompletionQueue {
    tx: Sender<Job>,
    rx: Mutex<Receiver<Job>>,
}

impl Default for CompletionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionQueue {
    /// Empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Run every job queued so far on the calling thread. Returns how many ran.
    pub fn drain(&self) -> usize {
        let rx = self.rx.lock().unwrap_or_else(PoisonError::into_inner);
        let mut ran = 0;
        while let Ok(job) = rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Block until one job arrives (or `timeout` passes) and run it on the calling thread.
    pub fn run_next(&self, timeout: Duration) -> bool {
        let job = {
            let rx = self.rx.lock().unwrap_or_else(PoisonError::into_inner);
            match rx.recv_timeout(timeout) {
                Ok(job) => job,
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return false,
            }
        };
        job();
        true
    }
}

impl Dispatcher for CompletionQueue {
    fn dispatch(&self, job: Job) {
        // The receiver lives as long as `self`, so sending cannot fail.
        let _ = self.tx.send(job);
    }
}
