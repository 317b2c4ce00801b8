//! Fixed-size worker pool over a FIFO task queue.

use std::any::Any;
use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};
use thiserror::Error;
use tracing::{debug, error};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Errors raised by the [`TaskScheduler`].
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Pool requested with no workers.
    #[error("Worker count must be at least 1")]
    NoWorkers,

    /// Enqueue attempted after shutdown was requested.
    #[error("Scheduler is shut down")]
    ShutDown,

    /// The OS refused to start a worker thread.
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

struct Queue {
    jobs: VecDeque<Job>,
    stopping: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    available: Condvar,
}

/// Worker pool with a fixed thread count.
///
/// Workers pull closures from a shared FIFO queue guarded by a single
/// mutex; a condition variable wakes them on enqueue and on shutdown.
/// Completion order across workers is unordered.
///
/// A task that panics is logged and does not take its worker down.
///
/// # Shutdown
///
/// [`shutdown`](Self::shutdown) stops new submissions, lets the workers
/// drain every task already queued, then joins them. Dropping the
/// scheduler does the same.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use pricer_risk::parallel::TaskScheduler;
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// let mut scheduler = TaskScheduler::new(2).unwrap();
/// for _ in 0..10 {
///     let counter = Arc::clone(&counter);
///     scheduler
///         .enqueue(move || {
///             counter.fetch_add(1, Ordering::SeqCst);
///         })
///         .unwrap();
/// }
/// scheduler.shutdown();
///
/// assert_eq!(counter.load(Ordering::SeqCst), 10);
/// assert!(scheduler.enqueue(|| {}).is_err());
/// ```
pub struct TaskScheduler {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskScheduler {
    /// Starts `workers` threads.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::NoWorkers` if `workers` is 0
    /// - `SchedulerError::Spawn` if a thread cannot be started; threads
    ///   already running are stopped and joined first
    pub fn new(workers: usize) -> Result<Self, SchedulerError> {
        if workers == 0 {
            return Err(SchedulerError::NoWorkers);
        }

        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                jobs: VecDeque::new(),
                stopping: false,
            }),
            available: Condvar::new(),
        });

        let mut scheduler = Self {
            shared,
            workers: Vec::with_capacity(workers),
        };
        for index in 0..workers {
            let shared = Arc::clone(&scheduler.shared);
            let handle = thread::Builder::new()
                .name(format!("pricer-worker-{}", index))
                .spawn(move || worker_loop(index, &shared))?;
            scheduler.workers.push(handle);
        }
        debug!(workers, "scheduler started");
        Ok(scheduler)
    }

    /// Number of worker threads.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Number of tasks waiting for a worker.
    pub fn queued(&self) -> usize {
        self.shared.queue.lock().jobs.len()
    }

    /// Appends a task to the queue and wakes one worker.
    ///
    /// # Errors
    ///
    /// `SchedulerError::ShutDown` once shutdown has been requested. The task
    /// is dropped without running.
    pub fn enqueue<F>(&self, task: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut queue = self.shared.queue.lock();
            if queue.stopping {
                return Err(SchedulerError::ShutDown);
            }
            queue.jobs.push_back(Box::new(task));
        }
        self.shared.available.notify_one();
        Ok(())
    }

    /// Stops accepting tasks, drains the queue and joins every worker.
    ///
    /// Calling it again is a no-op.
    pub fn shutdown(&mut self) {
        self.shared.queue.lock().stopping = true;
        self.shared.available.notify_all();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("worker thread terminated abnormally");
            }
        }
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}

fn worker_loop(index: usize, shared: &Shared) {
    loop {
        let job = {
            let mut queue = shared.queue.lock();
            loop {
                if let Some(job) = queue.jobs.pop_front() {
                    break job;
                }
                if queue.stopping {
                    debug!(worker = index, "worker exiting");
                    return;
                }
                shared.available.wait(&mut queue);
            }
        };

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
            error!(
                worker = index,
                panic = panic_message(payload.as_ref()),
                "task panicked"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            TaskScheduler::new(0),
            Err(SchedulerError::NoWorkers)
        ));
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = TaskScheduler::new(1).unwrap();
        let (gate_tx, gate_rx) = mpsc::channel::<()>();

        // Hold the only worker until every task is queued
        scheduler
            .enqueue(move || {
                let _ = gate_rx.recv();
            })
            .unwrap();
        for _ in 0..20 {
            let counter = Arc::clone(&counter);
            scheduler
                .enqueue(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }
        // Release the worker only after shutdown has been requested
        let release = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(50));
            drop(gate_tx);
        });
        scheduler.shutdown();
        release.join().unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 20);
        assert_eq!(scheduler.worker_count(), 0);
    }

    #[test]
    fn test_enqueue_after_shutdown() {
        let mut scheduler = TaskScheduler::new(2).unwrap();
        scheduler.shutdown();
        assert!(matches!(
            scheduler.enqueue(|| {}),
            Err(SchedulerError::ShutDown)
        ));
    }

    #[test]
    fn test_panicking_task_keeps_worker_alive() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = TaskScheduler::new(1).unwrap();
        scheduler
            .enqueue(|| {
                panic!("bad trade");
            })
            .unwrap();
        let after = Arc::clone(&counter);
        scheduler
            .enqueue(move || {
                after.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        scheduler.shutdown();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("boom"));
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
