//! Completion barrier for a batch of scheduler tasks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use super::scheduler::{SchedulerError, TaskScheduler};

#[derive(Default)]
struct GroupState {
    pending: AtomicUsize,
    lock: Mutex<()>,
    done: Condvar,
}

/// Decrements the pending count when dropped, even if the task panicked.
struct Completion(Arc<GroupState>);

impl Drop for Completion {
    fn drop(&mut self) {
        if self.0.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            let _guard = self.0.lock.lock();
            self.0.done.notify_all();
        }
    }
}

/// Waits for every task spawned through it.
///
/// An atomic outstanding-task counter plus a condition variable. Tasks are
/// counted when spawned and released when they finish, panic, or are
/// rejected by a stopped scheduler.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use pricer_risk::parallel::{TaskGroup, TaskScheduler};
///
/// let scheduler = TaskScheduler::new(4).unwrap();
/// let group = TaskGroup::new();
/// let slots = Arc::new(Mutex::new(vec![0usize; 8]));
///
/// for index in 0..8 {
///     let slots = Arc::clone(&slots);
///     group
///         .spawn(&scheduler, move || slots.lock()[index] = index * index)
///         .unwrap();
/// }
/// group.wait();
///
/// assert_eq!(*slots.lock(), vec![0, 1, 4, 9, 16, 25, 36, 49]);
/// ```
#[derive(Clone, Default)]
pub struct TaskGroup {
    state: Arc<GroupState>,
}

impl TaskGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a task to `scheduler` as part of this group.
    ///
    /// # Errors
    ///
    /// `SchedulerError::ShutDown` if the scheduler no longer accepts tasks;
    /// the task is not counted.
    pub fn spawn<F>(&self, scheduler: &TaskScheduler, task: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.state.pending.fetch_add(1, Ordering::AcqRel);
        let completion = Completion(Arc::clone(&self.state));
        scheduler.enqueue(move || {
            let _completion = completion;
            task();
        })
    }

    /// Tasks spawned but not yet finished.
    pub fn pending(&self) -> usize {
        self.state.pending.load(Ordering::Acquire)
    }

    /// Blocks until every spawned task has finished.
    ///
    /// Must not be called from a task running on the same scheduler.
    pub fn wait(&self) {
        let mut guard = self.state.lock.lock();
        while self.state.pending.load(Ordering::Acquire) != 0 {
            self.state.done.wait(&mut guard);
        }
    }
}

impl std::fmt::Debug for TaskGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGroup")
            .field("pending", &self.pending())
            .finish()
    }
}
