//! Deferred action queue
//!
//! Work that must not run until the current script turn has unwound. Tasks
//! are drained strictly FIFO by a single consumer; a task queued while the
//! queue drains goes to the back and runs in the same drain. A failing task
//! is logged and the drain carries on.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::Result;

pub type TaskId = u64;

type Task = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

struct QueuedTask {
    id: TaskId,
    label: String,
    task: Task,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub ran: usize,
    pub failed: usize,
}

#[derive(Default)]
struct Inner {
    tasks: Mutex<VecDeque<QueuedTask>>,
    next_id: AtomicU64,
    draining: AtomicBool,
}

/// Cloneable handle; clones share one queue
#[derive(Clone, Default)]
pub struct DeferredQueue {
    inner: Arc<Inner>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue<F>(&self, label: impl Into<String>, task: F) -> TaskId
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let label = label.into();

        tracing::debug!(task_id = id, label = %label, "Deferred task queued");

        self.inner.tasks.lock().push_back(QueuedTask {
            id,
            label,
            task: Box::new(task),
        });

        id
    }

    pub fn len(&self) -> usize {
        self.inner.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.tasks.lock().is_empty()
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::SeqCst)
    }

    /// Run queued tasks until the queue is empty.
    ///
    /// Only the outermost call drains; a call made from inside a running
    /// task returns an empty report.
    pub fn drain(&self) -> DrainReport {
        if self
            .inner
            .draining
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Deferred queue already draining");
            return DrainReport::default();
        }
        let _draining = DrainGuard(&self.inner.draining);

        let mut report = DrainReport::default();
        loop {
            let next = self.inner.tasks.lock().pop_front();
            let Some(QueuedTask { id, label, task }) = next else {
                break;
            };

            tracing::debug!(task_id = id, label = %label, "Running deferred task");
            report.ran += 1;

            if let Err(e) = task() {
                report.failed += 1;
                tracing::error!(task_id = id, label = %label, error = %e, "Deferred task failed");
            }
        }

        if report.ran > 0 {
            tracing::debug!(ran = report.ran, failed = report.failed, "Deferred queue drained");
        }

        report
    }
}

impl std::fmt::Debug for DeferredQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("len", &self.len())
            .field("draining", &self.is_draining())
            .finish()
    }
}

struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
