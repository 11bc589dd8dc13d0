use lazy_static::lazy_static;
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use thiserror::Error;

lazy_static! {
    static ref SHARED_POOL: Arc<TaskPool> = Arc::new(TaskPool::new(0));
}

/// Error type returned when joining a [`TaskHandle`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task panicked.  The panic payload message is captured.
    #[error("task panicked: {0}")]
    Panicked(String),
    /// The task was dropped without producing a result
    #[error("task result channel disconnected")]
    Disconnected,
}

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct JobQueue {
    jobs: VecDeque<Job>,
    closed: bool,
}

#[derive(Default)]
struct PoolState {
    queue: Mutex<JobQueue>,
    available: Condvar,
}

/// Handle to the result of a task queued on a [`TaskPool`].
///
/// The handle is consumed by [`join`](TaskHandle::join), so each
/// result is retrieved exactly once.
#[must_use = "a queued task's result is only observed by joining its handle"]
pub struct TaskHandle<R> {
    rx: mpsc::Receiver<Result<R, TaskError>>,
}

impl<R> TaskHandle<R> {
    /// Block until the task has run and return its result.  A panic
    /// inside the task is returned as [`TaskError::Panicked`].
    pub fn join(self) -> Result<R, TaskError> {
        self.rx.recv().map_err(|_| TaskError::Disconnected)?
    }
}

/// Fixed size pool of dedicated worker threads fed from a FIFO queue.
///
/// Workers sleep while the queue is empty and wake on every enqueue.
/// There is no work stealing and no cancellation: once queued, a task
/// always runs to completion.  Dropping the pool closes the queue, lets
/// the workers drain any remaining tasks and joins them.
pub struct TaskPool {
    state: Arc<PoolState>,
    completed: Arc<AtomicUsize>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskPool {
    /// Create a pool with `nthreads` workers.  Passing zero sizes the
    /// pool to the available hardware parallelism.
    pub fn new(nthreads: usize) -> Self {
        let nthreads = if nthreads == 0 {
            default_thread_count()
        } else {
            nthreads
        };

        let state = Arc::new(PoolState::default());
        let workers = (0..nthreads)
            .map(|i| {
                let state = Arc::clone(&state);
                thread::Builder::new()
                    .name(format!("emme-worker-{i}"))
                    .spawn(move || worker_loop(&state))
                    .unwrap_or_else(|e| panic!("failed to spawn pool worker: {e}"))
            })
            .collect();

        Self {
            state,
            completed: Arc::new(AtomicUsize::new(0)),
            workers,
        }
    }

    /// The process wide pool, created on first use and sized to the
    /// available hardware parallelism.  It lives until process exit.
    pub fn shared() -> Arc<TaskPool> {
        Arc::clone(&SHARED_POOL)
    }

    /// number of worker threads
    pub fn nthreads(&self) -> usize {
        self.workers.len()
    }

    /// number of tasks that have finished running (including
    /// those that panicked) since the pool was created
    pub fn tasks_completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Queue `f` for execution and return a handle to its result.
    /// This never blocks on the task itself.
    pub fn queue_task<F, R>(&self, f: F) -> TaskHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        let completed = Arc::clone(&self.completed);

        let job: Job = Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(f))
                .map_err(|payload| TaskError::Panicked(panic_message(payload)));
            completed.fetch_add(1, Ordering::AcqRel);
            // the receiver may legitimately be gone if the
            // caller dropped the handle without joining
            let _ = tx.send(result);
        });

        let mut queue = self.state.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.jobs.push_back(job);
        drop(queue);
        self.state.available.notify_one();

        TaskHandle { rx }
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        {
            let mut queue = self.state.queue.lock().unwrap_or_else(PoisonError::into_inner);
            queue.closed = true;
        }
        self.state.available.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for TaskPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskPool")
            .field("nthreads", &self.nthreads())
            .field("tasks_completed", &self.tasks_completed())
            .finish()
    }
}

fn worker_loop(state: &PoolState) {
    loop {
        let job = {
            let mut queue = state.queue.lock().unwrap_or_else(PoisonError::into_inner);
            while queue.jobs.is_empty() && !queue.closed {
                queue = state
                    .available
                    .wait(queue)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            match queue.jobs.pop_front() {
                Some(job) => job,
                None => return, // closed and drained
            }
        };
        job();
    }
}

pub(crate) fn default_thread_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
