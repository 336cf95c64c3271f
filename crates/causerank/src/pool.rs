//! Worker pool for CPU-bound answer computation
//!
//! A fixed set of dedicated worker threads created once at startup.
//! Jobs flow in through a bounded queue, results flow back through
//! per-job oneshot channels, so the reactor thread never runs the
//! expensive computation and never blocks waiting for it.

use causerank_core::{AnswerTask, Index, Query, RankedAnswers, SharedEngine};
use serde::{Deserialize, Serialize};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Worker pool errors
#[derive(Error, Debug)]
pub enum PoolError {
    /// The job queue is full; the caller should retry later.
    #[error("worker pool queue is full")]
    Overloaded,

    /// The pool has been shut down.
    #[error("worker pool is shut down")]
    Closed,

    /// No result arrived within the task timeout.
    #[error("task timed out after {0:?}")]
    Timeout(Duration),

    /// The worker failed to compute a result.
    #[error("worker failed: {0}")]
    Worker(String),
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of worker threads
    pub workers: usize,

    /// Bounded job queue capacity
    pub queue_capacity: usize,

    /// Per-task timeout in seconds
    pub task_timeout_secs: u64,

    /// Fixed query submitted during warm-up
    pub warmup_query: String,
}

impl PoolConfig {
    /// Default worker count: all cores but one, at least one.
    pub fn default_workers() -> usize {
        num_cpus::get().saturating_sub(1).max(1)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        let workers = Self::default_workers();
        Self {
            workers,
            queue_capacity: workers * 4,
            task_timeout_secs: 30,
            warmup_query: "bird sing".to_string(),
        }
    }
}

struct Job {
    task: AnswerTask,
    /// None for warm-up jobs; their results are discarded.
    reply: Option<oneshot::Sender<Result<RankedAnswers, PoolError>>>,
}

/// Fixed-size pool of worker threads executing answer-engine tasks.
///
/// Created once at startup and injected wherever it is needed; alive
/// for the lifetime of the process unless [`shutdown`](Self::shutdown)
/// is called. Each worker holds the shared read-only index and the
/// engine; the index is never written after the pool is created.
pub struct WorkerPool {
    tx: Mutex<Option<mpsc::Sender<Job>>>,
    handles: Mutex<Vec<thread::JoinHandle<()>>>,
    engine: SharedEngine,
    index: Arc<Index>,
    size: usize,
    task_timeout: Duration,
    warmup_query: String,
}

impl WorkerPool {
    /// Spawn the worker threads and return the pool.
    pub fn new(engine: SharedEngine, index: Arc<Index>, config: &PoolConfig) -> Self {
        let size = config.workers.max(1);
        let (tx, rx) = mpsc::channel::<Job>(config.queue_capacity.max(size * 2));

        let rx = Arc::new(Mutex::new(rx));
        let mut handles = Vec::with_capacity(size);
        for worker_id in 0..size {
            let rx = Arc::clone(&rx);
            let engine = Arc::clone(&engine);
            let index = Arc::clone(&index);
            handles.push(thread::spawn(move || {
                worker_loop(worker_id, rx, engine, index);
            }));
        }

        Self {
            tx: Mutex::new(Some(tx)),
            handles: Mutex::new(handles),
            engine,
            index,
            size,
            task_timeout: Duration::from_secs(config.task_timeout_secs),
            warmup_query: config.warmup_query.clone(),
        }
    }

    /// Number of worker threads
    pub fn size(&self) -> usize {
        self.size
    }

    /// Submit a task and wait for its result.
    ///
    /// Never blocks the reactor: enqueueing is non-blocking (a full
    /// queue is rejected with [`PoolError::Overloaded`]) and the
    /// caller suspends on the reply channel, resuming on its own task
    /// once the worker sends the result. The reply arrives exactly
    /// once; a task that outlives the timeout keeps running on its
    /// worker but its reply is discarded.
    pub async fn submit(&self, task: AnswerTask) -> Result<RankedAnswers, PoolError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job = Job {
            task,
            reply: Some(reply_tx),
        };

        self.sender()?.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => PoolError::Overloaded,
            mpsc::error::TrySendError::Closed(_) => PoolError::Closed,
        })?;

        match tokio::time::timeout(self.task_timeout, reply_rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(PoolError::Closed),
            Err(_) => Err(PoolError::Timeout(self.task_timeout)),
        }
    }

    /// Pre-warm the workers before accepting traffic.
    ///
    /// Submits two fire-and-forget tasks per worker for the fixed
    /// warm-up query so each worker pays its one-time initialization
    /// cost before the first user-visible request. Results are
    /// discarded. Returns the number of tasks submitted.
    pub async fn warm_up(&self) -> Result<usize, PoolError> {
        let mut query = Query::new(&self.warmup_query);
        query.top = 1;
        let task = self
            .engine
            .prepare(&self.index, &query)
            .map_err(|e| PoolError::Worker(e.to_string()))?;

        let tx = self.sender()?;
        let count = self.size * 2;
        for _ in 0..count {
            let job = Job {
                task: task.clone(),
                reply: None,
            };
            tx.send(job).await.map_err(|_| PoolError::Closed)?;
        }
        debug!(tasks = count, workers = self.size, "warm-up submitted");
        Ok(count)
    }

    /// Close the queue and wait for the workers to drain and exit.
    ///
    /// In-flight jobs complete; submissions after this fail with
    /// [`PoolError::Closed`].
    pub fn shutdown(&self) {
        let sender = self.tx.lock().unwrap_or_else(|e| e.into_inner()).take();
        drop(sender);

        let handles = std::mem::take(&mut *self.handles.lock().unwrap_or_else(|e| e.into_inner()));
        for handle in handles {
            if handle.join().is_err() {
                warn!("worker thread exited by panic");
            }
        }
    }

    fn sender(&self) -> Result<mpsc::Sender<Job>, PoolError> {
        self.tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(PoolError::Closed)
    }
}

fn worker_loop(
    worker_id: usize,
    rx: Arc<Mutex<mpsc::Receiver<Job>>>,
    engine: SharedEngine,
    index: Arc<Index>,
) {
    loop {
        let job = {
            let mut guard = rx.lock().unwrap_or_else(|e| e.into_inner());
            guard.blocking_recv()
        };
        let Some(job) = job else {
            debug!(worker_id, "worker exiting");
            break;
        };

        let result = catch_unwind(AssertUnwindSafe(|| engine.compute(&index, &job.task)));
        let result = match result {
            Ok(Ok(ranked)) => Ok(ranked),
            Ok(Err(e)) => Err(PoolError::Worker(e.to_string())),
            Err(_) => Err(PoolError::Worker("worker panicked".to_string())),
        };

        match job.reply {
            Some(reply) => {
                // Receiver may have timed out and gone away.
                let _ = reply.send(result);
            }
            None => {
                if let Err(e) = result {
                    debug!(worker_id, "warm-up task failed: {e}");
                }
            }
        }
    }
}
