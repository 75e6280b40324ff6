//! Shared worker pool draining the task queue
//!
//! A fixed set of worker threads shares one mutex-guarded [`TaskQueue`] and
//! the single console output lock. Producers only ever take the queue or
//! registry lock briefly to mutate shared state; they never wait on worker
//! activity. Workers park on a condvar when the queue is empty, with a
//! one-second wait backstop.

use super::metrics::PoolMetrics;
use super::record::{LogRecord, Task};
use super::registry::SinkRegistry;
use super::task_queue::{TaskQueue, DEFAULT_QUEUE_CAPACITY};
use crate::sinks::console::ConsoleSink;
use crate::sinks::rotating_file::RotatingFileWriter;
use parking_lot::{Condvar, Mutex};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

/// Upper bound on how long an idle worker sleeps between queue polls.
///
/// Enqueues wake a worker immediately through the condvar; this interval only
/// bounds the poll latency if a wakeup is ever missed.
pub const DEFAULT_IDLE_BACKOFF: Duration = Duration::from_secs(1);

/// State shared between the pool handle and its worker threads
struct PoolShared {
    queue: Mutex<TaskQueue>,
    work_available: Condvar,
    running: AtomicBool,
    console: ConsoleSink,
    registry: SinkRegistry,
    metrics: PoolMetrics,
}

impl PoolShared {
    /// Execute one task to completion. Nothing here can fail hard: a registry
    /// miss or a writer rejection is absorbed, tasks are at-most-once, and no
    /// failure ever reaches a producer.
    fn run_task(&self, task: Task) {
        match task {
            Task::Record(record) => {
                if record.to_console {
                    let color = record.colorize.then(|| record.level.color_code());
                    self.console.write(&record.bytes, color);
                }
                if record.to_file {
                    match self.registry.lookup(record.sender_id) {
                        Some(writer) => writer.write(&record.bytes),
                        None => {
                            // Logger unregistered between enqueue and
                            // processing; skip the file write for this task
                            self.metrics.record_sink_miss();
                        }
                    }
                }
            }
            Task::Flush => self.console.flush(),
        }
        self.metrics.record_processed();
    }

    /// Worker body: pop and run tasks until shutdown AND the queue is empty.
    ///
    /// Clearing the running flag never discards pending work. A worker exits
    /// only after a poll under the queue lock finds nothing left while the
    /// flag is down, so teardown always drains the queue.
    fn worker_loop(&self) {
        loop {
            let task = {
                let mut queue = self.queue.lock();
                loop {
                    if let Some(task) = queue.pop() {
                        break Some(task);
                    }
                    if !self.running.load(Ordering::Acquire) {
                        break None;
                    }
                    self.work_available.wait_for(&mut queue, DEFAULT_IDLE_BACKOFF);
                }
            };

            match task {
                Some(task) => self.run_task(task),
                None => return,
            }
        }
    }
}

/// Fixed pool of worker threads behind a bounded, drop-oldest task queue.
///
/// Construct one explicitly through [`WorkerPool::builder`] when you want
/// teardown control, or use the process-wide [`WorkerPool::shared`] instance.
/// Dropping the pool (or calling [`shutdown`]) drains the queue and joins
/// every worker before returning.
///
/// [`shutdown`]: WorkerPool::shutdown
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Create a builder for a pool
    #[must_use]
    pub fn builder() -> PoolBuilder {
        PoolBuilder::new()
    }

    /// The process-wide pool, created lazily on first use.
    ///
    /// Built with default worker count and queue capacity, writing to stdout.
    /// This instance lives for the remainder of the process and cannot be
    /// torn down; construct a pool through [`WorkerPool::builder`] instead
    /// when shutdown ordering matters.
    pub fn shared() -> &'static WorkerPool {
        static SHARED: OnceLock<WorkerPool> = OnceLock::new();
        SHARED.get_or_init(|| PoolBuilder::new().build())
    }

    /// Enqueue a log record, evicting the oldest queued task if the queue is
    /// at capacity. Fire-and-forget; never blocks on worker activity.
    ///
    /// Records posted after shutdown are silently discarded.
    pub fn post(&self, record: LogRecord) {
        self.enqueue(Task::Record(record));
    }

    /// Enqueue a console flush boundary. It shares the FIFO with log records
    /// and gets no priority jump.
    pub fn flush(&self) {
        self.enqueue(Task::Flush);
    }

    fn enqueue(&self, task: Task) {
        if !self.shared.running.load(Ordering::Acquire) {
            return;
        }

        let evicted = self.shared.queue.lock().push(task);

        self.shared.metrics.record_posted();
        if evicted.is_some() {
            self.shared.metrics.record_evicted();
        }
        self.shared.work_available.notify_one();
    }

    /// Register the rotating file writer serving `id`.
    ///
    /// Expected once per logger instance, at construction. Guarded by a lock
    /// independent of the queue's, so registration never delays submission.
    pub fn register_file_sink(&self, id: u64, writer: Arc<RotatingFileWriter>) {
        self.shared.registry.register(id, writer);
    }

    /// Remove the file sink registered under `id`.
    ///
    /// Records already queued for `id` skip their file write when processed;
    /// their console write still happens if requested.
    pub fn unregister_file_sink(&self, id: u64) {
        self.shared.registry.unregister(id);
    }

    /// Counters for posted, processed, and evicted tasks
    pub fn metrics(&self) -> &PoolMetrics {
        &self.shared.metrics
    }

    /// Number of worker threads
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Tasks currently waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.shared.queue.lock().len()
    }

    /// Stop accepting tasks, drain the queue, and join every worker.
    ///
    /// Pending tasks are never discarded: each worker keeps popping until it
    /// observes the queue empty with the running flag down. Returns only
    /// once all workers have exited. Idempotent.
    pub fn shutdown(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        self.shared.work_available.notify_all();

        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Builder for [`WorkerPool`]
///
/// # Example
/// ```
/// use logpool::prelude::*;
///
/// let pool = WorkerPool::builder()
///     .workers(4)
///     .queue_capacity(500)
///     .build();
/// assert_eq!(pool.worker_count(), 4);
/// ```
pub struct PoolBuilder {
    workers: Option<usize>,
    queue_capacity: usize,
    console_target: Option<Box<dyn Write + Send>>,
}

impl PoolBuilder {
    pub fn new() -> Self {
        Self {
            workers: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            console_target: None,
        }
    }

    /// Set the number of worker threads.
    ///
    /// Defaults to the hardware concurrency reported by the OS. Clamped to a
    /// minimum of one.
    #[must_use = "builder methods return a new value"]
    pub fn workers(mut self, count: usize) -> Self {
        self.workers = Some(count);
        self
    }

    /// Set the task queue capacity (default 100, minimum 1)
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Redirect console output to an arbitrary writer instead of stdout.
    ///
    /// Intended for tests that capture the write and flush sequence.
    #[must_use = "builder methods return a new value"]
    pub fn console_target(mut self, target: Box<dyn Write + Send>) -> Self {
        self.console_target = Some(target);
        self
    }

    /// Spawn the workers and return the pool
    pub fn build(self) -> WorkerPool {
        let workers = self
            .workers
            .unwrap_or_else(|| {
                thread::available_parallelism()
                    .map(usize::from)
                    .unwrap_or(2)
            })
            .max(1);

        let console = match self.console_target {
            Some(target) => ConsoleSink::with_target(target),
            None => ConsoleSink::stdout(),
        };

        let shared = Arc::new(PoolShared {
            queue: Mutex::new(TaskQueue::with_capacity(self.queue_capacity)),
            work_available: Condvar::new(),
            running: AtomicBool::new(true),
            console,
            registry: SinkRegistry::new(),
            metrics: PoolMetrics::new(),
        });

        let handles = (0..workers)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || shared.worker_loop())
            })
            .collect();

        WorkerPool {
            shared,
            workers: handles,
        }
    }
}

impl Default for PoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}
