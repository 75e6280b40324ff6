//! # logpool
//!
//! A worker-pool backed asynchronous logging core. Producers hand finalized
//! log records to a shared, bounded FIFO task queue; a fixed pool of worker
//! threads drains it, serializing output to the console and to per-logger
//! rotating log files.
//!
//! ## Design
//!
//! - **Bounded queue, drop-oldest**: under sustained overload the oldest
//!   queued task is evicted to admit a new one, bounding memory without ever
//!   blocking a producer.
//! - **Drain on shutdown**: workers keep popping until the queue is empty
//!   before exiting; teardown joins every thread.
//! - **Serialized console output**: all console writes and flushes happen
//!   under a single output lock so concurrent workers never interleave bytes.
//! - **Rotating file sinks**: each logger registers a rotating file writer
//!   applying size- and count-based rollover.
//!
//! ## Example
//!
//! ```
//! use logpool::prelude::*;
//! use std::sync::Arc;
//!
//! let pool = WorkerPool::builder().workers(2).build();
//!
//! let writer = Arc::new(RotatingFileWriter::new());
//! pool.register_file_sink(7, Arc::clone(&writer));
//!
//! pool.post(
//!     LogRecord::new(7, b"[info] ready\n".to_vec(), LogLevel::Info)
//!         .to_console(true)
//!         .colorize(true),
//! );
//! pool.flush();
//! ```

pub mod core;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        LogLevel, LogRecord, LoggerError, PoolBuilder, PoolMetrics, Result, Task, TaskQueue,
        WorkerPool, DEFAULT_QUEUE_CAPACITY,
    };
    pub use crate::sinks::{ConsoleSink, RotatingFileWriter};
}

pub use crate::core::{
    LogLevel, LogRecord, LoggerError, PoolBuilder, PoolMetrics, Result, SinkRegistry, Task,
    TaskQueue, WorkerPool, DEFAULT_QUEUE_CAPACITY,
};
pub use crate::sinks::{ConsoleSink, RotatingFileWriter};
