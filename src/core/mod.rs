//! Core queue, pool, and registry types

pub mod error;
pub mod log_level;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod task_queue;
pub mod worker_pool;

pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use metrics::PoolMetrics;
pub use record::{LogRecord, Task};
pub use registry::SinkRegistry;
pub use task_queue::{TaskQueue, DEFAULT_QUEUE_CAPACITY};
pub use worker_pool::{PoolBuilder, WorkerPool};
