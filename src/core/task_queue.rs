//! Bounded FIFO task queue with drop-oldest eviction
//!
//! The queue itself is a plain data structure; the worker pool wraps it in a
//! mutex and condvar. Keeping the locking outside makes the eviction and
//! ordering behavior directly unit-testable.

use super::record::Task;
use std::collections::VecDeque;

/// Default capacity of the shared task queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Ordered sequence of tasks, bounded at `capacity`.
///
/// Pushing into a full queue evicts the front (oldest) element first, so the
/// length never exceeds the capacity after any mutation. Eviction favors
/// recency over backlog: under sustained overload the newest observability
/// data wins and producers never block.
#[derive(Debug)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
    capacity: usize,
}

impl TaskQueue {
    /// Create a queue bounded at `capacity` tasks (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tasks: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Enqueue a task, evicting the oldest entry if the queue is full.
    ///
    /// Returns the evicted task, if any.
    pub fn push(&mut self, task: Task) -> Option<Task> {
        let evicted = if self.tasks.len() == self.capacity {
            self.tasks.pop_front()
        } else {
            None
        };
        self.tasks.push_back(task);
        evicted
    }

    /// Pop the front (oldest) task
    pub fn pop(&mut self) -> Option<Task> {
        self.tasks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}
