//! Property-based tests for logpool using proptest

use logpool::prelude::*;
use proptest::prelude::*;

// ============================================================================
// TaskQueue properties
// ============================================================================

fn sender_of(task: &Task) -> u64 {
    match task {
        Task::Record(r) => r.sender_id,
        Task::Flush => panic!("expected a record"),
    }
}

proptest! {
    /// Length never exceeds capacity, no matter the push sequence
    #[test]
    fn test_queue_length_bounded(capacity in 1usize..64, pushes in 0usize..300) {
        let mut queue = TaskQueue::with_capacity(capacity);
        for i in 0..pushes {
            queue.push(Task::Record(LogRecord::new(
                i as u64,
                Vec::new(),
                LogLevel::Info,
            )));
            prop_assert!(queue.len() <= queue.capacity());
        }
    }

    /// After overflowing, the queue holds exactly the newest `capacity`
    /// entries in their original relative order
    #[test]
    fn test_queue_keeps_newest_in_order(capacity in 1usize..32, pushes in 1usize..200) {
        let mut queue = TaskQueue::with_capacity(capacity);
        for i in 0..pushes {
            queue.push(Task::Record(LogRecord::new(
                i as u64,
                Vec::new(),
                LogLevel::Info,
            )));
        }

        let expected_len = pushes.min(capacity);
        prop_assert_eq!(queue.len(), expected_len);

        let first_kept = (pushes - expected_len) as u64;
        for offset in 0..expected_len as u64 {
            let task = queue.pop().unwrap();
            prop_assert_eq!(sender_of(&task), first_kept + offset);
        }
    }

    /// Every push into a full queue evicts exactly the oldest entry
    #[test]
    fn test_full_queue_evicts_oldest(capacity in 1usize..32, extra in 1usize..50) {
        let mut queue = TaskQueue::with_capacity(capacity);
        for i in 0..capacity {
            prop_assert!(queue
                .push(Task::Record(LogRecord::new(i as u64, Vec::new(), LogLevel::Info)))
                .is_none());
        }

        for i in 0..extra {
            let evicted = queue
                .push(Task::Record(LogRecord::new(
                    (capacity + i) as u64,
                    Vec::new(),
                    LogLevel::Info,
                )))
                .expect("full queue must evict");
            prop_assert_eq!(sender_of(&evicted), i as u64);
        }
    }
}

// ============================================================================
// LogLevel properties
// ============================================================================

proptest! {
    /// String conversions roundtrip for every level
    #[test]
    fn test_log_level_str_roundtrip(level in prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]) {
        let as_str = level.to_str();
        let parsed: LogLevel = as_str.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Ordering matches the numeric discriminants
    #[test]
    fn test_log_level_ordering(
        level1 in prop_oneof![
            Just(LogLevel::Trace),
            Just(LogLevel::Debug),
            Just(LogLevel::Info),
            Just(LogLevel::Warn),
            Just(LogLevel::Error),
            Just(LogLevel::Fatal),
        ],
        level2 in prop_oneof![
            Just(LogLevel::Trace),
            Just(LogLevel::Debug),
            Just(LogLevel::Info),
            Just(LogLevel::Warn),
            Just(LogLevel::Error),
            Just(LogLevel::Fatal),
        ]
    ) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;
        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }
}

// ============================================================================
// RotatingFileWriter properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// With rotation active, the per-file byte counter never exceeds the
    /// configured budget, whatever the write sizes
    #[test]
    fn test_writer_respects_byte_budget(
        budget in 16u64..128,
        sizes in prop::collection::vec(1usize..160, 1..40),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFileWriter::new();
        writer.init(dir.path(), "prop", budget, 4, true).unwrap();

        for size in sizes {
            writer.write(&vec![b'x'; size]);
            prop_assert!(writer.current_bytes() <= budget);
            prop_assert!(writer.file_index() >= 1 && writer.file_index() <= 4);
        }
    }
}
