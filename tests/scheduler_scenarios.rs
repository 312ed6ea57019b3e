//! End-to-end scheduler scenarios
//!
//! Deadlines are real `Instant`s offset from a fixed "now"; the scheduler only
//! compares them, so the tests never sleep.

use parking_lot::Mutex;
use rust_indexed_heaps::compare::MaxFirst;
use rust_indexed_heaps::Scheduler;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const HOUR: Duration = Duration::from_secs(3600);

fn min_key<'a>(scheduler: &Scheduler<&'a str, Instant>) -> Option<&'a str> {
    scheduler.peek().map(|entry| entry.key)
}

/// Scenarios A through C build on each other.
#[test]
fn test_add_update_remove_sequence() {
    let now = Instant::now();
    let mut scheduler = Scheduler::new();

    scheduler.add_or_update("A", now + HOUR);
    scheduler.add_or_update("B", now + 2 * HOUR);
    scheduler.add_or_update("C", now + 3 * HOUR);
    assert_eq!(min_key(&scheduler), Some("A"));
    assert!(scheduler.check_invariants());

    scheduler.add_or_update("A", now + 4 * HOUR);
    assert_eq!(min_key(&scheduler), Some("B"));
    assert_eq!(scheduler.len(), 3);
    assert!(scheduler.check_invariants());

    assert!(scheduler.remove("C"));
    assert!(!scheduler.remove("C"));
    assert_eq!(scheduler.len(), 2);
    assert!(scheduler.check_invariants());
}

#[test]
fn test_pop_due_takes_only_the_earliest() {
    let now = Instant::now();
    let mut scheduler = Scheduler::new();
    scheduler.add_or_update("A", now + 4 * HOUR);
    scheduler.add_or_update("B", now + 2 * HOUR);

    // Both are due at +5h, but a single call hands out only one.
    let due = scheduler.pop_due(&(now + 5 * HOUR));
    assert_eq!(due.map(|entry| entry.key), Some("B"));
    assert_eq!(scheduler.len(), 1);
    assert!(scheduler.contains("A"));
    assert!(!scheduler.contains("B"));
    assert!(scheduler.check_invariants());
}

#[test]
fn test_pop_due_nothing_due() {
    let now = Instant::now();
    let mut scheduler = Scheduler::new();
    scheduler.add_or_update("future", now + HOUR);

    assert!(scheduler.pop_due(&now).is_none());
    assert_eq!(scheduler.len(), 1);
    assert!(scheduler.contains("future"));
}

#[test]
fn test_pop_due_past_deadline() {
    let now = Instant::now();
    let mut scheduler = Scheduler::new();
    scheduler.add_or_update("overdue", now);

    let due = scheduler.pop_due(&(now + Duration::from_secs(1))).unwrap();
    assert_eq!(due.key, "overdue");
    assert_eq!(due.deadline, now);
    assert!(scheduler.is_empty());
}

#[test]
fn test_equal_deadlines_all_come_out() {
    let now = Instant::now();
    let mut scheduler = Scheduler::new();
    for key in ["x", "y", "z"] {
        scheduler.add_or_update(key, now);
    }

    let mut popped: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(&now))
        .map(|entry| entry.key)
        .collect();
    popped.sort_unstable();
    assert_eq!(popped, vec!["x", "y", "z"]);
}

#[test]
fn test_remove_then_readd_round_trip() {
    let now = Instant::now();
    let mut scheduler = Scheduler::new();
    for (i, key) in ["a", "b", "c", "d", "e", "f"].into_iter().enumerate() {
        scheduler.add_or_update(key, now + (i as u32 + 1) * HOUR);
    }

    let before = scheduler.position_of("c");
    assert!(scheduler.remove("c"));
    assert_eq!(scheduler.position_of("c"), None);

    scheduler.add_or_update("c", now);
    assert_eq!(scheduler.position_of("c"), Some(0));
    assert_ne!(before, Some(0));
    assert_eq!(scheduler.len(), 6);
    assert!(scheduler.check_invariants());
}

#[test]
fn test_latest_deadline_first() {
    let now = Instant::now();
    let mut scheduler = Scheduler::with_order(MaxFirst);
    scheduler.add_or_update("soon", now + HOUR);
    scheduler.add_or_update("later", now + 5 * HOUR);
    scheduler.add_or_update("middle", now + 3 * HOUR);

    assert_eq!(scheduler.peek().map(|entry| entry.key), Some("later"));
    scheduler.add_or_update("soon", now + 9 * HOUR);
    assert_eq!(scheduler.peek().map(|entry| entry.key), Some("soon"));
    assert!(scheduler.check_invariants());
}

#[test]
fn test_string_keys_borrowed_lookup() {
    let mut scheduler: Scheduler<String, u64> = Scheduler::new();
    scheduler.add_or_update("job-1".to_string(), 30);
    scheduler.add_or_update("job-2".to_string(), 10);

    assert_eq!(scheduler.deadline_of("job-1"), Some(&30));
    assert!(scheduler.remove("job-2"));
    assert_eq!(scheduler.pop_due(&30).map(|entry| entry.key), Some("job-1".to_string()));
}

/// The scheduler is not synchronized; callers share it behind their own lock.
#[test]
fn test_shared_behind_caller_lock() {
    let scheduler: Arc<Mutex<Scheduler<u32, u64>>> = Arc::new(Mutex::new(Scheduler::new()));

    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let scheduler = Arc::clone(&scheduler);
            thread::spawn(move || {
                for i in 0..250u32 {
                    let key = t * 1000 + i;
                    scheduler.lock().add_or_update(key, u64::from(i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut scheduler = scheduler.lock();
    assert_eq!(scheduler.len(), 1000);
    assert!(scheduler.check_invariants());

    let mut last = 0;
    let mut count = 0;
    while let Some(entry) = scheduler.pop_due(&u64::MAX) {
        assert!(entry.deadline >= last);
        last = entry.deadline;
        count += 1;
    }
    assert_eq!(count, 1000);
}
