//! Per-meeting serialization
//!
//! Two concurrent advance calls for the same meeting must not both compute
//! "next speaker" from the same pre-call state; that would double-assign
//! sequence_in_round and corrupt round rollover. Every mutating orchestrator
//! operation holds the meeting's async mutex around its whole
//! select → generate → persist → update-counters sequence. Different
//! meetings proceed in parallel.

use boardroom_domain::MeetingId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Lock map keyed by meeting id.
///
/// Locks are created lazily and kept for the life of the process; the map
/// grows by one small entry per meeting ever touched.
#[derive(Default)]
pub struct MeetingLocks {
    inner: Mutex<HashMap<MeetingId, Arc<tokio::sync::Mutex<()>>>>,
}

impl MeetingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding the given meeting. Callers hold the returned Arc
    /// and await `lock()` on it outside of the map lock.
    pub fn lock_for(&self, meeting: MeetingId) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.inner.lock().expect("meeting lock map poisoned");
        Arc::clone(map.entry(meeting).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_meeting_shares_a_lock() {
        let locks = MeetingLocks::new();
        let a = locks.lock_for(MeetingId(1));
        let b = locks.lock_for(MeetingId(1));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_different_meetings_get_independent_locks() {
        let locks = MeetingLocks::new();
        let a = locks.lock_for(MeetingId(1));
        let b = locks.lock_for(MeetingId(2));
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_lock_serializes_critical_section() {
        let locks = Arc::new(MeetingLocks::new());
        let counter = Arc::new(std::sync::atomic::AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let lock = locks.lock_for(MeetingId(9));
                let _guard = lock.lock().await;
                let seen = counter.load(std::sync::atomic::Ordering::SeqCst);
                tokio::task::yield_now().await;
                counter.store(seen + 1, std::sync::atomic::Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 8);
    }
}
