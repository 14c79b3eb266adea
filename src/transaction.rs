//! Per-client transaction counter and last-error bookkeeping.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

/// HTTP error observed by a client, as recorded in its error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatusError {
    /// HTTP status code.
    pub number: i32,
    /// Response body text.
    pub message: String,
}

/// Mutable state shared by all handles of one client.
///
/// The transaction ID starts at `0`. It's only ever advanced by
/// [`next_transaction_id`](Self::next_transaction_id), which is called exactly
/// once per PUT. Concurrent PUTs get distinct IDs, but nothing orders the
/// corresponding requests on the wire.
///
/// The last error is overwritten on each HTTP error status and never cleared, so
/// it describes the most recent failure rather than the state of the last call.
#[derive(Debug, Default)]
pub(crate) struct TransactionState {
    transaction_id: AtomicU32,
    last_error: Mutex<Option<HttpStatusError>>,
}

impl TransactionState {
    pub(crate) fn current_transaction_id(&self) -> u32 {
        self.transaction_id.load(Ordering::SeqCst)
    }

    pub(crate) fn next_transaction_id(&self) -> u32 {
        self.transaction_id
            .fetch_add(1, Ordering::SeqCst)
            .wrapping_add(1)
    }

    pub(crate) fn record_error(&self, number: i32, message: String) {
        let mut last_error = self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *last_error = Some(HttpStatusError { number, message });
    }

    pub(crate) fn last_error(&self) -> Option<HttpStatusError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn starts_at_zero() {
        let state = TransactionState::default();
        assert_eq!(state.current_transaction_id(), 0);
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn next_increments_by_one() {
        let state = TransactionState::default();
        assert_eq!(state.next_transaction_id(), 1);
        assert_eq!(state.next_transaction_id(), 2);
        assert_eq!(state.current_transaction_id(), 2);
    }

    #[test]
    fn last_error_is_overwritten() {
        let state = TransactionState::default();
        state.record_error(400, "bad device number".to_owned());
        state.record_error(500, "boom".to_owned());
        assert_eq!(
            state.last_error(),
            Some(HttpStatusError {
                number: 500,
                message: "boom".to_owned(),
            })
        );
    }

    #[test]
    fn concurrent_increments_are_unique() {
        let state = Arc::new(TransactionState::default());

        let handles = (0..8)
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| state.next_transaction_id())
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("thread panicked") {
                assert!(seen.insert(id), "duplicate transaction ID {id}");
            }
        }
        assert_eq!(seen.len(), 800);
        assert_eq!(state.current_transaction_id(), 800);
    }
}
