//! Batch helpers
//!
//! - [`process_in_chunks`]: bounded concurrency, one chunk at a time
//! - [`run_sequential`]: one item at a time, failures collected not raised

use std::fmt;
use std::future::Future;

use futures::future::join_all;

use crate::error::PhoenixError;

/// Run `worker` over `items` in contiguous chunks of at most `chunk_size`.
///
/// Items within a chunk run concurrently and the whole chunk completes before
/// the next one starts. A failing item does not cancel its siblings; its error
/// lands in its own slot. Results are in input order.
pub async fn process_in_chunks<T, R, E, F, Fut>(
    items: Vec<T>,
    worker: F,
    chunk_size: usize,
) -> Result<Vec<Result<R, E>>, PhoenixError>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    if chunk_size == 0 {
        return Err(PhoenixError::InvalidParameter(
            "chunk_size must be greater than zero".into(),
        ));
    }

    let total = items.len();
    let mut results = Vec::with_capacity(total);
    let mut remaining = items.into_iter().peekable();
    let mut chunk_index = 0usize;

    while remaining.peek().is_some() {
        let chunk: Vec<T> = remaining.by_ref().take(chunk_size).collect();
        tracing::trace!(chunk = chunk_index, size = chunk.len(), total, "processing chunk");
        results.extend(join_all(chunk.into_iter().map(&worker)).await);
        chunk_index += 1;
    }

    Ok(results)
}

/// One failed item of a sequential batch.
#[derive(Debug, Clone)]
pub struct BatchFailure<K, E> {
    pub item: K,
    pub error: E,
}

/// Outcome of [`run_sequential`].
#[derive(Debug, Clone)]
pub struct BatchReport<K, E> {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<BatchFailure<K, E>>,
}

impl<K, E> Default for BatchReport<K, E> {
    fn default() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }
}

impl<K, E> BatchReport<K, E> {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }
}

impl<K: fmt::Debug, E: fmt::Display> fmt::Display for BatchReport<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} succeeded, {} failed", self.succeeded, self.failed)?;
        for failure in &self.failures {
            write!(f, "\n  {:?}: {}", failure.item, failure.error)?;
        }
        Ok(())
    }
}

/// Apply `operation` to each item in order, never more than one in flight.
/// Every item is attempted regardless of earlier failures.
pub async fn run_sequential<T, R, E, F, Fut>(items: Vec<T>, mut operation: F) -> BatchReport<T, E>
where
    T: Clone,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: fmt::Display,
{
    let mut report = BatchReport::default();
    for item in items {
        match operation(item.clone()).await {
            Ok(_) => report.succeeded += 1,
            Err(error) => {
                tracing::debug!(err = %error, "batch item failed");
                report.failed += 1;
                report.failures.push(BatchFailure { item, error });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn chunks_bound_concurrency_and_keep_order() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let calls = Arc::new(AtomicUsize::new(0));
        let items: Vec<u32> = (1..=23).collect();

        let results = process_in_chunks(
            items,
            |n| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    // Later items finish first to catch ordering bugs.
                    tokio::time::sleep(Duration::from_millis(50 - n as u64)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    if n % 7 == 0 { Err(format!("item {n}")) } else { Ok(n * 10) }
                }
            },
            5,
        )
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 23);
        assert_eq!(results.len(), 23);
        assert!(peak.load(Ordering::SeqCst) <= 5);
        assert_eq!(peak.load(Ordering::SeqCst), 5);
        for (i, result) in results.iter().enumerate() {
            let n = i as u32 + 1;
            if n % 7 == 0 {
                assert_eq!(result, &Err(format!("item {n}")));
            } else {
                assert_eq!(result, &Ok(n * 10));
            }
        }
    }

    #[tokio::test]
    async fn zero_chunk_size_is_rejected() {
        let result = process_in_chunks(vec![1], |n: i32| async move { Ok::<_, ()>(n) }, 0).await;
        assert!(matches!(result, Err(PhoenixError::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let result = process_in_chunks(Vec::<i32>::new(), |n| async move { Ok::<_, ()>(n) }, 3)
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn sequential_collects_failures_without_stopping() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let report = run_sequential(vec!["a", "b", "c", "d"], |name| {
            let order = order.clone();
            async move {
                order.lock().unwrap().push(name);
                if name == "b" || name == "d" { Err(format!("{name} rejected")) } else { Ok(()) }
            }
        })
        .await;

        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c", "d"]);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.total(), 4);
        assert!(!report.is_complete_success());
        let failed: Vec<_> = report.failures.iter().map(|f| (f.item, f.error.as_str())).collect();
        assert_eq!(failed, vec![("b", "b rejected"), ("d", "d rejected")]);
        assert!(report.to_string().starts_with("2 succeeded, 2 failed"));
    }
}
