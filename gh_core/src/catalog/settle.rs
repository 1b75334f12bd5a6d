//! Settle-all fan-out for catalog queries.
//!
//! Each future runs on its own task. A failing or panicking task yields its
//! own [`Settled`] outcome; it never cancels or fails its siblings. Outcomes
//! come back in input order.

use std::future::Future;

use crate::errors::{CalcError, CalcResult};

/// Outcome of one settled task.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    /// The task completed and the query succeeded
    Ok(T),
    /// The query returned an error
    Failed(CalcError),
    /// The task panicked or was cancelled
    Aborted(String),
}

/// Run every future concurrently and collect each outcome.
pub async fn settle_all<T, F>(futures: Vec<F>) -> Vec<Settled<T>>
where
    T: Send + 'static,
    F: Future<Output = CalcResult<T>> + Send + 'static,
{
    let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        let outcome = match handle.await {
            Ok(Ok(value)) => Settled::Ok(value),
            Ok(Err(err)) => Settled::Failed(err),
            Err(join_err) => Settled::Aborted(join_err.to_string()),
        };
        outcomes.push(outcome);
    }
    outcomes
}
