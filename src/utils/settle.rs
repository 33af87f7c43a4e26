//! Concurrent "settle all" join.

use std::future::Future;

use futures::future::join_all;

/// Polls every future concurrently and returns all outputs in input order.
///
/// Unlike a try-join, one failing future never short-circuits the others;
/// callers get each `Result`/`Option` back to inspect individually.
pub async fn settle_all<I>(futures: I) -> Vec<<I::Item as Future>::Output>
where
    I: IntoIterator,
    I::Item: Future,
{
    join_all(futures).await
}
