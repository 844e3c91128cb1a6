// src/db/rows.rs
// DOCUMENTATION: Collects a row stream into typed records
// PURPOSE: Classify failures by the stage of retrieval they happened in

use crate::deadline::Deadline;
use crate::errors::PostsError;
use futures::{Stream, StreamExt};

const DEADLINE_EXCEEDED: &str = "deadline exceeded";

/// Drain `rows`, decoding each one, until the stream ends or fails.
///
/// Failure stages:
/// - nothing delivered yet (statement rejected, pool closed, no connection
///   before the deadline): `QueryError`
/// - a row that does not decode: `ScanError`
/// - the stream breaks after at least one row: `RowsError`
///
/// Any failure discards the rows collected so far.
pub async fn collect_rows<S, R, T, F>(
    mut rows: S,
    deadline: &Deadline,
    mut decode: F,
) -> Result<Vec<T>, PostsError>
where
    S: Stream<Item = Result<R, sqlx::Error>> + Unpin,
    F: FnMut(&R) -> Result<T, sqlx::Error>,
{
    let mut records = Vec::with_capacity(16);
    let mut started = false;

    loop {
        let next = match deadline.run(rows.next()).await {
            Ok(next) => next,
            Err(_) => return Err(stage_error(started, DEADLINE_EXCEEDED.to_string())),
        };

        match next {
            None => return Ok(records),
            Some(Err(e)) => return Err(stage_error(started, e.to_string())),
            Some(Ok(row)) => {
                started = true;
                let record = decode(&row).map_err(|e| PostsError::ScanError(e.to_string()))?;
                records.push(record);
            }
        }
    }
}

fn stage_error(started: bool, detail: String) -> PostsError {
    if started {
        PostsError::RowsError(detail)
    } else {
        PostsError::QueryError(detail)
    }
}
