// src/models/post.rs
// DOCUMENTATION: Core data structure for posts
// PURPOSE: Maps a posts table row to the JSON returned by GET /posts

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// A post as stored in the posts table
/// DOCUMENTATION: Read-only from this service's point of view; ids and
/// timestamps are assigned by the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Database-assigned identifier
    pub id: i64,

    pub title: String,

    pub body: String,

    /// Serialized as RFC 3339
    pub created_at: DateTime<Utc>,
}

/// `id` may be any integer column width. `created_at` may be `timestamptz`
/// or a zone-less `timestamp`, which is read as UTC
impl<'r> FromRow<'r, PgRow> for Post {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let created_at = match row.try_get::<DateTime<Utc>, _>("created_at") {
            Ok(ts) => ts,
            Err(sqlx::Error::ColumnDecode { .. }) => row
                .try_get::<NaiveDateTime, _>("created_at")?
                .and_utc(),
            Err(e) => return Err(e),
        };

        Ok(Post {
            id: decode_id(row)?,
            title: row.try_get("title")?,
            body: row.try_get("body")?,
            created_at,
        })
    }
}

/// Widen `int4`/`int2` ids to i64. When no integer width fits, the `int8`
/// mismatch is reported.
fn decode_id(row: &PgRow) -> Result<i64, sqlx::Error> {
    let err = match row.try_get::<i64, _>("id") {
        Ok(id) => return Ok(id),
        Err(e @ sqlx::Error::ColumnDecode { .. }) => e,
        Err(e) => return Err(e),
    };

    if let Ok(id) = row.try_get::<i32, _>("id") {
        return Ok(i64::from(id));
    }
    if let Ok(id) = row.try_get::<i16, _>("id") {
        return Ok(i64::from(id));
    }
    Err(err)
}
