//! Identifier generation.
//!
//! Case, party and directory identifiers are a fixed prefix plus a
//! zero-padded sequence (`CASE001`, `CA014`, `LF002`). The next value is derived from the highest existing
//! suffix, so it must be computed on the same connection call as the insert.

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore as _};

pub const CASE_PREFIX: &str = "CASE";
pub const ACCUSED_PREFIX: &str = "CA";
pub const COMPLAINANT_PREFIX: &str = "CC";
pub const LAW_FIRM_PREFIX: &str = "LF";
pub const ADVOCATE_PREFIX: &str = "ADV";

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Next sequential identifier for `prefix` in `table.column`.
pub fn next_sequential(
  conn: &rusqlite::Connection,
  table: &str,
  column: &str,
  prefix: &str,
) -> rusqlite::Result<String> {
  let sql = format!(
    "SELECT COALESCE(MAX(CAST(SUBSTR({column}, ?1) AS INTEGER)), 0)
     FROM {table} WHERE {column} LIKE ?2"
  );
  let max: i64 = conn.query_row(
    &sql,
    rusqlite::params![prefix.len() as i64 + 1, format!("{prefix}%")],
    |r| r.get(0),
  )?;
  Ok(sequential(prefix, max + 1))
}

pub fn sequential(prefix: &str, n: i64) -> String { format!("{prefix}{n:03}") }

/// `CP_<unix-millis>_<9 random base-36 chars>`.
pub fn petition_id(now: DateTime<Utc>) -> String {
  let suffix: String = (0..9)
    .map(|_| BASE36[(OsRng.next_u32() % 36) as usize] as char)
    .collect();
  format!("CP_{}_{suffix}", now.timestamp_millis())
}
