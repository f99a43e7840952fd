//! Lazy selector scans over the world state

use medblock_domain::{LedgerError, Selector};
use rusqlite::{params, Connection};
use serde_json::Value;
use std::collections::VecDeque;

const BATCH_SIZE: usize = 64;

/// Single-pass iterator over committed documents matching a selector
///
/// Rows are visited in commit order (sequence of the last write, then key)
/// and fetched from SQLite in small batches, so a scan never loads the whole
/// world state. Values that are not JSON objects can never match a selector
/// and are passed over.
pub struct StateScan<'a> {
    conn: &'a Connection,
    selector: Selector,
    cursor: (i64, String),
    buffer: VecDeque<(String, Vec<u8>)>,
    exhausted: bool,
}

impl<'a> StateScan<'a> {
    pub(crate) fn new(conn: &'a Connection, selector: Selector) -> Self {
        Self {
            conn,
            selector,
            cursor: (0, String::new()),
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    fn fetch_batch(&mut self) -> Result<(), rusqlite::Error> {
        let conn = self.conn;
        let mut stmt = conn.prepare(
            "SELECT seq, key, value FROM world_state
             WHERE seq > ?1 OR (seq = ?1 AND key > ?2)
             ORDER BY seq, key
             LIMIT ?3",
        )?;
        let rows = stmt.query_map(
            params![self.cursor.0, &self.cursor.1, BATCH_SIZE as i64],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Vec<u8>>(2)?,
                ))
            },
        )?;

        let mut fetched = 0;
        for row in rows {
            let (seq, key, value) = row?;
            fetched += 1;
            self.cursor = (seq, key.clone());

            let matched = serde_json::from_slice::<Value>(&value)
                .map(|doc| self.selector.matches(&doc))
                .unwrap_or(false);
            if matched {
                self.buffer.push_back((key, value));
            }
        }

        if fetched < BATCH_SIZE {
            self.exhausted = true;
        }
        Ok(())
    }
}

impl Iterator for StateScan<'_> {
    type Item = Result<(String, Vec<u8>), LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.exhausted {
                return None;
            }
            if let Err(e) = self.fetch_batch() {
                self.exhausted = true;
                return Some(Err(LedgerError::Backend(e.to_string())));
            }
        }
    }
}
