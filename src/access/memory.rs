//! In-memory scripted cursor provider.
//!
//! Results are registered per statement text. Opening a statement that has no
//! registered result fails the same way a real transport fails on malformed
//! text, which keeps the translator output honest in tests.

use crate::access::{Cursor, CursorProvider, Row};
use crate::translator::Statement;
use anyhow::{anyhow, bail, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Counters describing what the provider has been asked to do
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderStats {
    /// Statement texts in the order they were opened
    pub executed: Vec<String>,
    pub opened: usize,
    pub closed: usize,
    pub rows_read: usize,
}

impl ProviderStats {
    /// Number of cursors that were opened but not yet closed
    pub fn open_cursors(&self) -> usize {
        self.opened - self.closed
    }
}

#[derive(Debug, Clone)]
enum Script {
    Rows {
        rows: Vec<Row>,
        /// Error raised by the read that follows the last row
        read_error: Option<String>,
    },
    FailOpen(String),
}

/// Provider that answers statements from registered fixtures
#[derive(Default)]
pub struct MemoryProvider {
    scripts: RwLock<HashMap<String, Script>>,
    stats: Arc<Mutex<ProviderStats>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rows returned for `statement`
    pub fn respond(self, statement: impl Into<String>, rows: Vec<Row>) -> Self {
        self.script(
            statement,
            Script::Rows {
                rows,
                read_error: None,
            },
        )
    }

    /// Register rows after which the next read fails with `message`
    pub fn respond_then_fail(
        self,
        statement: impl Into<String>,
        rows: Vec<Row>,
        message: impl Into<String>,
    ) -> Self {
        self.script(
            statement,
            Script::Rows {
                rows,
                read_error: Some(message.into()),
            },
        )
    }

    /// Make opening `statement` fail with `message`
    pub fn fail_open(self, statement: impl Into<String>, message: impl Into<String>) -> Self {
        self.script(statement, Script::FailOpen(message.into()))
    }

    pub fn stats(&self) -> ProviderStats {
        self.stats.lock().clone()
    }

    fn script(self, statement: impl Into<String>, script: Script) -> Self {
        self.scripts.write().insert(statement.into(), script);
        self
    }
}

impl CursorProvider for MemoryProvider {
    fn open(&self, statement: &Statement) -> Result<Box<dyn Cursor>> {
        let script = self
            .scripts
            .read()
            .get(statement.as_str())
            .cloned()
            .ok_or_else(|| anyhow!("No result registered for statement: {}", statement))?;

        let (rows, read_error) = match script {
            Script::Rows { rows, read_error } => (rows, read_error),
            Script::FailOpen(message) => bail!("{}", message),
        };

        let mut stats = self.stats.lock();
        stats.executed.push(statement.as_str().to_string());
        stats.opened += 1;

        Ok(Box::new(MemoryCursor {
            rows: rows.into_iter(),
            read_error,
            closed: false,
            stats: self.stats.clone(),
        }))
    }
}

struct MemoryCursor {
    rows: std::vec::IntoIter<Row>,
    read_error: Option<String>,
    closed: bool,
    stats: Arc<Mutex<ProviderStats>>,
}

impl Cursor for MemoryCursor {
    fn next_row(&mut self) -> Result<Option<Row>> {
        if self.closed {
            bail!("Cursor is closed");
        }

        match self.rows.next() {
            Some(row) => {
                self.stats.lock().rows_read += 1;
                Ok(Some(row))
            }
            None => match self.read_error.take() {
                Some(message) => bail!("{}", message),
                None => Ok(None),
            },
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.stats.lock().closed += 1;
        }
    }
}
