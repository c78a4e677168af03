//! Cursor materializer.
//!
//! Opens a statement against a provider and wraps the resulting cursor in a
//! handle that releases it exactly once: on explicit `close`, or on drop.

use crate::access::{Cursor, CursorProvider, Row};
use crate::error::{QueryError, QueryResult};
use crate::translator::Statement;
use log::debug;

/// Exclusively owned handle over an open cursor
pub struct CursorHandle {
    statement: Statement,
    cursor: Box<dyn Cursor>,
    closed: bool,
}

impl CursorHandle {
    /// Read the next row. Returns None at end of data.
    pub fn read(&mut self) -> QueryResult<Option<Row>> {
        if self.closed {
            return Ok(None);
        }
        self.cursor
            .next_row()
            .map_err(|e| QueryError::execution(format!("reading `{}`", self.statement), e))
    }

    /// Release the cursor. Later calls are no-ops.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.cursor.close();
            debug!("Closed cursor for: {}", self.statement);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }
}

impl Drop for CursorHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Execute `statement` and return a handle over its rows
pub fn open(provider: &dyn CursorProvider, statement: &Statement) -> QueryResult<CursorHandle> {
    let cursor = provider
        .open(statement)
        .map_err(|e| QueryError::execution(format!("opening `{}`", statement), e))?;
    debug!("Opened cursor for: {}", statement);

    Ok(CursorHandle {
        statement: statement.clone(),
        cursor,
        closed: false,
    })
}
