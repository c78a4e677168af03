//! Collaborator contracts for the row source.
//!
//! The core never talks to a transport directly. It asks a [`CursorProvider`]
//! to open a [`Cursor`] for a statement and pulls rows from it one at a time.

use crate::access::Row;
use crate::translator::Statement;
use anyhow::Result;

/// Something that can run statement text and hand back a forward-only cursor
pub trait CursorProvider: Send + Sync {
    /// Execute `statement` and return a cursor over its rows.
    fn open(&self, statement: &Statement) -> Result<Box<dyn Cursor>>;
}

/// Forward-only, single-pass handle over the rows of one statement
pub trait Cursor: Send {
    /// Get the next row. Returns None at end of data.
    fn next_row(&mut self) -> Result<Option<Row>>;

    /// Release the cursor and any connection-like handle behind it.
    /// Must be safe to call more than once.
    fn close(&mut self);
}
