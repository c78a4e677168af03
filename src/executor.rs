//! Executor layer for query execution.
//!
//! This module turns statement text into records. The materializer opens a
//! cursor against the provider and owns it; the enumerator drives it one row
//! at a time, decoding each row through the record's schema descriptor, so
//! the result set is never held in memory as a whole.

pub mod enumerator;
pub mod materializer;

pub use enumerator::{CursorState, EntityEnumerator};
pub use materializer::{open, CursorHandle};
