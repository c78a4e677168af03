//! Access layer for row-oriented data sources.
//!
//! This module provides the pieces the core needs from the outside world:
//!
//! - **Value / DataType**: scalar values carried by result rows
//! - **Row**: a column-name keyed result row
//! - **CursorProvider / Cursor**: the contract a transport implements
//! - **MemoryProvider**: a scripted in-memory provider for tests and embedding

pub mod cursor;
pub mod memory;
pub mod row;
pub mod value;

pub use cursor::{Cursor, CursorProvider};
pub use memory::{MemoryProvider, ProviderStats};
pub use row::Row;
pub use value::{DataType, Value};
