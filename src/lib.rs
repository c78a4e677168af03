pub mod access;
pub mod config;
pub mod error;
pub mod executor;
pub mod expression;
pub mod query;
pub mod schema;
pub mod translator;

pub use error::{QueryError, QueryResult};
pub use query::{EntitySet, Query};
