//! Expression IR for predicates and projections.
//!
//! This module provides:
//! - The immutable expression tree built by the query layer
//! - Binary and unary operator definitions

pub mod expr;
pub mod operator;

pub use expr::{Constant, Expression};
pub use operator::{BinaryOperator, UnaryOperator};
