//! Coercions from row values into record field types.

use crate::access::{DataType, Value};

/// A field type a row value can be decoded into
pub trait FromValue: Sized {
    /// Data type the field is declared as
    const DATA_TYPE: DataType;

    /// Coerce a non-null value, or None if the coercion is impossible
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const DATA_TYPE: DataType = DataType::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const DATA_TYPE: DataType = DataType::Int32;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int32(i) => Some(*i),
            Value::Int64(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const DATA_TYPE: DataType = DataType::Int64;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int32(i) => Some(i64::from(*i)),
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const DATA_TYPE: DataType = DataType::Float64;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int32(i) => Some(f64::from(*i)),
            Value::Int64(i) => Some(*i as f64),
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }
}

impl FromValue for String {
    const DATA_TYPE: DataType = DataType::Varchar;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl<F: FromValue> FromValue for Option<F> {
    const DATA_TYPE: DataType = F::DATA_TYPE;

    fn from_value(value: &Value) -> Option<Self> {
        F::from_value(value).map(Some)
    }
}
