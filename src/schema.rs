//! Record schemas.
//!
//! A record type describes its columns once through [`Entity::describe`].
//! The descriptor is resolved lazily on first use and cached for the life of
//! the process, so decoding a row never looks anything up by type at runtime
//! beyond the column names themselves.
//!
//! ```
//! use entityquery::impl_entity;
//! use entityquery::schema::Entity;
//!
//! #[derive(Debug, Default)]
//! pub struct Customer {
//!     pub id: i32,
//!     pub name: String,
//!     pub age: i32,
//! }
//!
//! impl_entity!(Customer { id => "ID", name => "NAME", age => "AGE" });
//!
//! assert_eq!(Customer::schema().column_names(), vec!["ID", "NAME", "AGE"]);
//! ```

pub mod descriptor;
pub mod field;
pub mod registry;

use std::sync::Arc;

pub use descriptor::{ColumnBinding, SchemaBuilder, SchemaDescriptor};
pub use field::FromValue;
pub use registry::resolve;

/// A record type rows can be decoded into
pub trait Entity: Default + Sized + 'static {
    /// Declare the column bindings of this type
    fn describe() -> SchemaDescriptor<Self>;

    /// Get the cached descriptor for this type
    fn schema() -> Arc<SchemaDescriptor<Self>> {
        registry::resolve::<Self>()
    }
}

/// Implement [`Entity`] for a struct by listing its fields.
///
/// A field maps to the column of the same name unless a column name is
/// given with `field => "COLUMN"`.
#[macro_export]
macro_rules! impl_entity {
    (@column $field:ident) => {
        stringify!($field)
    };
    (@column $field:ident $column:literal) => {
        $column
    };
    ($ty:ty { $($field:ident $(=> $column:literal)?),* $(,)? }) => {
        impl $crate::schema::Entity for $ty {
            fn describe() -> $crate::schema::SchemaDescriptor<Self> {
                $crate::schema::SchemaDescriptor::<Self>::builder()
                    $(.column(
                        $crate::impl_entity!(@column $field $($column)?),
                        |record| &mut record.$field,
                    ))*
                    .build()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{DataType, Row, Value};
    use crate::error::QueryResult;

    #[derive(Debug, Default, PartialEq)]
    struct Customer {
        id: i32,
        name: String,
        age: i32,
    }

    crate::impl_entity!(Customer { id => "ID", name => "NAME", age => "AGE" });

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        owner: String,
        balance: f64,
        active: bool,
        closed_at: Option<i64>,
    }

    crate::impl_entity!(Account {
        owner,
        balance,
        active,
        closed_at,
    });

    #[test]
    fn test_macro_with_column_names() {
        let schema = Customer::schema();
        assert_eq!(schema.column_names(), vec!["ID", "NAME", "AGE"]);
        assert_eq!(schema.columns()[0].data_type(), DataType::Int32);
    }

    #[test]
    fn test_macro_defaults_to_field_names() {
        let schema = Account::schema();
        assert_eq!(
            schema.column_names(),
            vec!["owner", "balance", "active", "closed_at"]
        );
        assert_eq!(schema.columns()[3].data_type(), DataType::Int64);
    }

    #[test]
    fn test_decode_through_cached_schema() -> QueryResult<()> {
        let row = Row::new()
            .with("ID", 6)
            .with("NAME", Value::Null)
            .with("AGE", 41);
        let customer = Customer::schema().decode(&row)?;
        assert_eq!(
            customer,
            Customer {
                id: 6,
                name: String::new(),
                age: 41,
            }
        );

        let account = Account::schema().decode(
            &Row::new()
                .with("owner", "alice")
                .with("balance", 10)
                .with("active", true),
        )?;
        assert_eq!(account.owner, "alice");
        assert_eq!(account.balance, 10.0);
        assert!(account.active);
        assert_eq!(account.closed_at, None);
        Ok(())
    }

    #[test]
    fn test_schema_is_shared() {
        assert!(Arc::ptr_eq(&Customer::schema(), &resolve::<Customer>()));
    }
}
