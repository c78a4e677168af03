//! Declarative column to field mapping for a record type.

use crate::access::{DataType, Row, Value};
use crate::error::{QueryError, QueryResult};
use crate::schema::field::FromValue;

type Setter<T> = Box<dyn Fn(&mut T, &Value) -> bool + Send + Sync>;

/// One column bound to one field of `T`
pub struct ColumnBinding<T> {
    column: String,
    data_type: DataType,
    setter: Setter<T>,
}

impl<T> ColumnBinding<T> {
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Declared type of the bound field
    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl<T> std::fmt::Debug for ColumnBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnBinding")
            .field("column", &self.column)
            .field("data_type", &self.data_type)
            .finish()
    }
}

/// Ordered set of column bindings for a record type
#[derive(Debug)]
pub struct SchemaDescriptor<T> {
    columns: Vec<ColumnBinding<T>>,
}

impl<T> SchemaDescriptor<T> {
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder {
            columns: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnBinding<T>] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<T: Default> SchemaDescriptor<T> {
    /// Decode a row into a fresh record.
    ///
    /// Columns that are absent from the row or null leave the field at its
    /// default. Columns the descriptor does not know are ignored.
    pub fn decode(&self, row: &Row) -> QueryResult<T> {
        let mut record = T::default();

        for binding in &self.columns {
            let Some(value) = row.get(&binding.column) else {
                continue;
            };
            let Some(actual) = value.data_type() else {
                continue;
            };

            if !(binding.setter)(&mut record, value) {
                return Err(QueryError::SchemaMismatch {
                    column: binding.column.clone(),
                    expected: binding.data_type,
                    actual,
                });
            }
        }

        Ok(record)
    }
}

/// Builder collecting column bindings in declaration order
pub struct SchemaBuilder<T> {
    columns: Vec<ColumnBinding<T>>,
}

impl<T: 'static> SchemaBuilder<T> {
    /// Bind `column` to the field reached through `accessor`
    pub fn column<F: FromValue + 'static>(
        mut self,
        column: impl Into<String>,
        accessor: fn(&mut T) -> &mut F,
    ) -> Self {
        let setter = move |record: &mut T, value: &Value| match F::from_value(value) {
            Some(decoded) => {
                *accessor(record) = decoded;
                true
            }
            None => false,
        };

        self.columns.push(ColumnBinding {
            column: column.into(),
            data_type: F::DATA_TYPE,
            setter: Box::new(setter),
        });
        self
    }

    /// Finish the descriptor.
    ///
    /// # Panics
    /// If two bindings share a column name. Descriptors are declared in code,
    /// so this is a programming error in the record declaration.
    pub fn build(self) -> SchemaDescriptor<T> {
        for (i, binding) in self.columns.iter().enumerate() {
            assert!(
                !self.columns[..i].iter().any(|c| c.column == binding.column),
                "Duplicate column '{}' in schema descriptor",
                binding.column
            );
        }
        SchemaDescriptor {
            columns: self.columns,
        }
    }
}
