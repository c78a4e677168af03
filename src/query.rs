//! Query roots and single-operation queries.
//!
//! An [`EntitySet`] binds a record type to a table name and a cursor
//! provider. Calling `filter` or `project` on it yields a [`Query`] carrying
//! exactly one operation; executing the query translates it and hands back a
//! lazy enumerator.

use crate::access::CursorProvider;
use crate::config::QueryConfig;
use crate::error::QueryResult;
use crate::executor::EntityEnumerator;
use crate::expression::Expression;
use crate::schema::Entity;
use crate::translator::{QueryOperation, Statement, Translator};
use std::marker::PhantomData;
use std::sync::Arc;

/// Query root for records of type `T` stored in one table
pub struct EntitySet<T: Entity> {
    table_name: String,
    provider: Arc<dyn CursorProvider>,
    config: QueryConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> EntitySet<T> {
    pub fn new(table_name: impl Into<String>, provider: Arc<dyn CursorProvider>) -> Self {
        Self {
            table_name: table_name.into(),
            provider,
            config: QueryConfig::default(),
            _marker: PhantomData,
        }
    }

    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Build a query keeping rows that match `predicate`
    pub fn filter(&self, predicate: Expression) -> Query<T> {
        self.query(QueryOperation::Filter(predicate))
    }

    /// Build a query shaping rows with `projection`
    pub fn project(&self, projection: Expression) -> Query<T> {
        self.query(QueryOperation::Project(projection))
    }

    fn query(&self, operation: QueryOperation) -> Query<T> {
        Query {
            table_name: self.table_name.clone(),
            provider: self.provider.clone(),
            config: self.config.clone(),
            operation,
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> Clone for EntitySet<T> {
    fn clone(&self) -> Self {
        Self {
            table_name: self.table_name.clone(),
            provider: self.provider.clone(),
            config: self.config.clone(),
            _marker: PhantomData,
        }
    }
}

/// A query with exactly one operation attached
pub struct Query<T: Entity> {
    table_name: String,
    provider: Arc<dyn CursorProvider>,
    config: QueryConfig,
    operation: QueryOperation,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Query<T> {
    pub fn operation(&self) -> &QueryOperation {
        &self.operation
    }

    /// Render the statement this query would run
    pub fn statement(&self) -> QueryResult<Statement> {
        Translator::new(self.config.translator.clone()).translate(&self.table_name, &self.operation)
    }

    /// Translate the query and return an enumerator that has not run yet
    pub fn execute(&self) -> QueryResult<EntityEnumerator<T>> {
        let statement = self.statement()?;
        Ok(EntityEnumerator::new(
            self.provider.clone(),
            statement,
            self.config.mismatch_policy,
        ))
    }

    /// Run the query and collect every record
    pub fn to_vec(&self) -> QueryResult<Vec<T>> {
        self.execute()?.collect()
    }
}
