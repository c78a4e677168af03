//! IR to statement text translation.
//!
//! Translation is a pure function of the table name, the operation and the
//! translator config: the same inputs always give byte-identical text, and a
//! node the translator cannot render fails the whole call instead of being
//! dropped.

use crate::config::TranslatorConfig;
use crate::error::QueryResult;
use crate::expression::Expression;
use log::debug;

mod render;
pub mod statement;

pub use render::quote_literal;
pub use statement::Statement;

/// The single operation attached to a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperation {
    /// Keep rows matching the predicate
    Filter(Expression),
    /// Shape rows; the projection itself is not rendered
    Project(Expression),
}

impl QueryOperation {
    pub fn expression(&self) -> &Expression {
        match self {
            QueryOperation::Filter(expr) | QueryOperation::Project(expr) => expr,
        }
    }
}

/// Renders query operations into statement text
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate `operation` against `table_name`
    pub fn translate(
        &self,
        table_name: &str,
        operation: &QueryOperation,
    ) -> QueryResult<Statement> {
        let text = match operation {
            QueryOperation::Filter(predicate) => {
                let predicate = render::render(predicate, &self.config)?;
                format!("SELECT * FROM {} WHERE {}", table_name, predicate)
            }
            QueryOperation::Project(projection) => {
                // Rendered only so that unsupported nodes still fail.
                render::render(projection, &self.config)?;
                format!("SELECT * FROM {}", table_name)
            }
        };

        debug!("Translated query on {}: {}", table_name, text);
        Ok(Statement::new(text))
    }
}

/// Translate with the default configuration
pub fn translate(table_name: &str, operation: &QueryOperation) -> QueryResult<Statement> {
    Translator::default().translate(table_name, operation)
}
