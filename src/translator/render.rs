//! Node rendering.
//!
//! Every function here returns a fresh fragment; callers compose fragments
//! with `format!`/`join`, so there is no shared buffer and nothing to trim.

use crate::config::TranslatorConfig;
use crate::error::{QueryError, QueryResult};
use crate::expression::{Constant, Expression};

/// Render a single node and everything below it
pub(crate) fn render(expr: &Expression, config: &TranslatorConfig) -> QueryResult<String> {
    match expr {
        Expression::BinaryOp { op, left, right } => {
            let token = op
                .sql_token()
                .ok_or_else(|| QueryError::unsupported(expr.kind_name()))?;
            let left = render(left, config)?;
            let right = render(right, config)?;
            Ok(format!("{} {} {}", left, token, right))
        }
        Expression::UnaryWrap { operand } => render(operand, config),
        Expression::Lambda { body, .. } => render(body, config),
        Expression::MethodCall {
            qualified_name,
            args,
        } => {
            if !config.is_method_allowed(qualified_name) {
                return Err(QueryError::unsupported(expr.kind_name()));
            }
            let args = args
                .iter()
                .map(|arg| render(arg, config))
                .collect::<QueryResult<Vec<_>>>()?;
            Ok(format!("{}({})", qualified_name, args.join(", ")))
        }
        Expression::MemberAccess { name } => Ok(name.clone()),
        Expression::Constant(constant) => render_constant(constant, config),
        Expression::UnaryOp { .. } | Expression::Parameter { .. } => {
            Err(QueryError::unsupported(expr.kind_name()))
        }
    }
}

fn render_constant(constant: &Constant, config: &TranslatorConfig) -> QueryResult<String> {
    match constant {
        Constant::String(s) => Ok(quote_literal(s)),
        Constant::Integer(i) => Ok(i.to_string()),
        Constant::Float(f) if f.is_finite() => Ok(format!("{:?}", f)),
        Constant::Float(f) => Err(QueryError::unsupported(format!(
            "non-finite float constant {}",
            f
        ))),
        Constant::Boolean(true) => Ok("TRUE".to_string()),
        Constant::Boolean(false) => Ok("FALSE".to_string()),
        Constant::Expression(inner) => render(inner, config),
    }
}

/// Wrap `s` in single quotes, doubling any embedded quote
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
