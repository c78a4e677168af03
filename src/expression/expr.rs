//! Expression IR definitions.

use crate::expression::operator::{BinaryOperator, UnaryOperator};

/// Value carried by a constant node
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// A constant that wraps another expression, e.g. a quoted lambda
    Expression(Box<Expression>),
}

impl From<&str> for Constant {
    fn from(value: &str) -> Self {
        Constant::String(value.to_string())
    }
}

impl From<String> for Constant {
    fn from(value: String) -> Self {
        Constant::String(value)
    }
}

impl From<i32> for Constant {
    fn from(value: i32) -> Self {
        Constant::Integer(value.into())
    }
}

impl From<i64> for Constant {
    fn from(value: i64) -> Self {
        Constant::Integer(value)
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Constant::Float(value)
    }
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        Constant::Boolean(value)
    }
}

impl From<Expression> for Constant {
    fn from(value: Expression) -> Self {
        Constant::Expression(Box::new(value))
    }
}

/// Expression tree node.
///
/// Trees are built once and never mutated; the translator walks them by
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Unary operation with its own semantics (NOT, negation)
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Transparent wrapper such as a conversion or quote
    UnaryWrap { operand: Box<Expression> },

    /// Lambda; only its body matters for rendering
    Lambda {
        param_name: String,
        body: Box<Expression>,
    },

    /// Method call with a fully qualified name
    MethodCall {
        qualified_name: String,
        args: Vec<Expression>,
    },

    /// Member access, rendered as the column of the same name
    MemberAccess { name: String },

    /// Reference to a lambda parameter itself
    Parameter { name: String },

    /// Literal constant value
    Constant(Constant),
}

impl Expression {
    /// Create a binary operation expression
    pub fn binary_op(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a unary operation expression
    pub fn unary_op(op: UnaryOperator, operand: Expression) -> Self {
        Expression::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn wrap(operand: Expression) -> Self {
        Expression::UnaryWrap {
            operand: Box::new(operand),
        }
    }

    pub fn lambda(param_name: impl Into<String>, body: Expression) -> Self {
        Expression::Lambda {
            param_name: param_name.into(),
            body: Box::new(body),
        }
    }

    pub fn call(qualified_name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::MethodCall {
            qualified_name: qualified_name.into(),
            args,
        }
    }

    pub fn member(name: impl Into<String>) -> Self {
        Expression::MemberAccess { name: name.into() }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Expression::Parameter { name: name.into() }
    }

    pub fn constant(value: impl Into<Constant>) -> Self {
        Expression::Constant(value.into())
    }

    /// Create an equality expression
    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Eq, left, right)
    }

    /// Create a less-than expression
    pub fn lt(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Lt, left, right)
    }

    /// Create a greater-than expression
    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Gt, left, right)
    }

    /// Create an OR expression
    pub fn or(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Or, left, right)
    }

    /// Create a short-circuit OR expression
    pub fn or_else(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::OrElse, left, right)
    }

    /// Create an AND expression
    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::And, left, right)
    }

    /// Short human-readable name of this node's kind, used in error reports
    pub fn kind_name(&self) -> String {
        match self {
            Expression::BinaryOp { op, .. } => format!("binary operator {}", op.as_str()),
            Expression::UnaryOp { op, .. } => format!("unary operator {}", op.as_str()),
            Expression::UnaryWrap { .. } => "unary wrapper".to_string(),
            Expression::Lambda { .. } => "lambda".to_string(),
            Expression::MethodCall { qualified_name, .. } => {
                format!("method call {}", qualified_name)
            }
            Expression::MemberAccess { .. } => "member access".to_string(),
            Expression::Parameter { name } => format!("parameter {}", name),
            Expression::Constant(_) => "constant".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_conversions() {
        assert_eq!(Constant::from("co"), Constant::String("co".to_string()));
        assert_eq!(Constant::from(30), Constant::Integer(30));
        assert_eq!(Constant::from(30i64), Constant::Integer(30));
        assert_eq!(Constant::from(1.5), Constant::Float(1.5));
        assert_eq!(Constant::from(true), Constant::Boolean(true));
        assert_eq!(
            Constant::from(Expression::member("Name")),
            Constant::Expression(Box::new(Expression::member("Name")))
        );
    }

    #[test]
    fn test_expression_builders() {
        let expr = Expression::lambda(
            "a",
            Expression::eq(Expression::member("NAME"), Expression::constant("code6421")),
        );
        match &expr {
            Expression::Lambda { param_name, body } => {
                assert_eq!(param_name, "a");
                assert!(matches!(
                    **body,
                    Expression::BinaryOp {
                        op: BinaryOperator::Eq,
                        ..
                    }
                ));
            }
            other => panic!("expected lambda, got {:?}", other),
        }

        let call = Expression::call("StartsWith", vec![]);
        assert!(matches!(call, Expression::MethodCall { ref args, .. } if args.is_empty()));
    }

    #[test]
    fn test_kind_name() {
        let add = Expression::binary_op(
            BinaryOperator::Add,
            Expression::member("AGE"),
            Expression::constant(1),
        );
        assert_eq!(add.kind_name(), "binary operator +");
        assert_eq!(Expression::parameter("a").kind_name(), "parameter a");
        assert_eq!(
            Expression::unary_op(UnaryOperator::Not, Expression::member("ACTIVE")).kind_name(),
            "unary operator NOT"
        );
        assert_eq!(
            Expression::call("string.StartsWith", vec![]).kind_name(),
            "method call string.StartsWith"
        );
    }
}
