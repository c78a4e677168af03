//! Operator definitions for expressions.

/// Binary operators an IR node can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,
    /// Short-circuiting or; renders the same as `Or`
    OrElse,
}

impl BinaryOperator {
    /// Get the statement token for this operator, if it has one
    pub fn sql_token(&self) -> Option<&'static str> {
        match self {
            BinaryOperator::Eq => Some("="),
            BinaryOperator::Lt => Some("<"),
            BinaryOperator::Gt => Some(">"),
            BinaryOperator::Or | BinaryOperator::OrElse => Some("OR"),
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::Ne
            | BinaryOperator::Le
            | BinaryOperator::Ge
            | BinaryOperator::And => None,
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::OrElse => "OR ELSE",
        }
    }
}

/// Unary operators with real semantics. Transparent wrappers such as
/// conversions use `Expression::UnaryWrap` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "NOT",
            UnaryOperator::Negate => "-",
        }
    }
}
