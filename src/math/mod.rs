//! Arithmetic and statistics primitives shared by the tool executors and the
//! HTTP calculator routes.

pub mod eval;
pub mod functions;
pub mod stats;

use crate::error::{ToolError, ToolResult};
use serde::{Deserialize, Serialize};

/// Binary arithmetic operation accepted by the calculator endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Apply the operation. Division by zero is a domain error, never a
    /// non-finite result.
    pub fn apply(self, a: f64, b: f64) -> ToolResult<f64> {
        match self {
            BinaryOp::Add => Ok(a + b),
            BinaryOp::Sub => Ok(a - b),
            BinaryOp::Mul => Ok(a * b),
            BinaryOp::Div => {
                if b == 0.0 {
                    Err(ToolError::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            }
        }
    }

    /// Infix symbol used in normalized expression strings.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_basic_ops() {
        assert_eq!(BinaryOp::Add.apply(3.0, 4.0).unwrap(), 7.0);
        assert_eq!(BinaryOp::Sub.apply(10.0, 4.0).unwrap(), 6.0);
        assert_eq!(BinaryOp::Mul.apply(3.0, 4.0).unwrap(), 12.0);
        assert_eq!(BinaryOp::Div.apply(10.0, 4.0).unwrap(), 2.5);
    }

    #[test]
    fn test_division_by_zero_is_domain_error() {
        let err = BinaryOp::Div.apply(1.0, 0.0).unwrap_err();
        assert_eq!(err, ToolError::DivisionByZero);
    }

    #[test]
    fn test_serde_lowercase_names() {
        let op: BinaryOp = serde_json::from_str("\"add\"").unwrap();
        assert_eq!(op, BinaryOp::Add);
        let op: BinaryOp = serde_json::from_str("\"div\"").unwrap();
        assert_eq!(op, BinaryOp::Div);
        assert!(serde_json::from_str::<BinaryOp>("\"pow\"").is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(BinaryOp::Add.symbol(), "+");
        assert_eq!(BinaryOp::Div.symbol(), "/");
    }
}
