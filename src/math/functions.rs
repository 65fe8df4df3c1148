//! Named math functions for the advanced_math tool.
//!
//! `derivative` and `integral` are fixed to the monomial f(x) = x²; they are
//! teaching aids, not symbolic calculus.

use crate::error::{ToolError, ToolResult};

/// Function names accepted by advanced_math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    Sqrt,
    Abs,
    Factorial,
    /// d/dx of x² at the given point: 2x
    Derivative,
    /// ∫x² dx evaluated at the given point: x³/3
    Integral,
}

impl MathFunction {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sin" => Some(MathFunction::Sin),
            "cos" => Some(MathFunction::Cos),
            "tan" => Some(MathFunction::Tan),
            "log" => Some(MathFunction::Log),
            "ln" => Some(MathFunction::Ln),
            "sqrt" => Some(MathFunction::Sqrt),
            "abs" => Some(MathFunction::Abs),
            "factorial" => Some(MathFunction::Factorial),
            "derivative" => Some(MathFunction::Derivative),
            "integral" => Some(MathFunction::Integral),
            _ => None,
        }
    }

    /// Wire name, as advertised in the tool schema
    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Log => "log",
            MathFunction::Ln => "ln",
            MathFunction::Sqrt => "sqrt",
            MathFunction::Abs => "abs",
            MathFunction::Factorial => "factorial",
            MathFunction::Derivative => "derivative",
            MathFunction::Integral => "integral",
        }
    }

    /// Apply the function to a value. Only factorial can fail; the other
    /// functions mirror their floating-point behavior unchecked.
    pub fn apply(&self, value: f64) -> ToolResult<f64> {
        let result = match self {
            MathFunction::Sin => value.sin(),
            MathFunction::Cos => value.cos(),
            MathFunction::Tan => value.tan(),
            MathFunction::Log => value.log10(),
            MathFunction::Ln => value.ln(),
            MathFunction::Sqrt => value.sqrt(),
            MathFunction::Abs => value.abs(),
            MathFunction::Factorial => factorial(value)?,
            MathFunction::Derivative => 2.0 * value,
            MathFunction::Integral => value.powi(3) / 3.0,
        };
        Ok(result)
    }

    /// One-line commentary shown beneath the result, for the functions that
    /// carry one.
    pub fn explanation(&self) -> Option<&'static str> {
        match self {
            MathFunction::Sin => {
                Some("The sine function gives the y-coordinate of a point on the unit circle.")
            }
            MathFunction::Cos => {
                Some("The cosine function gives the x-coordinate of a point on the unit circle.")
            }
            MathFunction::Derivative => {
                Some("Computed with f'(x) = 2x, the derivative of f(x) = x².")
            }
            MathFunction::Integral => Some("Computed with the formula ∫x² dx = x³/3."),
            _ => None,
        }
    }
}

/// Iterative factorial over f64. Requires a non-negative integer input;
/// large inputs saturate to +inf under IEEE 754 multiplication.
pub fn factorial(value: f64) -> ToolResult<f64> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(ToolError::FactorialDomain);
    }

    let n = value as u64;
    let mut result = 1.0_f64;
    for i in 2..=n {
        result *= i as f64;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_base_cases() {
        assert_eq!(factorial(0.0).unwrap(), 1.0);
        assert_eq!(factorial(1.0).unwrap(), 1.0);
        assert_eq!(factorial(5.0).unwrap(), 120.0);
        assert_eq!(factorial(10.0).unwrap(), 3628800.0);
    }

    #[test]
    fn test_factorial_rejects_negative_and_fractional() {
        assert_eq!(factorial(-1.0).unwrap_err(), ToolError::FactorialDomain);
        assert_eq!(factorial(2.5).unwrap_err(), ToolError::FactorialDomain);
        assert!(factorial(f64::NAN).is_err());
    }

    #[test]
    fn test_factorial_saturates_instead_of_overflowing() {
        assert_eq!(factorial(200.0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(MathFunction::from_str("SQRT"), Some(MathFunction::Sqrt));
        assert_eq!(MathFunction::from_str("factorial"), Some(MathFunction::Factorial));
        assert_eq!(MathFunction::from_str("cbrt"), None);
    }

    #[test]
    fn test_apply() {
        assert_eq!(MathFunction::Sqrt.apply(9.0).unwrap(), 3.0);
        assert_eq!(MathFunction::Abs.apply(-3.5).unwrap(), 3.5);
        assert_eq!(MathFunction::Log.apply(1000.0).unwrap(), 3.0);
        assert_eq!(MathFunction::Factorial.apply(5.0).unwrap(), 120.0);
    }

    #[test]
    fn test_fixed_monomial_calculus() {
        assert_eq!(MathFunction::Derivative.apply(5.0).unwrap(), 10.0);
        assert_eq!(MathFunction::Integral.apply(3.0).unwrap(), 9.0);
    }

    #[test]
    fn test_explanations_present_only_where_expected() {
        assert!(MathFunction::Sin.explanation().is_some());
        assert!(MathFunction::Cos.explanation().is_some());
        assert!(MathFunction::Derivative.explanation().is_some());
        assert!(MathFunction::Integral.explanation().is_some());
        assert!(MathFunction::Tan.explanation().is_none());
        assert!(MathFunction::Factorial.explanation().is_none());
    }
}
