//! Natural-language arithmetic phrase parser.
//!
//! Turns short English/Korean phrases like "3 plus 4", "7 x 6" or
//! "12 나누기 3" into a structured binary operation. Strictly two operands;
//! this is a phrase matcher, not a grammar.

use crate::math::BinaryOp;
use regex::Regex;

/// Signed decimal operand
const NUMBER: &str = r"(-?\d+(?:\.\d+)?)";

/// Successful parse of an arithmetic phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPhrase {
    pub op: BinaryOp,
    pub a: f64,
    pub b: f64,
    /// Canonical `a <symbol> b` rendering
    pub normalized: String,
}

/// Regex-table matcher for arithmetic phrases.
pub struct PhraseParser {
    patterns: Vec<(Regex, BinaryOp)>,
}

impl PhraseParser {
    pub fn new() -> Self {
        let table = [
            // symbols
            (r"\+", BinaryOp::Add),
            (r"-", BinaryOp::Sub),
            (r"[xX*]", BinaryOp::Mul),
            (r"/", BinaryOp::Div),
            // english word forms
            (r"(?:plus|add)", BinaryOp::Add),
            (r"(?:minus|subtract|less)", BinaryOp::Sub),
            (r"(?:times|multiply|multiplied by)", BinaryOp::Mul),
            (r"(?:divide|divided by|over)", BinaryOp::Div),
            // korean word forms
            (r"더하기", BinaryOp::Add),
            (r"빼기", BinaryOp::Sub),
            (r"곱하기", BinaryOp::Mul),
            (r"나누기", BinaryOp::Div),
        ];

        let patterns = table
            .iter()
            .map(|(separator, op)| {
                let pattern = format!(r"^{NUMBER}\s*{separator}\s*{NUMBER}$");
                (Regex::new(&pattern).unwrap(), *op)
            })
            .collect();

        PhraseParser { patterns }
    }

    /// Match the query against the pattern table, first hit wins.
    ///
    /// The query is trimmed and lowercased before matching. Operands that
    /// overflow to a non-finite value reject the pattern and scanning
    /// continues.
    pub fn parse(&self, query: &str) -> Option<ParsedPhrase> {
        let query = query.trim().to_lowercase();

        for (re, op) in &self.patterns {
            if let Some(caps) = re.captures(&query) {
                let (Ok(a), Ok(b)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) else {
                    continue;
                };
                if !a.is_finite() || !b.is_finite() {
                    continue;
                }
                return Some(ParsedPhrase {
                    op: *op,
                    a,
                    b,
                    normalized: format!("{} {} {}", a, op.symbol(), b),
                });
            }
        }

        None
    }
}

impl Default for PhraseParser {
    fn default() -> Self {
        Self::new()
    }
}
