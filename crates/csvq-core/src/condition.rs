//! Single-condition parsing (`<column><operator><value>`).

use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, Result};

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Operator {
    /// Scan order used when parsing a condition.
    ///
    /// Two-character operators come before their one-character prefixes so
    /// `a>=1` never splits on `>` or `=`.
    pub const PARSE_ORDER: [Operator; 6] = [
        Operator::Ge,
        Operator::Le,
        Operator::Ne,
        Operator::Eq,
        Operator::Gt,
        Operator::Lt,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::PARSE_ORDER
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| QueryError::UnsupportedOperator {
                operator: s.to_string(),
            })
    }
}

/// A parsed filter condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    column: String,
    operator: Operator,
    literal: String,
}

impl Predicate {
    pub fn new(column: impl Into<String>, operator: Operator, literal: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator,
            literal: literal.into(),
        }
    }

    /// Builds a predicate from an operator symbol.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnsupportedOperator`] for an unknown symbol.
    pub fn from_parts(
        column: impl Into<String>,
        operator: &str,
        literal: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(column, operator.parse()?, literal))
    }

    /// Parses `<column><operator><value>`.
    ///
    /// The first operator of [`Operator::PARSE_ORDER`] that occurs anywhere
    /// in the string wins, and the string is split at its first occurrence.
    /// Neither side is trimmed and either side may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidCondition`] when no operator occurs.
    pub fn parse(condition: &str) -> Result<Self> {
        for operator in Operator::PARSE_ORDER {
            if let Some((column, literal)) = condition.split_once(operator.symbol()) {
                return Ok(Self::new(column, operator, literal));
            }
        }
        Err(QueryError::InvalidCondition {
            condition: condition.to_string(),
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl FromStr for Predicate {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.operator, self.literal)
    }
}

/// Parse a condition string into a [`Predicate`].
pub fn parse_condition(condition: &str) -> Result<Predicate> {
    Predicate::parse(condition)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(condition: &str) -> (String, Operator, String) {
        let p = parse_condition(condition).unwrap();
        (p.column().to_string(), p.operator(), p.literal().to_string())
    }

    #[test]
    fn test_simple_greater_than() {
        assert_eq!(
            parts("price>300"),
            ("price".to_string(), Operator::Gt, "300".to_string())
        );
    }

    #[test]
    fn test_two_char_operators_win() {
        assert_eq!(parts("rating>=4.5").1, Operator::Ge);
        assert_eq!(parts("rating>=4.5").2, "4.5");
        assert_eq!(parts("a<=b"), ("a".to_string(), Operator::Le, "b".to_string()));
        assert_eq!(parts("name!=x"), ("name".to_string(), Operator::Ne, "x".to_string()));
    }

    #[test]
    fn test_priority_beats_position() {
        // `>=` is scanned before `=` even though `=` occurs earlier.
        assert_eq!(
            parts("a=b>=c"),
            ("a=b".to_string(), Operator::Ge, "c".to_string())
        );
        // `=` is scanned before `<`.
        assert_eq!(
            parts("a<b=c"),
            ("a<b".to_string(), Operator::Eq, "c".to_string())
        );
    }

    #[test]
    fn test_splits_at_first_occurrence() {
        assert_eq!(
            parts("formula=a=b"),
            ("formula".to_string(), Operator::Eq, "a=b".to_string())
        );
    }

    #[test]
    fn test_no_trimming_and_empty_sides() {
        assert_eq!(
            parts(" price > 3 "),
            (" price ".to_string(), Operator::Gt, " 3 ".to_string())
        );
        assert_eq!(parts("=5"), (String::new(), Operator::Eq, "5".to_string()));
        assert_eq!(parts("name="), ("name".to_string(), Operator::Eq, String::new()));
    }

    #[test]
    fn test_invalid_condition() {
        let err = parse_condition("invalid_condition").unwrap_err();
        assert!(matches!(err, QueryError::InvalidCondition { .. }));
        assert_eq!(err.to_string(), "Invalid condition format: invalid_condition");
        assert!(parse_condition("").is_err());
        assert!(parse_condition("a!b").is_err());
    }

    #[test]
    fn test_operator_from_str() {
        assert_eq!("<=".parse::<Operator>().unwrap(), Operator::Le);
        let err = "~".parse::<Operator>().unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedOperator { ref operator } if operator == "~"));
    }

    #[test]
    fn test_from_parts_and_display() {
        let p = Predicate::from_parts("price", ">=", "10").unwrap();
        assert_eq!(p.to_string(), "price>=10");
        assert!(Predicate::from_parts("price", "=>", "10").is_err());
    }
}
