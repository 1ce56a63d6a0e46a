//! Single-column aggregation (`avg`, `min`, `max`).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::table::Table;
use crate::value::parse_number;

/// Supported aggregate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Avg,
    Min,
    Max,
}

impl AggregateOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        }
    }

    fn apply(self, values: &[f64]) -> f64 {
        match self {
            AggregateOp::Avg => mean(values),
            AggregateOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            AggregateOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    let count = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        sum / count
    } else {
        // The sum overflowed; divide first so the mean stays finite.
        values.iter().map(|v| v / count).sum()
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "avg" => Ok(AggregateOp::Avg),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            other => Err(QueryError::UnsupportedOperation {
                operation: other.to_string(),
            }),
        }
    }
}

/// Outcome of an aggregation, value rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub operation: AggregateOp,
    pub column: String,
    pub value: f64,
}

/// An `--aggregate` argument: `column=operation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRequest {
    pub column: String,
    pub operation: AggregateOp,
}

impl AggregateRequest {
    /// Splits `spec` on its first `=`.
    ///
    /// # Errors
    ///
    /// - [`QueryError::InvalidAggregateSpec`] when `spec` contains no `=`.
    /// - [`QueryError::UnsupportedOperation`] for an unknown operation.
    pub fn parse(spec: &str) -> Result<Self> {
        let (column, operation) = spec
            .split_once('=')
            .ok_or_else(|| QueryError::InvalidAggregateSpec {
                spec: spec.to_string(),
            })?;
        Ok(Self {
            column: column.to_string(),
            operation: operation.parse()?,
        })
    }

    /// Runs this request against `table`.
    pub fn run(&self, table: &Table) -> Result<AggregateResult> {
        aggregate(table, &self.column, self.operation)
    }
}

impl FromStr for AggregateRequest {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Computes `operation` over `column` for every row of `table`.
///
/// Values are combined at full precision; only the final scalar is rounded
/// (half away from zero) to two decimals.
///
/// # Errors
///
/// - [`QueryError::EmptyInput`] when the table has no rows.
/// - [`QueryError::UnknownColumn`] when the column is not in the table.
/// - [`QueryError::NonNumericColumn`] at the first cell that is not a number.
pub fn aggregate(table: &Table, column: &str, operation: AggregateOp) -> Result<AggregateResult> {
    if table.is_empty() {
        return Err(QueryError::EmptyInput {
            column: column.to_string(),
        });
    }
    if !table.has_column(column) {
        return Err(QueryError::UnknownColumn {
            column: column.to_string(),
        });
    }

    let values = table
        .iter()
        .map(|row| {
            row.get(column)
                .and_then(parse_number)
                .ok_or_else(|| QueryError::NonNumericColumn {
                    column: column.to_string(),
                })
        })
        .collect::<Result<Vec<f64>>>()?;

    let value = round_to_cents(operation.apply(&values));
    debug!(
        operation = %operation,
        column,
        rows = values.len(),
        value,
        "aggregated column"
    );
    Ok(AggregateResult {
        operation,
        column: column.to_string(),
        value,
    })
}

/// Aggregates by operation name, for callers holding raw text.
pub fn aggregate_by_name(table: &Table, column: &str, operation: &str) -> Result<AggregateResult> {
    aggregate(table, column, operation.parse()?)
}

/// Round to two decimal places, half away from zero.
///
/// Values too large to carry cents are returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}
