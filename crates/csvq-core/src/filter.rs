//! Row filtering by a single predicate.

use std::cmp::Ordering;

use tracing::debug;

use crate::condition::{Operator, Predicate};
use crate::error::{QueryError, Result};
use crate::table::{Row, Table};
use crate::value::{ComparableValue, coerce};

impl Predicate {
    /// Evaluates the predicate against one row.
    ///
    /// Both the cell and the literal are coerced independently. Equality
    /// between a number and text is always false; ordering between them is
    /// an error.
    ///
    /// # Errors
    ///
    /// - [`QueryError::UnknownColumn`] if the row has no such column.
    /// - [`QueryError::TypeMismatch`] for an ordering across number and text.
    pub fn matches(&self, row: &Row) -> Result<bool> {
        let cell = row
            .get(self.column())
            .ok_or_else(|| QueryError::UnknownColumn {
                column: self.column().to_string(),
            })?;
        self.evaluate(coerce(cell), coerce(self.literal()))
    }

    fn evaluate(&self, left: ComparableValue<'_>, right: ComparableValue<'_>) -> Result<bool> {
        let result = match self.operator() {
            Operator::Eq => left == right,
            Operator::Ne => left != right,
            Operator::Gt => self.order(left, right)?.is_gt(),
            Operator::Lt => self.order(left, right)?.is_lt(),
            Operator::Ge => self.order(left, right)?.is_ge(),
            Operator::Le => self.order(left, right)?.is_le(),
        };
        Ok(result)
    }

    fn order(&self, left: ComparableValue<'_>, right: ComparableValue<'_>) -> Result<Ordering> {
        left.compare(&right)
            .ok_or_else(|| QueryError::TypeMismatch {
                column: self.column().to_string(),
                operator: self.operator().symbol(),
                left: left.kind(),
                right: right.kind(),
            })
    }
}

/// Returns the rows of `table` matching `predicate`, in their original order.
///
/// The input table is left untouched. An empty table filters to an empty
/// table without checking the column.
///
/// # Errors
///
/// Fails on the first row that cannot be evaluated (see
/// [`Predicate::matches`]); no partial table is returned.
pub fn filter_rows(table: &Table, predicate: &Predicate) -> Result<Table> {
    let mut matched = Vec::new();
    for row in table {
        if predicate.matches(row)? {
            matched.push(row.clone());
        }
    }
    debug!(
        predicate = %predicate,
        rows_in = table.len(),
        rows_out = matched.len(),
        "filtered rows"
    );
    Ok(table.with_rows(matched))
}

impl Table {
    /// Convenience wrapper around [`filter_rows`].
    pub fn filter(&self, predicate: &Predicate) -> Result<Table> {
        filter_rows(self, predicate)
    }
}
