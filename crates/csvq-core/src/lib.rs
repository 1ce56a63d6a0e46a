//! Query core for delimited text tables.
//!
//! This crate loads a CSV file into an ordered [`Table`] of text rows,
//! filters it by a single [`Predicate`] and computes one aggregate statistic
//! over a numeric column.
//!
//! # Features
//!
//! - **Loading**: header-keyed rows, values kept verbatim as text
//! - **Coercion**: numeric-or-text values decided per comparison
//! - **Filtering**: `=`, `!=`, `>`, `<`, `>=`, `<=` on one column
//! - **Aggregation**: `avg`, `min`, `max`, rounded to two decimals
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use csvq_core::{AggregateOp, Predicate, aggregate, load_table};
//!
//! let table = load_table(Path::new("products.csv"))?;
//! let expensive = table.filter(&Predicate::parse("price>300")?)?;
//! let result = aggregate(&expensive, "rating", AggregateOp::Avg)?;
//! println!("{} {} = {}", result.operation, result.column, result.value);
//! ```

mod aggregate;
mod condition;
mod error;
mod filter;
mod loader;
mod table;
mod value;

// === Error Types ===
pub use error::{QueryError, Result};

// === Tables ===
pub use table::{Row, Table};

// === Loading ===
pub use loader::{
    LoadOptions, load_table, load_table_from_reader, load_table_with_options, write_table,
};

// === Coercion ===
pub use value::{ComparableValue, coerce, parse_number};

// === Filtering ===
pub use condition::{Operator, Predicate, parse_condition};
pub use filter::filter_rows;

// === Aggregation ===
pub use aggregate::{
    AggregateOp, AggregateRequest, AggregateResult, aggregate, aggregate_by_name, round_to_cents,
};
