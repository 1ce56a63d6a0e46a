//! Load, filter and aggregate stages of one csvq invocation.

use std::io::Write;
use std::path::PathBuf;

use csvq_core::{
    AggregateRequest, AggregateResult, LoadOptions, Predicate, QueryError, Table,
    load_table_with_options,
};
use thiserror::Error;
use tracing::{debug, info, info_span};

use crate::render::{RenderOptions, render_outcome};

/// Exit code of a successful run, including one that printed no rows.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code of a run that failed in any stage.
pub const EXIT_FAILURE: i32 = 1;

/// Inputs of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub path: PathBuf,
    /// Raw `--where` condition.
    pub condition: Option<String>,
    /// Raw `--aggregate` value (`column=operation`).
    pub aggregate: Option<String>,
    pub load_options: LoadOptions,
}

/// What the pipeline produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The (possibly filtered) rows.
    Rows(Table),
    /// A single aggregate computed over the (possibly filtered) rows.
    Aggregate(AggregateResult),
}

/// A failure, tagged with the stage that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error: {0}")]
    Load(#[source] QueryError),

    #[error("Filter error: {0}")]
    Filter(#[source] QueryError),

    #[error("Aggregation error: {0}")]
    Aggregate(#[source] QueryError),
}

impl PipelineError {
    /// The underlying core error.
    pub fn kind(&self) -> &QueryError {
        match self {
            Self::Load(err) | Self::Filter(err) | Self::Aggregate(err) => err,
        }
    }
}

/// Runs load, then the optional filter, then the optional aggregation.
///
/// A failing stage stops the run; later stages never see partial results.
pub fn run_query(request: &QueryRequest) -> Result<QueryOutcome, PipelineError> {
    let span = info_span!("query", path = %request.path.display());
    let _guard = span.enter();

    let table = load_table_with_options(&request.path, &request.load_options)
        .map_err(PipelineError::Load)?;
    info!(rows = table.len(), columns = table.columns().len(), "loaded input");

    let table = match request.condition.as_deref() {
        Some(condition) => {
            let filtered = apply_condition(&table, condition).map_err(PipelineError::Filter)?;
            info!(condition, rows = filtered.len(), "applied filter");
            filtered
        }
        None => table,
    };

    match request.aggregate.as_deref() {
        Some(spec) => {
            let result = apply_aggregate(&table, spec).map_err(PipelineError::Aggregate)?;
            info!(spec, value = result.value, "computed aggregate");
            Ok(QueryOutcome::Aggregate(result))
        }
        None => Ok(QueryOutcome::Rows(table)),
    }
}

/// Runs the query, prints the result to `out` or one error line to `err`, and
/// returns the process exit code.
pub fn execute<O, E>(
    request: &QueryRequest,
    options: &RenderOptions,
    out: &mut O,
    err: &mut E,
) -> i32
where
    O: Write,
    E: Write,
{
    let outcome = match run_query(request) {
        Ok(outcome) => outcome,
        Err(error) => {
            debug!(error = %error.kind(), "query failed");
            let _ = writeln!(err, "{error}");
            return EXIT_FAILURE;
        }
    };

    let written = render_outcome(&outcome, options)
        .and_then(|text| writeln!(out, "{text}").map_err(anyhow::Error::from));
    match written {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => {
            let _ = writeln!(err, "error: {error:#}");
            EXIT_FAILURE
        }
    }
}

fn apply_condition(table: &Table, condition: &str) -> csvq_core::Result<Table> {
    let predicate = Predicate::parse(condition)?;
    table.filter(&predicate)
}

fn apply_aggregate(table: &Table, spec: &str) -> csvq_core::Result<AggregateResult> {
    AggregateRequest::parse(spec)?.run(table)
}
