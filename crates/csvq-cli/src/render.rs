//! Output rendering: grid tables, CSV and JSON.

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table as Grid};

use csvq_core::{AggregateResult, LoadOptions, Table, parse_number, write_table};

use crate::pipeline::QueryOutcome;

/// Message printed instead of an empty grid.
pub const NO_DATA_MESSAGE: &str = "No data to display";

/// Output format of a query result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Grid table for humans.
    #[default]
    Table,
    /// Delimited text.
    Csv,
    /// JSON array of objects (rows) or a single object (aggregate).
    Json,
}

/// Rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Emit ANSI styling in grid output.
    pub styled: bool,
    /// Delimiter for CSV output.
    pub delimiter: Option<u8>,
}

/// Renders an outcome to the text printed on stdout.
pub fn render_outcome(outcome: &QueryOutcome, options: &RenderOptions) -> Result<String> {
    match (outcome, options.format) {
        (QueryOutcome::Rows(table), OutputFormat::Table) => Ok(if table.is_empty() {
            NO_DATA_MESSAGE.to_string()
        } else {
            rows_grid(table, options.styled).to_string()
        }),
        (QueryOutcome::Aggregate(result), OutputFormat::Table) => {
            Ok(aggregate_grid(result, options.styled).to_string())
        }
        (QueryOutcome::Rows(table), OutputFormat::Csv) => {
            let load_options = LoadOptions::default()
                .with_delimiter(options.delimiter.unwrap_or(b','));
            let mut buffer = Vec::new();
            write_table(table, &mut buffer, &load_options).context("write rows as CSV")?;
            Ok(trim_newline(String::from_utf8(buffer).context("CSV output is not UTF-8")?))
        }
        (QueryOutcome::Aggregate(result), OutputFormat::Csv) => {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(options.delimiter.unwrap_or(b','))
                .from_writer(Vec::new());
            writer
                .serialize(result)
                .context("write aggregate as CSV")?;
            let buffer = writer
                .into_inner()
                .map_err(csv::IntoInnerError::into_error)
                .context("flush CSV output")?;
            Ok(trim_newline(String::from_utf8(buffer).context("CSV output is not UTF-8")?))
        }
        (QueryOutcome::Rows(table), OutputFormat::Json) => {
            serde_json::to_string_pretty(table).context("serialize rows as JSON")
        }
        (QueryOutcome::Aggregate(result), OutputFormat::Json) => {
            serde_json::to_string_pretty(result).context("serialize aggregate as JSON")
        }
    }
}

/// Builds the grid for a row table.
///
/// Columns whose every cell is a number are right-aligned.
pub fn rows_grid(table: &Table, styled: bool) -> Grid {
    let mut grid = Grid::new();
    apply_table_style(&mut grid, styled);
    grid.set_header(table.columns().iter().map(|c| header_cell(c)));
    for row in table {
        grid.add_row(row.values());
    }
    for (idx, column) in table.columns().iter().enumerate() {
        let numeric = table
            .iter()
            .all(|row| row.get(column).and_then(parse_number).is_some());
        if numeric {
            align_column(&mut grid, idx, CellAlignment::Right);
        }
    }
    grid
}

/// Builds the one-row grid for an aggregate result.
pub fn aggregate_grid(result: &AggregateResult, styled: bool) -> Grid {
    let mut grid = Grid::new();
    apply_table_style(&mut grid, styled);
    grid.set_header(vec![
        header_cell("operation"),
        header_cell("column"),
        header_cell("value"),
    ]);
    grid.add_row(vec![
        Cell::new(result.operation),
        Cell::new(&result.column),
        Cell::new(result.value),
    ]);
    align_column(&mut grid, 2, CellAlignment::Right);
    grid
}

fn apply_table_style(grid: &mut Grid, styled: bool) {
    grid.load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if styled {
        grid.enforce_styling();
    } else {
        grid.force_no_tty();
    }
}

fn align_column(grid: &mut Grid, index: usize, alignment: CellAlignment) {
    if let Some(column) = grid.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn trim_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvq_core::AggregateOp;

    fn sample() -> Table {
        Table::from_records(
            vec!["name".into(), "price".into()],
            vec![vec!["Widget", "9.5"], vec!["Gadget", "12"]],
        )
    }

    #[test]
    fn test_empty_rows_print_message() {
        let outcome = QueryOutcome::Rows(Table::new(vec!["a".into()]));
        let text = render_outcome(&outcome, &RenderOptions::default()).unwrap();
        assert_eq!(text, NO_DATA_MESSAGE);
    }

    #[test]
    fn test_grid_contains_header_and_cells() {
        let text = rows_grid(&sample(), false).to_string();
        assert!(text.contains("name"));
        assert!(text.contains("price"));
        assert!(text.contains("Widget"));
        assert!(text.contains("12"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_aggregate_grid() {
        let result = AggregateResult {
            operation: AggregateOp::Avg,
            column: "price".to_string(),
            value: 10.75,
        };
        let text = aggregate_grid(&result, false).to_string();
        assert!(text.contains("operation"));
        assert!(text.contains("avg"));
        assert!(text.contains("10.75"));
    }

    #[test]
    fn test_csv_rows() {
        let options = RenderOptions {
            format: OutputFormat::Csv,
            ..RenderOptions::default()
        };
        let text = render_outcome(&QueryOutcome::Rows(sample()), &options).unwrap();
        assert_eq!(text, "name,price\nWidget,9.5\nGadget,12");
    }

    #[test]
    fn test_csv_aggregate() {
        let options = RenderOptions {
            format: OutputFormat::Csv,
            delimiter: Some(b';'),
            ..RenderOptions::default()
        };
        let result = AggregateResult {
            operation: AggregateOp::Min,
            column: "price".to_string(),
            value: 9.5,
        };
        let text = render_outcome(&QueryOutcome::Aggregate(result), &options).unwrap();
        assert_eq!(text, "operation;column;value\nmin;price;9.5");
    }

    #[test]
    fn test_json_rows_keep_column_order() {
        let options = RenderOptions {
            format: OutputFormat::Json,
            ..RenderOptions::default()
        };
        let text = render_outcome(&QueryOutcome::Rows(sample()), &options).unwrap();
        insta::assert_snapshot!(text, @r#"
        [
          {
            "name": "Widget",
            "price": "9.5"
          },
          {
            "name": "Gadget",
            "price": "12"
          }
        ]
        "#);
    }

    #[test]
    fn test_json_empty_rows() {
        let options = RenderOptions {
            format: OutputFormat::Json,
            ..RenderOptions::default()
        };
        let outcome = QueryOutcome::Rows(Table::new(vec!["a".into()]));
        assert_eq!(render_outcome(&outcome, &options).unwrap(), "[]");
    }
}
