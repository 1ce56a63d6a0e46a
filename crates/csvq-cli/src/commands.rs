use std::io::{self, IsTerminal};

use clap::ColorChoice;
use csvq_cli::pipeline::{QueryRequest, execute};
use csvq_cli::render::{OutputFormat, RenderOptions};
use csvq_core::LoadOptions;

use crate::cli::{Cli, OutputFormatArg};

/// Runs one query against stdout/stderr. Returns the process exit code.
pub fn run(cli: &Cli) -> i32 {
    let request = QueryRequest {
        path: cli.file.clone(),
        condition: cli.condition.clone(),
        aggregate: cli.aggregate.clone(),
        load_options: LoadOptions::default().with_delimiter(cli.delimiter),
    };
    let options = RenderOptions {
        format: output_format(cli.output),
        styled: styled_output(cli.color.color),
        delimiter: Some(cli.delimiter),
    };
    execute(&request, &options, &mut io::stdout().lock(), &mut io::stderr().lock())
}

fn output_format(arg: OutputFormatArg) -> OutputFormat {
    match arg {
        OutputFormatArg::Table => OutputFormat::Table,
        OutputFormatArg::Csv => OutputFormat::Csv,
        OutputFormatArg::Json => OutputFormat::Json,
    }
}

fn styled_output(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal(),
    }
}
