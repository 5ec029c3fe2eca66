//! Implementation of `sift sql`.

use std::process::ExitCode;

use sift_compile::SearchConditionBuilder;

use crate::cli::{args::SqlCommand, context::CommandContext, output::print_error};

/// Compiles a query, plus any `--where` conditions, into one SQL condition.
pub fn run(ctx: &CommandContext, cmd: &SqlCommand) -> ExitCode {
    let backend = ctx.sql_backend();
    let builder = cmd
        .conditions
        .iter()
        .fold(SearchConditionBuilder::new(&cmd.query, &backend), |b, c| {
            b.and(c)
        });

    match builder.build() {
        Ok(condition) => {
            println!("{condition}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}
