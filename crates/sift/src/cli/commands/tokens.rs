//! Implementation of `sift tokens`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use sift_query::{QueryError, tokenize};

use crate::cli::{
    args::TokensCommand,
    output::{dim, print_error},
};

/// Prints the lexer's view of a query as a table.
pub fn run(cmd: &TokensCommand) -> ExitCode {
    let lexemes = match tokenize(&cmd.query) {
        Ok(lexemes) => lexemes,
        Err(e) => {
            print_error(&QueryError::from(e));
            return ExitCode::FAILURE;
        }
    };

    if lexemes.is_empty() {
        println!("{}", dim("(no tokens)"));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Kind", "Token", "Offset"]);
    for (index, lexeme) in lexemes.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(lexeme.token.kind()),
            Cell::new(&lexeme.token),
            Cell::new(lexeme.position),
        ]);
    }

    println!("{table}");
    ExitCode::SUCCESS
}
