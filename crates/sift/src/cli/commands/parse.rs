//! Implementation of `sift parse`.

use std::process::ExitCode;

use serde::Serialize;
use sift_query::{Node, parse};

use crate::cli::{
    args::ParseCommand,
    output::{dim, print_error, print_json, subheader},
};

/// JSON output for a parsed query.
#[derive(Serialize)]
struct JsonParse<'a> {
    /// The query as given.
    query: &'a str,
    /// Query text regenerated from the tree.
    canonical: Option<String>,
    /// Named fields in order of appearance.
    fields: Vec<&'a str>,
    /// The parsed tree, absent for an empty query.
    tree: Option<&'a Node>,
}

/// Parses a query and shows its tree.
pub fn run(cmd: &ParseCommand) -> ExitCode {
    let tree = match parse(&cmd.query) {
        Ok(tree) => tree,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&JsonParse {
            query: &cmd.query,
            canonical: tree.as_ref().map(Node::to_query_string),
            fields: tree.as_ref().map(Node::fields).unwrap_or_default(),
            tree: tree.as_ref(),
        });
    }

    let Some(tree) = tree else {
        println!("{}", dim("(empty query)"));
        return ExitCode::SUCCESS;
    };

    println!("{}", subheader("Tree:"));
    for line in tree.to_string().lines() {
        println!("  {line}");
    }
    println!();
    println!("{}", subheader("Canonical:"));
    println!("  {}", tree.to_query_string());

    let fields = tree.fields();
    if !fields.is_empty() {
        println!();
        println!("{}", subheader("Fields:"));
        println!("  {}", fields.join(", "));
    }

    ExitCode::SUCCESS
}
