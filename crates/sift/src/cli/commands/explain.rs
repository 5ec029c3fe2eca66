//! Implementation of `sift explain`.

use std::process::ExitCode;

use serde::Serialize;
use sift_compile::{explain, fallback_explanation};
use tracing::debug;

use crate::cli::{
    args::ExplainCommand,
    output::{print_error, print_json},
};

/// JSON output for one explained query.
#[derive(Serialize)]
struct JsonExplanation<'a> {
    /// The query as given.
    query: &'a str,
    /// English explanation.
    explanation: String,
    /// True when the query did not parse and the plain text fallback was used.
    fallback: bool,
}

/// Explains each query in English.
pub fn run(cmd: &ExplainCommand) -> ExitCode {
    let mut explanations = Vec::with_capacity(cmd.queries.len());

    for query in &cmd.queries {
        let explained = match explain(query) {
            Ok(explanation) => JsonExplanation {
                query,
                explanation,
                fallback: false,
            },
            Err(e) if cmd.strict => {
                print_error(&e);
                return ExitCode::FAILURE;
            }
            Err(e) => {
                debug!(query = query.as_str(), error = e.message(), "using fallback explanation");
                JsonExplanation {
                    query,
                    explanation: fallback_explanation(query),
                    fallback: true,
                }
            }
        };
        explanations.push(explained);
    }

    if cmd.json {
        return print_json(&explanations);
    }

    for explained in &explanations {
        println!("{}", explained.explanation);
    }
    ExitCode::SUCCESS
}
