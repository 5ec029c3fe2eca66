//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod explain;
pub mod init;
pub mod parse;
pub mod sql;
pub mod tokens;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Explain(cmd) => explain::run(&cmd),
        Commands::Sql(cmd) => sql::run(ctx, &cmd),
        Commands::Parse(cmd) => parse::run(&cmd),
        Commands::Tokens(cmd) => tokens::run(&cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
