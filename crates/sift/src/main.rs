//! Command-line interface for the `sift` query tool.

use std::process::ExitCode;

use sift::cli::{CommandContext, args::parse_cli, commands, logging};

fn main() -> ExitCode {
    logging::init();
    let cli = parse_cli();

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };

    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
