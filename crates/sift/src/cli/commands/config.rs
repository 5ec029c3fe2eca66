//! Implementation of `sift config`.

use std::process::ExitCode;

use crate::cli::{context::CommandContext, output::Highlighter};

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let settings = ctx.config.settings_to_toml();
    print!("{}", Highlighter::new().highlight_toml(&settings));
    ExitCode::SUCCESS
}
