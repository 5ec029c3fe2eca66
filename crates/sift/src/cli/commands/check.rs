//! Implementation of `sift check`.

use std::process::ExitCode;

use sift_config::{Config, ConfigWarning, SqlSettings, discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, header, print_error, subheader, warning},
};

/// Lists config files, shows the SQL column setup, and reports warnings.
///
/// Exits non-zero when the configuration fails to load or has warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("{}", header("Checking configuration..."));
    println!();

    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("sift init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files (highest precedence first):"));
    for path in &config_files {
        if is_global_config(path) {
            println!("   {} {}", path.display(), dim("(global)"));
        } else {
            println!("   {}", path.display());
        }
    }
    println!();

    let config = match Config::load_from_files(&config_files) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    print_sql_settings(&config.sql);

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();
    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints how query fields map to SQL columns.
fn print_sql_settings(sql: &SqlSettings) {
    println!("{}", subheader("Implicit columns:"));
    if sql.implicit_columns.is_empty() {
        println!("   {}", dim("(none)"));
    } else {
        println!("   {}", sql.implicit_columns.join(", "));
    }
    println!();

    println!("{}", subheader("Column aliases:"));
    if sql.columns.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for (field, column) in &sql.columns {
        println!("   {field} {}", dim(&format!("-> {column}")));
    }
    println!();

    if !sql.map_columns.is_empty() {
        println!("{}", subheader("Map columns:"));
        println!("   {}", sql.map_columns.join(", "));
        println!();
    }
}

/// Prints one hint per distinct warning kind.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings.iter().map(ConfigWarning::hint).collect();
    hints.sort_unstable();
    hints.dedup();

    for hint in hints {
        println!("{}", dim(&format!("Hint: {hint}")));
    }
}
