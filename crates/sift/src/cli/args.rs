//! Clap argument definitions for the `sift` CLI.

use std::{env, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

use crate::cli::logging::LOG_ENV;

/// Query syntax reference shown after the help of query commands.
const QUERY_SYNTAX: &str = "\
QUERY SYNTAX:
  timeout               Whole word in the message
  *time*  time*  *out   Substring, prefix, suffix
  \"two words\"           Phrase
  level:error           Field contains value
  level:\"error\"         Field equals value exactly
  level:(warn error)    Field group, same as (level:warn level:error)
  service:*             Field is present
  duration:>=100        Comparison (>, >=, <, <=)
  ts:[1 TO 5]           Inclusive range ({1 TO 5} is exclusive)
  -debug  -level:info   Negation
  a OR b, a AND b, a b  Boolean operators (adjacent terms are ANDed)
  NOT (a OR b)          Negated group

EXAMPLES:
  sift explain 'level:\"error\" -service:*checkout*'
  sift sql 'timeout duration:>=100' --where \"Timestamp > now() - 3600\"
  sift parse '(a OR b) c'";

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Explain and compile log search queries")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `sift explain`.
#[derive(Args, Debug, Clone)]
pub struct ExplainCommand {
    /// Queries to explain
    #[arg(required = true, allow_hyphen_values = true)]
    pub queries: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Report syntax errors instead of falling back to a plain text match
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `sift sql`.
#[derive(Args, Debug, Clone)]
pub struct SqlCommand {
    /// Query to compile
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    /// Extra condition ANDed with the search (repeatable)
    #[arg(long = "where", value_name = "COND")]
    pub conditions: Vec<String>,
}

/// Arguments for `sift parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query to parse
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    /// Output the tree as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Query to tokenize
    #[arg(allow_hyphen_values = true)]
    pub query: String,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Explain queries in plain English
    #[command(after_help = QUERY_SYNTAX)]
    Explain(ExplainCommand),

    /// Compile a query to a SQL condition
    #[command(after_help = QUERY_SYNTAX)]
    Sql(SqlCommand),

    /// Show how a query parses
    Parse(ParseCommand),

    /// List the tokens of a query
    Tokens(TokensCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

impl Commands {
    /// True for commands that read the merged configuration up front.
    ///
    /// `check` loads configuration itself so it can report load failures.
    pub fn needs_config(&self) -> bool {
        matches!(self, Self::Sql(_) | Self::Config)
    }
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp && env::args().len() <= 2 {
                print_command_list();
                exit(0);
            }
            e.exit();
        }
    }
}

/// Prints the top-level help as a flat command list.
fn print_command_list() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: sift <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -h, --help  Print help");
    println!();
    println!("Logging: set {}=debug to trace parsing and compilation.", LOG_ENV);
}
