//! sift: search query tooling for log dashboards.
//!
//! The `sift` binary explains search-box queries in plain English, compiles them into
//! SQL `WHERE` conditions for a log table, and shows how the parser reads them.
//! Column mappings for SQL output come from `.sift.toml` files.

#![warn(missing_docs)]

pub mod cli;
