//! CLI domain: parse, route, output, and presentation only.
//! No scanning or serving logic lives here; the route table dispatches to it.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_config_json, format_config_text, format_scan_result_json, format_scan_result_text,
};
pub use route::RunContext;
