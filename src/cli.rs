//! CLI domain: parse, route, output, and presentation only.
//! Tracking itself lives in [`crate::session`].

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Invocation, PlanFormat};
pub use presentation::{format_plan_json, format_plan_text};
pub use route::RunContext;
