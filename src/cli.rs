//! CLI domain: parse, route, help, output, and presentation only.
//! Tree and snapshot work lives in the library; the route table only dispatches.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{short_digest, BuildSummary, DiffReport};
pub use route::RunContext;
