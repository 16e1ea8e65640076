pub mod commands;
pub mod output;

pub use commands::{ClassifyArgs, CliArgs, Commands, ConfigArgs, LayoutArgs, ResolveArgs};
pub use output::{ClassifyReport, OutputFormat, OutputFormatter, ResolveReport};
