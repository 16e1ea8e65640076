use buildgate_core::BuildgateConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build-time resolver for credential-gated integrations and local manifest secrets
#[derive(Parser, Debug)]
#[command(
    name = "buildgate",
    about = "Build-time resolver for credential-gated integrations and local manifest secrets",
    version,
    long_about = "buildgate decides whether the cloud services plugin should be applied, based on \
                  whether google-services.json is real or a checked-in placeholder, and reads the \
                  maps API key from the untracked local.properties file into the manifest \
                  placeholder table."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify the credential file and inject the local secret",
        long_about = "Runs both resolution steps and prints the activation decision, the applied \
                      plugins and the manifest placeholder table.\n\n\
                      Examples:\n  \
                      buildgate resolve\n  \
                      buildgate resolve android --format json\n  \
                      buildgate resolve --module-dir mobile -o build/placeholders.json -f json"
    )]
    Resolve(ResolveArgs),

    #[command(
        about = "Classify the credential file only",
        long_about = "Reports whether the credential file is missing, a placeholder or real.\n\n\
                      Examples:\n  \
                      buildgate classify\n  \
                      buildgate classify android --format json"
    )]
    Classify(ClassifyArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

/// Path and key overrides shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    #[arg(
        value_name = "PROJECT_DIR",
        help = "Root project directory (defaults to BUILDGATE_PROJECT_DIR or the current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Module directory holding the credential file")]
    pub module_dir: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Credential file name, relative to the module")]
    pub credential_file: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Properties file, relative to the project")]
    pub properties_file: Option<PathBuf>,

    #[arg(long, value_name = "KEY", help = "Property holding the secret")]
    pub secret_key: Option<String>,

    #[arg(long, value_name = "NAME", help = "Manifest placeholder to fill")]
    pub placeholder_name: Option<String>,

    #[arg(long, value_name = "ID", help = "Plugin applied for a real credential")]
    pub plugin_id: Option<String>,
}

impl LayoutArgs {
    /// Overlays the command-line values on `config`. A `--log-level` given on
    /// the command line replaces the level read from the environment.
    pub fn apply(&self, config: BuildgateConfig, log_level: Option<&str>) -> BuildgateConfig {
        BuildgateConfig {
            project_dir: self.project_dir.clone().unwrap_or(config.project_dir),
            module_dir: self.module_dir.clone().unwrap_or(config.module_dir),
            credential_file: self.credential_file.clone().unwrap_or(config.credential_file),
            properties_file: self.properties_file.clone().unwrap_or(config.properties_file),
            secret_key: self.secret_key.clone().unwrap_or(config.secret_key),
            placeholder_name: self.placeholder_name.clone().unwrap_or(config.placeholder_name),
            plugin_id: self.plugin_id.clone().unwrap_or(config.plugin_id),
            log_level: log_level
                .map(str::to_lowercase)
                .unwrap_or(config.log_level),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Show placeholder values in human output")]
    pub show_secrets: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
