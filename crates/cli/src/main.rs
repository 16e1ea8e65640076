use buildgate_cli::cli::commands::{
    ClassifyArgs, CliArgs, Commands, ConfigArgs, LayoutArgs, ResolveArgs,
};
use buildgate_cli::cli::output::{ClassifyReport, OutputFormatter, ResolveReport};
use buildgate_cli::{init_logging, LoggingConfig, NAME, VERSION};
use buildgate_core::{BuildgateConfig, RealFileSystem};
use buildgate_resolver::BuildResolver;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::process;
use tracing::{debug, error, info};

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
        args.log_json,
    ));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let log_level = args.log_level.as_deref();
    let exit_code = match &args.command {
        Commands::Resolve(resolve_args) => handle_resolve(resolve_args, log_level),
        Commands::Classify(classify_args) => handle_classify(classify_args, log_level),
        Commands::Config(config_args) => handle_config(config_args, log_level),
    };

    process::exit(exit_code);
}

fn load_config(layout: &LayoutArgs, log_level: Option<&str>) -> Option<BuildgateConfig> {
    let config = layout.apply(BuildgateConfig::default(), log_level);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your BUILDGATE_* environment variables and command-line arguments.");
        return None;
    }

    debug!("Credential file: {}", config.credential_path().display());
    debug!("Properties file: {}", config.properties_path().display());
    Some(config)
}

fn handle_resolve(args: &ResolveArgs, log_level: Option<&str>) -> i32 {
    let Some(config) = load_config(&args.layout, log_level) else {
        return 1;
    };

    let resolver = BuildResolver::new(RealFileSystem::new(), config);
    let (resolution, applied_plugins) = match resolver.run() {
        Ok(result) => result,
        Err(e) => {
            error!("Resolution failed: {}", e);
            return 1;
        }
    };

    let report = ResolveReport {
        resolution,
        applied_plugins,
    };
    let formatter = OutputFormatter::new(args.format.into()).with_secrets(args.show_secrets);

    match formatter
        .format_resolution(&report)
        .and_then(|output| emit(&output, args.output.as_deref()))
    {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn handle_classify(args: &ClassifyArgs, log_level: Option<&str>) -> i32 {
    let Some(config) = load_config(&args.layout, log_level) else {
        return 1;
    };

    let credential_file = config.credential_path();
    let resolver = BuildResolver::new(RealFileSystem::new(), config);
    let decision = match resolver.classify() {
        Ok(decision) => decision,
        Err(e) => {
            error!("Classification failed: {}", e);
            return 1;
        }
    };

    let report = ClassifyReport {
        credential_file,
        decision,
        activates: decision.activates(),
    };

    match OutputFormatter::new(args.format.into())
        .format_classification(&report)
        .and_then(|output| emit(&output, None))
    {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn handle_config(args: &ConfigArgs, log_level: Option<&str>) -> i32 {
    let config = args.layout.apply(BuildgateConfig::default(), log_level);
    let valid = match config.validate() {
        Ok(()) => true,
        Err(e) => {
            error!("Configuration error: {}", e);
            false
        }
    };

    match OutputFormatter::new(args.format.into())
        .format_config(&config)
        .and_then(|output| emit(&output, None))
    {
        Ok(()) if valid => 0,
        Ok(()) => 1,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn emit(output: &str, destination: Option<&Path>) -> Result<()> {
    let Some(path) = destination else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote report to {}", path.display());
    Ok(())
}
