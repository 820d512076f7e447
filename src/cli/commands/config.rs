//! `fcc config` command - Configuration management
//!
//! Provides commands to view and modify FCC configuration.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::CONFIG_KEYS;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path(PathArgs),

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,

    /// Show only the working-directory config file
    #[arg(long = "local-only", conflicts_with = "global_only")]
    pub local_only: bool,

    /// Show only global (user) config file
    #[arg(long = "global-only")]
    pub global_only: bool,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., precision, strict)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of the working-directory config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of the working-directory config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Show only the working-directory config path
    #[arg(long = "local-only", conflicts_with = "global_only")]
    pub local_only: bool,

    /// Show only global config path
    #[arg(long = "global-only")]
    pub global_only: bool,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path(args) => run_path(args),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    if let Some(key) = &args.key {
        let config = Config::load();
        return match config.get(key)? {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    if args.local_only {
        return show_file("Local config:", local_config_path()?);
    }
    if args.global_only {
        return show_file("Global config:", global_config_path()?);
    }

    let config = Config::load();
    println!("{}", style("Effective Configuration").bold().underlined());
    println!();

    for (key, _) in CONFIG_KEYS {
        print_config_value(key, config.get(key)?.as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (FCC_AUTHOR, FCC_FORMAT, FCC_PRECISION, FCC_STRICT)");
    println!("  2. Working-directory config (.fcc/config.yaml)");
    println!("  3. Global config (~/.config/fcc/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    let path = target_path(args.global)?;
    let mut config = read_config_file(&path)?;

    config.set(&args.key, &args.value)?;
    write_config_file(&path, &config)?;

    println!(
        "{} Set {} {} {} in {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(config.get(&args.key)?.unwrap_or_default()).yellow(),
        scope(args.global)
    );

    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    let path = target_path(args.global)?;

    if !path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            path.display()
        ));
    }

    let mut config = read_config_file(&path)?;
    if !config.unset(&args.key)? {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }
    write_config_file(&path, &config)?;

    println!(
        "{} Removed {} from {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        scope(args.global)
    );

    Ok(())
}

fn run_path(args: PathArgs) -> Result<()> {
    if args.local_only {
        println!("{}", local_config_path()?.display());
        return Ok(());
    }
    if args.global_only {
        println!("{}", global_config_path()?.display());
        return Ok(());
    }

    println!("{}", style("Configuration file paths:").bold());
    println!();
    print_path("Global:", &global_config_path()?);
    println!();
    print_path("Local:", &local_config_path()?);

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in CONFIG_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'fcc config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

fn local_config_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    Ok(Config::local_config_path(&cwd))
}

fn target_path(global: bool) -> Result<PathBuf> {
    if global {
        global_config_path()
    } else {
        local_config_path()
    }
}

fn scope(global: bool) -> &'static str {
    if global {
        "global"
    } else {
        "local"
    }
}

/// Read one config file on its own, without layering
fn read_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).into_diagnostic()?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    Ok(crate::yaml::parse_yaml_str(
        &content,
        &path.display().to_string(),
    )?)
}

fn write_config_file(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(config).into_diagnostic()?;
    fs::write(path, yaml).into_diagnostic()
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn print_path(label: &str, path: &Path) {
    println!("  {} {}", style(label).cyan(), path.display());
    if path.exists() {
        println!("         {}", style("(exists)").green());
    } else {
        println!("         {}", style("(not created)").dim());
    }
}

fn show_file(heading: &str, path: PathBuf) -> Result<()> {
    println!("{} {}", style(heading).bold(), style(path.display()).dim());
    println!();

    if path.exists() {
        let content = fs::read_to_string(&path).into_diagnostic()?;
        print!("{}", content);
    } else {
        println!("{}", style("(not created)").dim());
    }

    Ok(())
}
