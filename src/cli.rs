// CLI module - argument parsing for the demo runner
//
// Without a subcommand the runner scripts one donation against a page.
// The `config` subcommand inspects or regenerates the config file.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use simple_components::config::{Config, VERSION};
use std::io::Write;
use std::path::PathBuf;

/// Simple Components - declarative components bound to HTML markup
#[derive(Parser)]
#[command(name = "simple-components")]
#[command(version = VERSION)]
#[command(about = "Bind components to a page and script a donation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// HTML page to load instead of the bundled donation page
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// E-mail typed into the form
    #[arg(long, default_value = "donor@example.org")]
    pub email: String,

    /// Preset amount to select (10, 25 or 50) or any custom amount
    #[arg(long, default_value = "25")]
    pub amount: String,

    /// Number of times to submit the form
    #[arg(long, default_value_t = 1)]
    pub repeat: u32,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Run a `config` subcommand
pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        println!("Usage: simple-components config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let Some(path) = Config::config_path() else {
        bail!("could not determine config path");
    };
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let Some(path) = Config::config_path() else {
        bail!("could not determine config path");
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
