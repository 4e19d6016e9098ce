// Simple Components - demo runner
//
// Loads configuration, installs logging, binds the donation page and
// scripts a donation through the page event loop:
// - Registry: form + stats components, bound from markup
// - Page: parsed document and the listeners attached during load
// - Console: log lines captured by the logging layer

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use simple_components::config::Config;
use simple_components::demo::{self, DONATION_PAGE};
use simple_components::logging::{self, LogBuffer, LogLevel};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    if let Some(cli::Commands::Config { show, reset, path }) = cli.command {
        return cli::handle_config(show, reset, path);
    }

    let config = Config::from_env().context("loading configuration")?;

    let console = LogBuffer::new();
    // The guard must be kept alive so the file writer flushes on exit
    let _file_guard = logging::init(&config.logging, console.clone());

    let html = match &cli.page {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => DONATION_PAGE.to_string(),
    };

    let mut page = demo::load_page(&html, config.markup.clone()).context("loading page")?;
    for diagnostic in page.registry().diagnostics() {
        println!("diagnostic: {}", diagnostic);
    }

    for round in 1..=cli.repeat {
        demo::donate(&mut page, &cli.email, &cli.amount)
            .with_context(|| format!("donation {} of {}", round, cli.repeat))?;
    }

    match demo::stats_snapshot(&page) {
        Some((donations, raised)) => {
            println!("donations: {}", donations);
            println!("raised:    {}", demo::format::format_usd(raised));
        }
        None => println!("no stats component on this page"),
    }

    println!();
    println!("alerts:");
    for alert in page.document().alerts() {
        println!("  {}", alert);
    }

    let problems: Vec<_> = console
        .get_all()
        .into_iter()
        .filter(|entry| matches!(entry.level, LogLevel::Warn | LogLevel::Error))
        .collect();
    if !problems.is_empty() {
        println!();
        println!("console:");
        for entry in problems {
            println!(
                "  {} {:<5} {}: {}",
                entry.timestamp.format("%H:%M:%S%.3f"),
                entry.level.as_str(),
                entry.target,
                entry.message
            );
        }
    }

    Ok(())
}
