//! Miscellaneous commands: ui, config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use sprout::cli::{Cli, CompletionShell};
use sprout::config::Config;
use sprout::error::Result;

/// Interactive TUI dashboard
#[cfg(feature = "tui")]
pub fn cmd_ui(config: &Config) -> Result<()> {
    sprout::tui::run(config)
}

#[cfg(not(feature = "tui"))]
pub fn cmd_ui(_config: &Config) -> Result<()> {
    eprintln!("TUI not available. Rebuild with: cargo build --features tui");
    Ok(())
}

/// Show the effective configuration and where it lives
pub fn cmd_config(config: &Config, path_only: bool, init: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    if init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            config.save()?;
            println!("{} Wrote {}", "✓".green(), config_path.display());
        }
        return Ok(());
    }
    if path_only {
        println!("{}", config_path.display());
        return Ok(());
    }

    let state = if config_path.exists() { "" } else { " (not created, using defaults)" };
    println!("\n{} {}{}", "Config:".bold(), config_path.display(), state.dimmed());
    println!("{} {}", "Database:".bold(), Config::db_path()?.display());
    println!("{} {}\n", "Logs:".bold(), Config::log_dir()?.display());
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "sprout", &mut io::stdout());
    Ok(())
}
