//! sprout - a plant-watering reminder for the terminal

use clap::Parser;

use sprout::cli::{Cli, Commands};
use sprout::config::Config;
use sprout::error::Result;
use sprout::logging::{self, LogTarget};

mod commands;
mod utils;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Completions need neither config nor a log file
    if let Commands::Completions { shell } = cli.command {
        return commands::cmd_completions(shell);
    }

    let config = Config::load()?;
    let target = match cli.command {
        Commands::Ui => LogTarget::FileOnly,
        _ => LogTarget::FileAndStderr,
    };
    logging::init(&config, target);

    match cli.command {
        Commands::Add { name, every } => commands::cmd_add(&config, name, every),
        Commands::Water { plant } => commands::cmd_water(&config, &plant),
        Commands::List { json } => commands::cmd_list(&config, json),
        Commands::Watch { plant } => commands::cmd_watch(&config, plant),
        Commands::Export => commands::cmd_export(&config),
        Commands::Ui => commands::cmd_ui(&config),
        Commands::Config { path, init } => commands::cmd_config(&config, path, init),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
