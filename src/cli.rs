use clap::{Parser, Subcommand, ValueEnum};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "sprout")]
#[command(author, version, about = "Keep track of when to water your plants", long_about = None)]
#[command(after_help = r#"Examples:
  sprout add "Snake Plant" --every 7     Register a plant watered every 7 days
  sprout list                            Show every plant and its countdown
  sprout water "Snake Plant"             Mark a plant as watered
  sprout watch                           Live countdown in the terminal
  sprout ui                              Interactive dashboard
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a plant (prompts for anything missing)
    #[command(after_help = r#"Examples:
  sprout add "Snake Plant" --every 7
  sprout add Fern -e 3
  sprout add                              # Interactive
"#)]
    Add {
        /// Plant name
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Watering interval in days
        #[arg(short, long, value_name = "DAYS", allow_hyphen_values = true)]
        every: Option<String>,
    },

    /// Mark a plant as watered
    Water {
        /// Plant id or name
        #[arg(value_name = "PLANT")]
        plant: String,
    },

    /// List plants with their countdowns
    #[command(after_help = r#"Examples:
  sprout list
  sprout list --json | jq '.plants[] | select(.needsWater) | .name'
"#)]
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show a live countdown until Ctrl+C
    Watch {
        /// Only this plant (id or name)
        #[arg(value_name = "PLANT")]
        plant: Option<String>,
    },

    /// Print the stored plant list as JSON
    Export,

    /// Open the interactive dashboard
    Ui,

    /// Show the effective configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,

        /// Write a config file with the current settings if none exists
        #[arg(long, conflicts_with = "path")]
        init: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_accepts_negative_interval_text() {
        let cli = Cli::try_parse_from(["sprout", "add", "Fern", "--every", "-3"]).unwrap();
        match cli.command {
            Commands::Add { name, every } => {
                assert_eq!(name.as_deref(), Some("Fern"));
                assert_eq!(every.as_deref(), Some("-3"));
            }
            _ => panic!("expected add"),
        }
    }
}
