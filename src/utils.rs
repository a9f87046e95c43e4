//! Shared helpers for the CLI commands

use colored::Colorize;
use inquire::InquireError;

use sprout::config::Config;
use sprout::error::{Result, SproutError};
use sprout::form::ValidationError;
use sprout::garden::Garden;
use sprout::notice::Notice;
use sprout::store::PlantStore;

/// Load the garden from the configured database
pub fn open_garden(config: &Config) -> Result<Garden<PlantStore>> {
    Garden::load(PlantStore::open(config)?)
}

pub fn print_notice(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{} {}", "✗".red(), notice.description);
    } else {
        println!("\n{} {}", notice.title.green().bold(), notice.description);
    }
}

/// Ask for one line of text, starting from `initial`
pub fn prompt_text(message: &str, initial: &str, placeholder: &str) -> Result<String> {
    inquire::Text::new(message)
        .with_initial_value(initial)
        .with_placeholder(placeholder)
        .prompt()
        .map_err(|e| match e {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                SproutError::PromptCancelled
            }
            // No terminal to ask on: the field simply wasn't given
            InquireError::NotTTY => SproutError::Validation(ValidationError::MissingField),
            InquireError::IO(e) => SproutError::IoError(e),
            other => SproutError::IoError(std::io::Error::other(other.to_string())),
        })
}

/// Truncate a string to max_len characters (not bytes), adding "..." if truncated.
/// Safe for non-ASCII content (emoji, CJK, etc).
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        chars[..max_len].iter().collect()
    } else {
        format!("{}...", chars[..max_len - 3].iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("ab", 3), "ab");
        assert_eq!(truncate_str("Ficus benjamina 🌿", 9), "Ficus ...");
    }
}
