use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "santabot")]
#[command(author, version, about = "Telegram bot that registers Secret Santa participants and draws who gifts whom", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot in normal mode
    Run {
        /// Use webhook mode instead of long polling
        #[arg(long)]
        webhook: bool,
    },

    /// Print the persisted participants without starting the bot
    List {
        /// Participants file (defaults to PARTICIPANTS_FILE)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Check whether a text would be accepted as a phone number
    CheckPhone {
        /// Text to check
        text: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_webhook_flag() {
        let cli = Cli::try_parse_from(["santabot", "run", "--webhook"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Run { webhook: true })));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["santabot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_with_file() {
        let cli = Cli::try_parse_from(["santabot", "list", "--file", "backup.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { file: Some(ref f) }) if f == "backup.json"));
    }
}
