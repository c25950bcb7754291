//! Command line for the `assessd` binary.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "assessd",
    version,
    about = "Smart Assessment sidecar",
    long_about = "JSON-lines sidecar for the Smart Assessment desktop app.\n\n\
                  Without a subcommand it serves requests on stdin/stdout.\n\
                  `check-llm` verifies the local LM Studio server."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format.
    #[arg(long = "log-format", value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve JSON-lines requests on stdin/stdout (the default).
    Serve,

    /// Check that LM Studio answers chat and grading requests.
    CheckLlm {
        /// Chat completions URL. Defaults to $LM_STUDIO_API_URL.
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Model name. Defaults to $LM_STUDIO_MODEL.
        #[arg(long, value_name = "NAME")]
        model: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["assessd"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn check_llm_takes_overrides() {
        let cli = Cli::try_parse_from([
            "assessd",
            "-vv",
            "check-llm",
            "--url",
            "http://127.0.0.1:9/v1/chat/completions",
            "--model",
            "qwen",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Some(Command::CheckLlm {
                url: Some("http://127.0.0.1:9/v1/chat/completions".to_string()),
                model: Some("qwen".to_string()),
            })
        );
    }
}
