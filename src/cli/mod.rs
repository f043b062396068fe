use crate::catalog::{Operation, Resource};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wawebjs", version, about = "WhatsApp-Web-JS gateway client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the operation catalog as a form schema.
    Catalog,
    /// Execute one operation for one or more items.
    Run(RunOpts),
    /// Probe the gateway root with the configured credentials.
    Check(CheckOpts),
    Config(ConfigOpts),
    Version,
}

#[derive(clap::Args)]
pub struct RunOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    /// chatting, session or auth.
    pub resource: Resource,
    /// sendText, sendPoll, start, stop, me or qr.
    pub operation: Operation,
    /// Field value as name=value; repeatable.
    #[arg(short = 'f', long = "field")]
    pub fields: Vec<String>,
    /// JSON file holding an array of per-item field objects.
    #[arg(long)]
    pub items: Option<PathBuf>,
    #[arg(long)]
    pub continue_on_fail: bool,
    /// Directory binary attachments are written to.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct CheckOpts {
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(clap::Args)]
pub struct ConfigOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Validate,
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "wawebjs",
            "run",
            "chatting",
            "sendPoll",
            "-f",
            "chatId=1@c.us",
            "--field",
            "title=Q",
            "--continue-on-fail",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(opts) => {
                assert_eq!(opts.resource, Resource::Chatting);
                assert_eq!(opts.operation, Operation::SendPoll);
                assert_eq!(opts.fields, vec!["chatId=1@c.us", "title=Q"]);
                assert!(opts.continue_on_fail);
                assert!(opts.items.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_rejects_unknown_resource() {
        assert!(Cli::try_parse_from(["wawebjs", "run", "chat", "sendText"]).is_err());
    }
}
