use clap::{Parser, Subcommand};

use crate::cmd::*;

mod args;

pub const HYPHEN: &str = "-";

/// The CLI interface for the bitstream application.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The selected command.
    #[clap(subcommand)]
    pub command: BitstreamCommand,

    #[clap(flatten)]
    pub verbosity: args::Verbosity,
}

/// The top-level commands supported by bitstream.
#[derive(Debug, Subcommand)]
pub enum BitstreamCommand {
    Pack(pack::Pack),
    Unpack(unpack::Unpack),
}

impl Command for BitstreamCommand {
    fn handle(self) -> eyre::Result<()> {
        match self {
            Self::Pack(pack) => pack.handle(),
            Self::Unpack(unpack) => unpack.handle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_unpack_widths() {
        let cli = Cli::parse_from(["bitstream", "unpack", "-", "-w", "3,29,17"]);
        assert!(matches!(cli.command, BitstreamCommand::Unpack(..)));

        assert!(Cli::try_parse_from(["bitstream", "unpack", "-", "-w", "3,33"]).is_err());
    }
}
