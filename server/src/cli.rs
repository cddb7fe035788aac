//! Command-line interface.

use clap::{Parser, Subcommand, ValueEnum};
use leakcheck_core::QueryKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "leakcheck",
    about = "Check whether an email, phone or username appears in known data breaches",
    version
)]
pub struct Cli {
    /// Config file (defaults to the XDG config path)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the lookup API over HTTP
    Serve {
        /// Listen address, overriding the config file
        #[arg(long)]
        bind: Option<String>,
    },

    /// Look up one identifier with the configured backend
    Check {
        /// Kind of identifier
        #[arg(short = 't', long = "type", value_enum, default_value_t = KindArg::Email)]
        kind: KindArg,

        /// Email address, phone number or username
        value: String,
    },
}

/// Identifier kind as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Email,
    Phone,
    Login,
}

impl From<KindArg> for QueryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Email => QueryKind::Email,
            KindArg::Phone => QueryKind::Phone,
            KindArg::Login => QueryKind::Login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_defaults_to_email() {
        let cli = Cli::try_parse_from(["leakcheck", "check", "a@b.com"]).unwrap();
        match cli.command {
            Commands::Check { kind, value } => {
                assert_eq!(QueryKind::from(kind), QueryKind::Email);
                assert_eq!(value, "a@b.com");
            }
            Commands::Serve { .. } => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_check_with_type() {
        let cli =
            Cli::try_parse_from(["leakcheck", "check", "--type", "login", "alice"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Check {
                kind: KindArg::Login,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "leakcheck",
            "--config",
            "/etc/leakcheck.toml",
            "serve",
            "--bind",
            "127.0.0.1:8080",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/leakcheck.toml")));
        assert!(matches!(cli.command, Commands::Serve { bind: Some(_) }));
    }
}
