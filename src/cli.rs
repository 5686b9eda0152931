//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::services::settings_service::checkbox_state;
use crate::utils::icons::DEFAULT_ICON_DIR;
use crate::utils::number::MAX_FRACTION_DIGITS;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:4242/api/1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Parser)]
#[command(
    name = "portfolio-settings",
    about = "Settings panel for the portfolio tracker"
)]
pub struct Cli {
    #[arg(long, global = true, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,
    #[arg(long, global = true, env = "ICON_DIR", default_value = DEFAULT_ICON_DIR)]
    pub icon_dir: PathBuf,
    #[arg(
        long = "timeout",
        global = true,
        env = "BACKEND_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Seconds to wait for the backend before giving up"
    )]
    pub timeout_secs: u64,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn backend_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the settings page to stdout or a file
    Render(RenderArgs),
    /// Print the current settings
    Show,
    /// Submit changed settings to the backend
    Set(SetArgs),
    /// Show a USD value in the main currency
    Convert(ConvertArgs),
    /// Convert a fiat amount to USD
    ToUsd(ToUsdArgs),
    /// Check that an exchange is supported
    Exchange(ExchangeArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(help = "Write the page to this file instead of stdout")]
    pub output: Option<PathBuf>,
}

/// Fields left out keep the value the backend currently holds
#[derive(Debug, Default, Args)]
pub struct SetArgs {
    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(0..=MAX_FRACTION_DIGITS as i64)
    )]
    pub floating_precision: Option<u8>,
    #[arg(long, value_parser = parse_checkbox, help = "on/off, true/false or 1/0")]
    pub anonymized_logs: Option<bool>,
    #[arg(long, help = "DD/MM/YYYY")]
    pub historical_data_start: Option<String>,
    #[arg(long)]
    pub main_currency: Option<String>,
    #[arg(long)]
    pub eth_rpc_port: Option<String>,
    #[arg(long, help = "Hours between balance snapshots")]
    pub balance_save_frequency: Option<u32>,
}

impl SetArgs {
    pub fn is_empty(&self) -> bool {
        self.floating_precision.is_none()
            && self.anonymized_logs.is_none()
            && self.historical_data_start.is_none()
            && self.main_currency.is_none()
            && self.eth_rpc_port.is_none()
            && self.balance_save_frequency.is_none()
    }
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    pub usd_value: String,
    #[arg(help = "Asset the value belongs to")]
    pub asset: Option<String>,
    #[arg(help = "Amount of the asset, required when it is the main currency")]
    pub amount: Option<String>,
}

#[derive(Debug, Args)]
pub struct ToUsdArgs {
    pub currency: String,
    pub amount: String,
}

#[derive(Debug, Args)]
pub struct ExchangeArgs {
    pub name: String,
}

fn parse_checkbox(raw: &str) -> Result<bool, String> {
    checkbox_state(raw).ok_or_else(|| format!("expected on/off, true/false or 1/0, got '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_takes_typed_flags() {
        let cli = Cli::try_parse_from([
            "portfolio-settings",
            "set",
            "--floating-precision",
            "4",
            "--main-currency",
            "EUR",
            "--anonymized-logs",
            "on",
        ])
        .unwrap();

        match cli.command {
            Command::Set(args) => {
                assert_eq!(args.floating_precision, Some(4));
                assert_eq!(args.main_currency.as_deref(), Some("EUR"));
                assert_eq!(args.anonymized_logs, Some(true));
                assert!(args.eth_rpc_port.is_none());
                assert!(!args.is_empty());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_precision_is_bounded() {
        for value in ["101", "4294967295", "-1", "two"] {
            let result = Cli::try_parse_from([
                "portfolio-settings",
                "set",
                "--floating-precision",
                value,
            ]);
            assert!(result.is_err(), "{} should be rejected", value);
        }
        assert!(Cli::try_parse_from(["portfolio-settings", "set", "--floating-precision", "100"]).is_ok());
    }

    #[test]
    fn test_unknown_checkbox_value_is_rejected() {
        let result = Cli::try_parse_from(["portfolio-settings", "set", "--anonymized-logs", "maybe"]);
        assert!(result.is_err());
        let cli = Cli::try_parse_from(["portfolio-settings", "set", "--anonymized-logs", "off"]).unwrap();
        assert!(matches!(cli.command, Command::Set(SetArgs { anonymized_logs: Some(false), .. })));
    }

    #[test]
    fn test_global_flags_and_subcommands() {
        let cli = Cli::try_parse_from([
            "portfolio-settings",
            "to-usd",
            "EUR",
            "12.5",
            "--backend-url",
            "http://localhost:9000/api/1/",
            "--timeout",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.backend_url(), "http://localhost:9000/api/1");
        assert_eq!(cli.timeout(), Duration::from_secs(5));
        assert!(matches!(cli.command, Command::ToUsd(ToUsdArgs { ref currency, .. }) if currency == "EUR"));

        assert!(Cli::try_parse_from(["portfolio-settings", "convert"]).is_err());
        assert!(Cli::try_parse_from(["portfolio-settings", "frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["portfolio-settings", "--timeout", "soon", "show"]).is_err());
    }
}
