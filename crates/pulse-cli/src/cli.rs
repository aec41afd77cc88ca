//! CLI command definitions and argument parsing.

use crate::config::EndpointOverrides;
use crate::views::Period;
use clap::{Parser, Subcommand};
use pulse_feed::FeedConfig;
use pulse_sdk::Scheme;

/// Pulse 5G - Terminal dashboard for the Pulse incident-monitoring edge.
#[derive(Debug, Parser)]
#[command(name = "pulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Edge server host (overrides the profile)
    #[arg(long, env = "PULSE_HOST", global = true)]
    pub host: Option<String>,

    /// Edge server port (overrides the profile)
    #[arg(long, env = "PULSE_PORT", global = true)]
    pub port: Option<u16>,

    /// Edge server scheme (overrides the profile)
    #[arg(long, value_enum, env = "PULSE_SCHEME", global = true)]
    pub scheme: Option<SchemeArg>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (event names only)
    Quiet,
}

/// Scheme argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemeArg {
    /// Plain HTTP and WS
    Http,
    /// HTTPS and WSS
    Https,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Live dashboard fed by the alert stream (default)
    Watch(WatchArgs),

    /// Recent incidents from the edge server
    Incidents(IncidentsArgs),

    /// Incident analytics and trend chart
    Analytics(AnalyticsArgs),

    /// Camera status
    Cameras,

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the watch command.
#[derive(Debug, Default, Parser)]
pub struct WatchArgs {
    /// Exit after this many incidents have arrived
    #[arg(short = 'n', long)]
    pub max_events: Option<u64>,

    /// Incidents kept on screen (defaults to the configured store capacity)
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Reconnect preset, replacing the configured [feed] table
    #[arg(long, value_enum)]
    pub preset: Option<FeedPreset>,
}

/// Feed connector presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FeedPreset {
    /// Built-in defaults
    Default,
    /// Fast reconnect, short idle timeout
    Aggressive,
    /// Slow reconnect, long idle timeout
    Lenient,
}

/// Arguments for the incidents command.
#[derive(Debug, Parser)]
pub struct IncidentsArgs {
    /// Maximum number of rows
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the analytics command.
#[derive(Debug, Parser)]
pub struct AnalyticsArgs {
    /// Chart period
    #[arg(long, value_enum, default_value = "week")]
    pub period: PeriodArg,
}

/// Chart period argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PeriodArg {
    /// Monday to Sunday
    Week,
    /// Four weeks
    Month,
    /// January to December
    Year,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Edge server base URL (e.g., http://edge.local:8000)
        url: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl Cli {
    /// Endpoint overrides collected from flags and environment.
    pub fn endpoint_overrides(&self) -> EndpointOverrides {
        EndpointOverrides {
            host: self.host.clone(),
            port: self.port,
            scheme: self.scheme.map(Into::into),
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SchemeArg> for Scheme {
    fn from(scheme: SchemeArg) -> Self {
        match scheme {
            SchemeArg::Http => Scheme::Http,
            SchemeArg::Https => Scheme::Https,
        }
    }
}

impl From<PeriodArg> for Period {
    fn from(period: PeriodArg) -> Self {
        match period {
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
            PeriodArg::Year => Period::Year,
        }
    }
}

impl From<FeedPreset> for FeedConfig {
    fn from(preset: FeedPreset) -> Self {
        match preset {
            FeedPreset::Default => FeedConfig::default(),
            FeedPreset::Aggressive => FeedConfig::aggressive(),
            FeedPreset::Lenient => FeedConfig::lenient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["pulse"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_watch_command() {
        let cli = Cli::parse_from(["pulse", "watch", "--max-events", "5", "--preset", "lenient"]);
        match cli.command {
            Some(Command::Watch(args)) => {
                assert_eq!(args.max_events, Some(5));
                assert_eq!(args.preset, Some(FeedPreset::Lenient));
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_analytics_period_defaults_to_week() {
        let cli = Cli::parse_from(["pulse", "analytics"]);
        match cli.command {
            Some(Command::Analytics(args)) => assert_eq!(args.period, PeriodArg::Week),
            _ => panic!("Expected Analytics command"),
        }

        let cli = Cli::parse_from(["pulse", "analytics", "--period", "year"]);
        match cli.command {
            Some(Command::Analytics(args)) => {
                assert_eq!(Period::from(args.period), Period::Year)
            }
            _ => panic!("Expected Analytics command"),
        }
    }

    #[test]
    fn test_global_endpoint_flags() {
        let cli = Cli::parse_from([
            "pulse",
            "cameras",
            "--host",
            "edge.local",
            "--port",
            "9000",
            "--scheme",
            "https",
            "-vv",
        ]);
        let overrides = cli.endpoint_overrides();
        assert_eq!(overrides.host.as_deref(), Some("edge.local"));
        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.scheme, Some(Scheme::Https));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_profile_set() {
        let cli = Cli::parse_from(["pulse", "profile", "set", "lab", "http://10.0.0.5:8080"]);
        match cli.command {
            Some(Command::Profile(ProfileArgs {
                action: ProfileAction::Set { name, url },
            })) => {
                assert_eq!(name, "lab");
                assert_eq!(url, "http://10.0.0.5:8080");
            }
            _ => panic!("Expected Profile Set command"),
        }
    }

    #[test]
    fn test_preset_conversion() {
        let config: FeedConfig = FeedPreset::Aggressive.into();
        assert_eq!(config, FeedConfig::aggressive());
    }
}
