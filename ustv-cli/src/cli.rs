use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ustv",
    about = "ustv - a simple command-line client for USTVnow",
    version,
    author
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub watch: WatchArgs,

    /// Show requests, responses and intermediate data
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Proxy URL (supports http, https, socks5)
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Proxy username (if proxy requires authentication)
    #[arg(long, global = true)]
    pub proxy_username: Option<String>,

    /// Proxy password (if proxy requires authentication)
    #[arg(long, global = true)]
    pub proxy_password: Option<String>,

    /// Override the API host
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

/// Options of the default flow: log in, pick a channel and quality, write the playlist.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct WatchArgs {
    /// USTVnow username (email address)
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// USTVnow password
    #[arg(short, long, global = true, env = "USTV_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Channel code (run without this argument to see a list)
    #[arg(short, long)]
    pub channel: Option<String>,

    /// Channel bitrate in bits per second (run without this argument to see a list)
    #[arg(short, long)]
    pub quality: Option<u64>,

    /// Just write the m3u8 file for the channel without playing
    #[arg(short, long)]
    pub download_only: bool,

    /// Override the output m3u8 filename
    #[arg(short, long)]
    pub output_filename: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Program used to play the playlist instead of the system default
    #[arg(long)]
    pub player: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the channels of the account
    Channels {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show configuration information
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "ustv", "-u", "me@example.com", "-p", "pw", "-c", "wnbc", "-q", "1200000", "-d", "-o",
            "out.m3u8", "-v",
        ])
        .unwrap();
        assert!(args.command.is_none());
        assert!(args.verbose);
        assert_eq!(args.watch.username.as_deref(), Some("me@example.com"));
        assert_eq!(args.watch.channel.as_deref(), Some("wnbc"));
        assert_eq!(args.watch.quality, Some(1_200_000));
        assert!(args.watch.download_only);
        assert_eq!(
            args.watch.output_filename.as_deref(),
            Some(std::path::Path::new("out.m3u8"))
        );
    }

    #[test]
    fn quality_must_be_numeric() {
        assert!(Args::try_parse_from(["ustv", "-q", "high"]).is_err());
    }

    #[test]
    fn channels_subcommand() {
        let args = Args::try_parse_from(["ustv", "channels", "--json"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Channels { json: true })));
    }
}
