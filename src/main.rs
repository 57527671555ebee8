//! flowview - Entry Point

use clap::Parser;
use flowview::source::SourceSpec;
use flowview::view::{ColorConfig, TableStyles, TuiOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// flowview - live, virtualized table of captured network flows
#[derive(Parser, Debug)]
#[command(name = "flowview")]
#[command(version)]
#[command(about = "Live-tailing TUI table for JSONL network flow captures")]
pub struct Args {
    /// Path to JSONL capture file (generates synthetic traffic if not provided)
    pub file: Option<PathBuf>,

    /// Follow the file for new content (like tail -f)
    #[arg(short, long)]
    pub follow: bool,

    /// Number of synthetic flows generated up front
    #[arg(long, default_value = "200", conflicts_with = "file")]
    pub synthetic: usize,

    /// Milliseconds between synthetic flows (0 stops after the initial batch)
    #[arg(long, default_value = "100", conflicts_with = "file")]
    pub rate: u64,

    /// Row height in terminal lines (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub row_height: Option<u32>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Where flows come from: the capture file, or a synthetic stream.
    pub fn source_spec(&self) -> SourceSpec {
        match &self.file {
            Some(path) => SourceSpec::File {
                path: path.clone(),
                follow: self.follow,
            },
            None => SourceSpec::Synthetic {
                initial: self.synthetic,
                rate: (self.rate > 0).then(|| Duration::from_millis(self.rate)),
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = flowview::config::resolve_config(args.config.clone(), args.row_height)?;

    flowview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = flowview::source::open_source(args.source_spec())?;

    let options = TuiOptions {
        table: config.table_settings()?,
        tick_rate: config.tick_rate(),
        styles: TableStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color)),
    };

    flowview::view::run_with_source(source, options)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["flowview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["flowview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["flowview"]);
        assert_eq!(args.file, None);
        assert!(!args.follow);
        assert_eq!(args.synthetic, 200);
        assert_eq!(args.rate, 100);
        assert_eq!(args.row_height, None);
        assert_eq!(args.config, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_no_args_uses_synthetic_source() {
        let args = Args::parse_from(["flowview"]);
        assert_eq!(
            args.source_spec(),
            SourceSpec::Synthetic {
                initial: 200,
                rate: Some(Duration::from_millis(100)),
            }
        );
    }

    #[test]
    fn test_rate_zero_stops_synthetic_stream() {
        let args = Args::parse_from(["flowview", "--synthetic", "5", "--rate", "0"]);
        assert_eq!(
            args.source_spec(),
            SourceSpec::Synthetic {
                initial: 5,
                rate: None,
            }
        );
    }

    #[test]
    fn test_file_path_selects_file_source() {
        let args = Args::parse_from(["flowview", "flows.jsonl", "-f"]);
        assert_eq!(
            args.source_spec(),
            SourceSpec::File {
                path: PathBuf::from("flows.jsonl"),
                follow: true,
            }
        );
    }

    #[test]
    fn test_follow_flag_long() {
        let args = Args::parse_from(["flowview", "flows.jsonl", "--follow"]);
        assert!(args.follow);
    }

    #[test]
    fn test_synthetic_conflicts_with_file() {
        let result = Args::try_parse_from(["flowview", "flows.jsonl", "--synthetic", "10"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_row_height_rejects_zero() {
        let result = Args::try_parse_from(["flowview", "--row-height", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_row_height_flows_through_config_precedence_chain() {
        use flowview::config::loader::{apply_cli_overrides, merge_config};
        use flowview::config::ConfigFile;

        let config_file = ConfigFile {
            row_height: Some(3),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.row_height, 3, "Config file should override default");

        let with_cli = apply_cli_overrides(merged, Some(2));
        assert_eq!(with_cli.row_height, 2, "CLI should override all other sources");
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["flowview", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["flowview", "--no-color"]);
        assert!(args.no_color);
    }
}
