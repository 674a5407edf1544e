use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "reclink",
    version,
    about = "reclink - link files recursively",
    disable_version_flag = true
)]
pub struct Cli {
    /// Path to source directory
    #[arg(short, long, value_name = "PATH")]
    pub source: PathBuf,

    /// Path to target directory
    #[arg(short, long, value_name = "PATH")]
    pub target: PathBuf,

    /// Relative paths to be ignored (comma or space separated, repeatable)
    #[arg(short, long, value_name = "PATH,PATH", num_args = 1.., value_delimiter = ',', action = ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Replace existing targets
    #[arg(short, long)]
    pub replace: bool,

    /// Link to softlinks found in the source tree
    #[arg(short, long)]
    pub links: bool,

    /// Skip user confirmation
    #[arg(short, long)]
    pub quiet: bool,

    /// Use a predefined set of options from presets.toml
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Display version message and exit
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["reclink", "-s", "a", "-t", "b", "-r", "-l", "-q"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("a"));
        assert_eq!(cli.target, PathBuf::from("b"));
        assert!(cli.replace && cli.links && cli.quiet);
        assert!(cli.ignore.is_empty());
    }

    #[test]
    fn ignore_accepts_commas_spaces_and_repeats() {
        let cli = Cli::try_parse_from([
            "reclink", "-s", "a", "-t", "b", "-i", "x,y", "z", "--ignore", "w",
        ])
        .unwrap();
        assert_eq!(cli.ignore, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn missing_source_is_a_usage_error() {
        let err = Cli::try_parse_from(["reclink", "-t", "b"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn short_v_prints_version() {
        let err = Cli::try_parse_from(["reclink", "-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert_eq!(err.exit_code(), 0);
    }
}
