//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pakr")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "The archive codec is chosen by suffix: .bz2 (bzip2) or .zst (zstd).\n\
                        Directories are bundled as tar first; name them NAME.tar.bz2 or NAME.tar.zst.")]
pub struct Cli {
    /// File or directory to compress, or archive to extract with -x
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Archive to create (must end in .bz2 or .zst)
    #[arg(value_name = "TARGET", required_unless_present = "extract")]
    pub target: Option<PathBuf>,

    /// Extract SOURCE instead of compressing it
    #[arg(short = 'x', long)]
    pub extract: bool,

    /// Print the elapsed wall-clock time when done
    #[arg(short, long)]
    pub benchmark: bool,

    /// Show a progress bar while data is transferred
    #[arg(short, long)]
    pub progress: bool,

    /// Compression level (1-9)
    #[arg(
        short = 'l',
        long,
        value_parser = clap::value_parser!(u8).range(1..=9),
        conflicts_with = "extract"
    )]
    pub level: Option<u8>,

    /// Extraction directory (default: current directory for tar payloads,
    /// the archive's directory otherwise)
    #[arg(short = 'o', long, value_name = "DIR", requires = "extract")]
    pub output_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("pakr").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compress_args() {
        let cli = parse(&["docs", "docs.tar.zst", "-b", "-p", "-l", "7"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("docs"));
        assert_eq!(cli.target, Some(PathBuf::from("docs.tar.zst")));
        assert!(!cli.extract);
        assert!(cli.benchmark);
        assert!(cli.progress);
        assert_eq!(cli.level, Some(7));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_extract_without_target() {
        let cli = parse(&["-x", "docs.tar.bz2", "-o", "out", "-vv"]).unwrap();
        assert!(cli.extract);
        assert_eq!(cli.source, PathBuf::from("docs.tar.bz2"));
        assert_eq!(cli.target, None);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_missing_target_is_usage_error() {
        let err = parse(&["a.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_level_out_of_range() {
        assert!(parse(&["a.txt", "a.txt.bz2", "-l", "0"]).is_err());
        assert!(parse(&["a.txt", "a.txt.bz2", "-l", "10"]).is_err());
    }

    #[test]
    fn test_flag_conflicts() {
        let err = parse(&["-x", "a.bz2", "-l", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let err = parse(&["a.txt", "a.txt.bz2", "-o", "out"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
