use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shelf", about = "Browse series, chapters and pages of a local manga library", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Library root, overriding the configured one
    #[arg(short, long, global = true)]
    pub library: Option<PathBuf>,

    /// Print listings as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List every series in the library
    Series,
    /// List every chapter of a series
    Chapters { series: String },
    /// List the page identifiers of a chapter
    Pages { series: String, chapter: String },
    /// Print how a chapter is stored: directory, zip, rar or unsupported
    Format { series: String, chapter: String },
    /// Write the raw bytes of one page to stdout or a file
    Page {
        series: String,
        chapter: String,
        page: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["shelf", "series"], Command::Series)]
    #[case(&["shelf", "chapters", "One Piece"], Command::Chapters { series: "One Piece".into() })]
    #[case(
        &["shelf", "pages", "One Piece", "ch1.cbz"],
        Command::Pages { series: "One Piece".into(), chapter: "ch1.cbz".into() }
    )]
    #[case(
        &["shelf", "format", "One Piece", "ch1"],
        Command::Format { series: "One Piece".into(), chapter: "ch1".into() }
    )]
    #[case(
        &["shelf", "page", "One Piece", "ch1.cbz", "sub/001.jpg", "-o", "out.jpg"],
        Command::Page {
            series: "One Piece".into(),
            chapter: "ch1.cbz".into(),
            page: "sub/001.jpg".into(),
            output: Some(PathBuf::from("out.jpg")),
        }
    )]
    fn test_subcommands(#[case] args: &[&str], #[case] expected: Command) {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.command, expected);
        assert!(!cli.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["shelf", "series", "--json", "--library", "/srv/manga"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.library, Some(PathBuf::from("/srv/manga")));
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_missing_arguments() {
        assert!(Cli::try_parse_from(["shelf", "pages", "One Piece"]).is_err());
        assert!(Cli::try_parse_from(["shelf"]).is_err());
    }
}
