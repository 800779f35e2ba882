use std::path::PathBuf;

use clap::Parser;

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "ketodot",
    version,
    about = "Draws a relation graph based on Ory Keto relation tuples",
    long_about = "Reads relation tuples in Ory Keto syntax and draws the resulting graph of \
                  relations, either as Graphviz DOT text or as an image. Tuples linked through \
                  subject sets share a color. With --watch the output is regenerated whenever \
                  an input file changes."
)]
pub struct Cli {
    /// Relation tuple files; `-` reads stdin (the default when none are given)
    pub files: Vec<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file; stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Regenerate the output whenever an input file changes
    #[arg(short, long)]
    pub watch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["ketodot"]);

        assert!(cli.files.is_empty());
        assert!(cli.config.is_none());
        assert!(cli.output.is_none());
        assert!(cli.format.is_none());
        assert!(!cli.watch);
    }

    #[test]
    fn cli_parses_multiple_files() {
        let cli = Cli::parse_from(["ketodot", "a.keto", "-", "b.keto"]);

        assert_eq!(
            cli.files,
            vec![
                PathBuf::from("a.keto"),
                PathBuf::from("-"),
                PathBuf::from("b.keto")
            ]
        );
    }

    #[test]
    fn cli_parses_short_flags() {
        let cli = Cli::parse_from(["ketodot", "-o", "graph.svg", "-f", "svg", "-w", "tuples.keto"]);

        assert_eq!(cli.output, Some(PathBuf::from("graph.svg")));
        assert_eq!(cli.format, Some(OutputFormat::Svg));
        assert!(cli.watch);
    }

    #[test]
    fn cli_parses_config_flag() {
        let cli = Cli::parse_from(["ketodot", "--config", "/etc/ketodot.toml", "tuples.keto"]);

        assert_eq!(cli.config, Some(PathBuf::from("/etc/ketodot.toml")));
    }

    #[test]
    fn cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["ketodot", "--format", "gif"]);

        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn cli_version_flag() {
        let result = Cli::try_parse_from(["ketodot", "--version"]);

        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
