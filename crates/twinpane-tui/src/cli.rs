//! Command line arguments.

use clap::Parser;

#[derive(Debug, Default, PartialEq, Eq, Parser)]
#[command(
    name = "twinpane-tui",
    about = "Side-by-side view of what changed between a revision and the working tree",
    version
)]
pub struct CliArgs {
    /// Compare against the index instead of the working tree
    #[arg(long, alias = "staged")]
    pub cached: bool,

    /// Left side revision (default: HEAD, followed as it moves)
    pub revision: Option<String>,

    /// Restrict the listing to these paths
    #[arg(last = true)]
    pub paths: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("twinpane-tui").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_revision_and_paths() {
        let args = parse(&["main", "--", "src", "--weird-name"]).unwrap();
        assert_eq!(
            args,
            CliArgs {
                revision: Some("main".to_string()),
                paths: vec!["src".to_string(), "--weird-name".to_string()],
                ..CliArgs::default()
            }
        );
    }

    #[test]
    fn test_cached() {
        let args = parse(&["--cached"]).unwrap();
        assert!(args.cached);
        assert_eq!(args.revision, None);

        assert!(parse(&["--staged", "main"]).unwrap().cached);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse(&["a", "b"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
