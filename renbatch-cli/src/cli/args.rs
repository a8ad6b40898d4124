use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{AddPositionArg, OccurrenceArg, OutputFormat, PreviewArg};

/// Batch rename files by removing, replacing and inserting text in their names
#[derive(Parser, Debug)]
#[command(name = "renbatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "RENBATCH_YES")]
    pub yes: bool,
}

/// Arguments shared by plan and apply
#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// Folders whose direct entries are renamed
    #[arg(required = true)]
    pub folders: Vec<PathBuf>,

    /// Text (or regex with --regex) to remove from names
    #[arg(short = 'r', long = "remove", value_name = "PATTERN")]
    pub remove: Option<String>,

    /// Replacement for each selected match. With --regex, $1 and ${name} expand;
    /// write ${1} when a letter, digit or _ follows (${1}_bak).
    #[arg(short = 'w', long = "replace", value_name = "TEXT", default_value = "")]
    pub replace: String,

    /// Which matches to replace when a name matches more than once
    #[arg(long, value_enum)]
    pub occurrence: Option<OccurrenceArg>,

    /// Text to insert into every processed name
    #[arg(short = 'a', long = "add", value_name = "TEXT")]
    pub add: Option<String>,

    /// Where to insert --add text
    #[arg(long, value_enum)]
    pub add_position: Option<AddPositionArg>,

    /// Only process names ending with this suffix (e.g. .txt)
    #[arg(short = 'e', long = "ext", value_name = "SUFFIX")]
    pub ext: Option<String>,

    /// Treat --remove as a regular expression
    #[arg(long, conflicts_with = "no_regex")]
    pub regex: bool,

    /// Treat --remove as literal text even if the config enables regex
    #[arg(long)]
    pub no_regex: bool,

    /// Ask which occurrences to replace for names with several matches
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Pre-answer the occurrence question for one name (NAME=SELECTOR, e.g. photo_x_x.jpg=2)
    #[arg(long = "select", value_name = "NAME=SELECTOR", value_parser = parse_select)]
    pub select: Vec<(String, String)>,

    /// Preview format (defaults to the configured preview_format)
    #[arg(long, value_enum)]
    pub preview: Option<PreviewArg>,

    /// Output format for machine consumption
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Suppress preview and summary output
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what would be renamed without touching anything
    Plan {
        #[command(flatten)]
        rename: RenameArgs,
    },

    /// Plan, confirm and perform the renames
    Apply {
        #[command(flatten)]
        rename: RenameArgs,
    },

    /// Show version information
    Version {
        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Split `NAME=SELECTOR` at the last `=`, since selectors never contain one
fn parse_select(value: &str) -> Result<(String, String), String> {
    match value.rsplit_once('=') {
        Some((name, selector)) if !name.is_empty() => {
            Ok((name.to_string(), selector.to_string()))
        },
        _ => Err(format!("expected NAME=SELECTOR, got '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(
            parse_select("a_x_b_x.txt=1,2"),
            Ok(("a_x_b_x.txt".to_string(), "1,2".to_string()))
        );
        assert_eq!(
            parse_select("k=v=x.txt=l"),
            Ok(("k=v=x.txt".to_string(), "l".to_string()))
        );
        assert_eq!(parse_select("name="), Ok(("name".to_string(), String::new())));
        assert!(parse_select("no-separator").is_err());
        assert!(parse_select("=2").is_err());
    }

    #[test]
    fn test_plan_args() {
        let cli = Cli::try_parse_from([
            "renbatch",
            "plan",
            "photos",
            "-r",
            "_x",
            "--occurrence",
            "last",
            "--add",
            "_new",
            "--add-position",
            "start",
            "--select",
            "a_x_x.jpg=a",
        ])
        .unwrap();

        let Commands::Plan { rename } = cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(rename.folders, vec![PathBuf::from("photos")]);
        assert_eq!(rename.remove.as_deref(), Some("_x"));
        assert_eq!(rename.replace, "");
        assert_eq!(rename.occurrence, Some(OccurrenceArg::Last));
        assert_eq!(rename.add_position, Some(AddPositionArg::Start));
        assert_eq!(
            rename.select,
            vec![("a_x_x.jpg".to_string(), "a".to_string())]
        );
        assert_eq!(rename.output, OutputFormat::Summary);
    }

    #[test]
    fn test_folders_required() {
        assert!(Cli::try_parse_from(["renbatch", "apply", "-r", "x"]).is_err());
    }

    #[test]
    fn test_regex_conflicts_with_no_regex() {
        assert!(
            Cli::try_parse_from(["renbatch", "plan", ".", "--regex", "--no-regex"]).is_err()
        );
    }

    #[test]
    fn test_verbose_is_counted() {
        let cli = Cli::try_parse_from(["renbatch", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
