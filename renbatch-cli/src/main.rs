use anyhow::Result;
use clap::{CommandFactory, Parser};
use renbatch_core::{Config, OutputFormatter, VersionResult};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod prompt;
mod rename;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color);

    let result = run(cli);

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");

            // Determine exit code based on error type
            let message = e.to_string();
            let exit_code = if message.contains("invalid") || message.contains("not found") {
                2 // Invalid input
            } else {
                3 // Internal error
            };

            process::exit(exit_code);
        },
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Version { output } => {
            handle_version(output);
            Ok(0)
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(shell, &mut cmd, "renbatch", &mut io::stdout())?;
            Ok(0)
        },

        Commands::Plan { rename } => {
            let config = load_config()?;
            let use_color = color_preference(cli.no_color, &config);
            rename::handle_plan(&rename, &config, use_color)
        },

        Commands::Apply { rename } => {
            let config = load_config()?;
            let use_color = color_preference(cli.no_color, &config);
            rename::handle_apply(&rename, &config, use_color, cli.yes)
        },
    }
}

/// `RUST_LOG` wins; otherwise warn, raised by each `-v`. Logs go to stderr so
/// stdout stays clean for JSON output.
fn init_logging(verbose: u8, no_color: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(!no_color)
        .init();
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("renbatch").join("config.toml"))
}

fn load_config() -> Result<Config> {
    Ok(Config::load_layered(global_config_path().as_deref())?)
}

/// `--no-color` forces plain output; otherwise the config decides, and an
/// unset config auto-detects a terminal.
fn color_preference(no_color: bool, config: &Config) -> Option<bool> {
    if no_color {
        Some(false)
    } else {
        config.defaults.use_color
    }
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out: &mut dyn Write,
) -> Result<()> {
    clap_complete::generate(gen, cmd, name, out);
    out.flush()?;
    Ok(())
}

fn handle_version(output: OutputFormat) {
    let version_result = VersionResult {
        name: "renbatch".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    fn completions_for(shell: Shell) -> String {
        let mut cmd = <Cli as CommandFactory>::command();
        let mut out = Vec::new();
        generate_completions(shell, &mut cmd, "renbatch", &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_generate_completions_bash() {
        let content = completions_for(Shell::Bash);
        assert!(content.contains("complete"));
        assert!(content.contains("renbatch"));
    }

    #[test]
    fn test_generate_completions_zsh() {
        let content = completions_for(Shell::Zsh);
        assert!(content.contains("#compdef"));
        assert!(content.contains("renbatch"));
    }

    #[test]
    fn test_generate_completions_fish() {
        let content = completions_for(Shell::Fish);
        assert!(content.contains("complete"));
        assert!(content.contains("-c renbatch"));
    }

    #[test]
    fn test_color_preference() {
        let mut config = Config::default();
        assert_eq!(color_preference(false, &config), None);
        assert_eq!(color_preference(true, &config), Some(false));

        config.defaults.use_color = Some(true);
        assert_eq!(color_preference(false, &config), Some(true));
        assert_eq!(color_preference(true, &config), Some(false));
    }

    #[test]
    fn test_global_config_path_ends_with_renbatch() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with("renbatch/config.toml"));
        }
    }
}
