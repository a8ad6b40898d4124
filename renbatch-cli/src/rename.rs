use anyhow::{anyhow, Result};
use renbatch_core::{
    apply_plan, rename_operation, Config, OccurrenceResolver, OutputFormatter, PlanOutcome,
    Preview, RememberedChoices, RenameOptions, RenameResult, NO_MATCHES_NOTICE,
};
use std::io::{self, IsTerminal};
use std::str::FromStr;
use tracing::debug;

use crate::cli::{OutputFormat, RenameArgs};
use crate::prompt::{confirm_apply, non_interactive_resolver, Confirmation, TerminalResolver};

/// Flag values win over config defaults.
pub fn build_options(args: &RenameArgs, config: &Config) -> RenameOptions {
    let defaults = &config.defaults;
    RenameOptions {
        pattern_to_remove: args.remove.clone().unwrap_or_default(),
        occurrence: args.occurrence.map_or(defaults.occurrence, Into::into),
        replacement: args.replace.clone(),
        pattern_to_add: args.add.clone().unwrap_or_default(),
        add_position: args.add_position.map_or(defaults.add_position, Into::into),
        extension_filter: args.ext.clone().unwrap_or_default(),
        use_regex: if args.no_regex {
            false
        } else {
            args.regex || defaults.use_regex
        },
        interactive: args.interactive,
    }
}

/// Preview format from the flag, else the config. JSON output has no preview.
pub fn resolve_preview(args: &RenameArgs, config: &Config) -> Result<Preview> {
    if args.output == OutputFormat::Json || args.quiet {
        return Ok(Preview::None);
    }
    if let Some(preview) = args.preview {
        return Ok(preview.into());
    }
    Preview::from_str(&config.defaults.preview_format).map_err(|_| {
        anyhow!(
            "invalid preview_format '{}' in config",
            config.defaults.preview_format
        )
    })
}

fn seeded_choices(args: &RenameArgs) -> RememberedChoices {
    args.select
        .iter()
        .map(|(name, selector)| (name.clone(), Some(selector.clone())))
        .collect()
}

/// Plan one pass. The stdin lock held by the prompt is released on return.
fn plan_pass(
    args: &RenameArgs,
    options: &RenameOptions,
    choices: RememberedChoices,
) -> Result<(RenameResult, PlanOutcome)> {
    let mut resolver: Box<dyn OccurrenceResolver> =
        if options.interactive && io::stdin().is_terminal() {
            Box::new(TerminalResolver::new(io::stdin().lock(), io::stderr()))
        } else {
            Box::new(non_interactive_resolver)
        };
    rename_operation(&args.folders, options, true, resolver.as_mut(), choices)
}

fn print_result(result: &RenameResult, args: &RenameArgs) {
    if result.no_matches {
        eprintln!("{}", NO_MATCHES_NOTICE);
    }
    match args.output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if !args.quiet {
                print!("{}", result.format_summary());
            }
        },
    }
}

/// Dry run: print the preview and the planned counts.
pub fn handle_plan(args: &RenameArgs, config: &Config, use_color: Option<bool>) -> Result<i32> {
    let options = build_options(args, config);
    let preview = resolve_preview(args, config)?;

    let (result, outcome) = plan_pass(args, &options, seeded_choices(args))?;
    renbatch_core::write_preview(&outcome.plan, preview, use_color)?;

    let result = if args.output == OutputFormat::Json {
        result.with_plan(outcome.plan)
    } else {
        result
    };
    print_result(&result, args);
    Ok(0)
}

/// Plan, preview, confirm and rename. Returns 1 when any rename failed.
pub fn handle_apply(
    args: &RenameArgs,
    config: &Config,
    use_color: Option<bool>,
    assume_yes: bool,
) -> Result<i32> {
    let options = build_options(args, config);
    let preview = resolve_preview(args, config)?;
    let mut choices = seeded_choices(args);

    let plan = loop {
        let (result, outcome) = plan_pass(args, &options, choices)?;
        renbatch_core::write_preview(&outcome.plan, preview, use_color)?;

        if outcome.plan.changes.is_empty() {
            print_result(&result, args);
            return Ok(0);
        }
        if assume_yes {
            break outcome.plan;
        }

        match confirm_apply(&mut io::stdin().lock(), &mut io::stderr())? {
            Confirmation::Apply => break outcome.plan,
            Confirmation::Cancel => {
                eprintln!("Aborted. No files were renamed.");
                return Ok(0);
            },
            Confirmation::Replan => {
                debug!(forgotten = outcome.choices.len(), "re-planning without remembered choices");
                choices = RememberedChoices::new();
            },
        }
    };

    let report = apply_plan(&plan);
    let result = RenameResult::new(&plan, Some(&report));
    print_result(&result, args);

    if !result.has_failures() {
        return Ok(0);
    }

    // The summary already lists failures on stdout
    if args.output == OutputFormat::Json || args.quiet {
        for failure in &result.failures {
            eprintln!(
                "✗ Failed to rename {} -> {}: {}",
                failure.change.original_name, failure.change.new_name, failure.reason
            );
        }
    }
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use renbatch_core::{AddPosition, OccurrencePolicy};

    fn rename_args(extra: &[&str]) -> RenameArgs {
        let mut argv = vec!["renbatch", "plan", "."];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            crate::cli::Commands::Plan { rename } => rename,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_build_options_uses_config_defaults() {
        let mut config = Config::default();
        config.defaults.occurrence = OccurrencePolicy::Last;
        config.defaults.add_position = AddPosition::Start;
        config.defaults.use_regex = true;

        let options = build_options(&rename_args(&["-r", "_x"]), &config);
        assert_eq!(options.pattern_to_remove, "_x");
        assert_eq!(options.occurrence, OccurrencePolicy::Last);
        assert_eq!(options.add_position, AddPosition::Start);
        assert!(options.use_regex);
    }

    #[test]
    fn test_build_options_flags_override_config() {
        let mut config = Config::default();
        config.defaults.occurrence = OccurrencePolicy::Last;
        config.defaults.use_regex = true;

        let options = build_options(
            &rename_args(&[
                "--occurrence",
                "first",
                "--no-regex",
                "-a",
                "_bak",
                "--add-position",
                "end",
                "-e",
                ".csv",
            ]),
            &config,
        );
        assert_eq!(options.occurrence, OccurrencePolicy::First);
        assert!(!options.use_regex);
        assert_eq!(options.pattern_to_add, "_bak");
        assert_eq!(options.add_position, AddPosition::End);
        assert_eq!(options.extension_filter, ".csv");
    }

    #[test]
    fn test_resolve_preview() {
        let config = Config::default();
        assert_eq!(
            resolve_preview(&rename_args(&[]), &config).unwrap(),
            Preview::Annotated
        );
        assert_eq!(
            resolve_preview(&rename_args(&["--preview", "table"]), &config).unwrap(),
            Preview::Table
        );
        assert_eq!(
            resolve_preview(&rename_args(&["--output", "json"]), &config).unwrap(),
            Preview::None
        );

        let mut bad = Config::default();
        bad.defaults.preview_format = "diff".to_string();
        let err = resolve_preview(&rename_args(&[]), &bad).unwrap_err();
        assert!(err.to_string().contains("invalid preview_format"));
    }

    #[test]
    fn test_seeded_choices() {
        let choices = seeded_choices(&rename_args(&["--select", "a_x_x.txt=2"]));
        assert_eq!(choices.get("a_x_x.txt"), Some(&Some("2".to_string())));
        assert_eq!(choices.len(), 1);
    }
}
