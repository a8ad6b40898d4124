#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod config;
pub mod error;
pub mod operations;
pub mod options;
pub mod output;
pub mod pattern;
pub mod planner;
pub mod preview;
pub mod resolver;
pub mod selector;

pub use apply::{apply_plan, ApplyReport, RenameFailure};
pub use config::{Config, DefaultsConfig};
pub use error::{ConfigError, PatternError};
pub use operations::rename_operation;
pub use options::{AddPosition, OccurrencePolicy, RenameOptions};
pub use output::{OutputFormat, OutputFormatter, RenameResult, VersionResult, NO_MATCHES_NOTICE};
pub use pattern::{build_pattern, find_matches, split_extension, Match, MatchPattern, Span};
pub use planner::{
    plan_renames, rename_name, EntryKind, NameEdit, Plan, PlanOutcome, PlanStats, PlannedChange,
    RememberedChoices, SpanRecord,
};
pub use preview::{render_plan, write_preview, Preview};
pub use resolver::{DeclineResolver, FixedResolver, OccurrenceResolver, ScriptedResolver};
pub use selector::OccurrenceSelector;
