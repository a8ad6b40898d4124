pub mod args;
pub mod types;

pub use args::{Cli, Commands, RenameArgs};
pub use types::{OutputFormat, PreviewArg};
