use clap::ValueEnum;
use renbatch_core::{AddPosition, OccurrencePolicy, Preview};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Annotated,
    Table,
    Summary,
    Json,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Annotated => Self::Annotated,
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::Json => Self::Json,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for renbatch_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OccurrenceArg {
    All,
    First,
    Last,
}

impl From<OccurrenceArg> for OccurrencePolicy {
    fn from(arg: OccurrenceArg) -> Self {
        match arg {
            OccurrenceArg::All => Self::All,
            OccurrenceArg::First => Self::First,
            OccurrenceArg::Last => Self::Last,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AddPositionArg {
    /// Before the name
    Start,
    /// Before the extension
    End,
}

impl From<AddPositionArg> for AddPosition {
    fn from(arg: AddPositionArg) -> Self {
        match arg {
            AddPositionArg::Start => Self::Start,
            AddPositionArg::End => Self::End,
        }
    }
}
