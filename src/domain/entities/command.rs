use crate::domain::entities::row::Status;

/// Per-row edits the view can dispatch, keyed by row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCommand {
    SetStatus(Status),
    SetNote(String),
}

impl RowCommand {
    pub fn affects_stats(&self) -> bool {
        matches!(self, RowCommand::SetStatus(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    pub applied: bool,
    pub refresh_stats: bool,
}

impl CommandOutcome {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn applied(command: &RowCommand) -> Self {
        Self {
            applied: true,
            refresh_stats: command.affects_stats(),
        }
    }
}
