use tracing::debug;

use super::{Event, Session, SessionError};
use crate::model::RegionId;
use crate::ops::navigate::Direction;

/// A core action triggered by one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pointer click on a region
    Click { region: RegionId, extend: bool },
    /// Toggle the neighbor of the last selected region
    Move { direction: Direction, extend: bool },
    /// Move the active speech by an offset, wrapping
    CycleSpeech(isize),
    NextSpeech,
    Merge,
    DeleteSelection,
    Escape,
}

impl Session {
    /// Run one command. This is the single entry point for input events.
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<Event>, SessionError> {
        debug!(?command, "dispatch");
        match command {
            Command::Click { region, extend } => self.click(region, extend),
            Command::Move { direction, extend } => self.move_focus(direction, extend),
            Command::CycleSpeech(offset) => self.cycle_speech(offset),
            Command::NextSpeech => self.next_speech(),
            Command::Merge => self.merge(),
            Command::DeleteSelection => self.delete_selected(),
            Command::Escape => Ok(self.escape()),
        }
    }
}
