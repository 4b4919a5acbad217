use crate::model::RegionId;
use crate::ops::{LinkChange, SelectionDelta};

/// A change to session state, delivered to subscribers after each mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Regions entered or left the selection
    SelectionChanged(SelectionDelta),
    /// The speech that authoring targets moved
    ActiveSpeechChanged { from: Option<usize>, to: usize },
    RegionAdded { region: RegionId, column: usize },
    /// Regions left the grid; any styling for them can be dropped
    RegionsRemoved { regions: Vec<RegionId> },
    TextChanged { region: RegionId },
    /// Cards or question of a region changed
    MetadataChanged { region: RegionId },
    /// An offensive region lost targets that left the grid
    TargetsChanged { offensive: RegionId },
    Linked(LinkChange),
    Unlinked(LinkChange),
    /// An offensive region could not be linked because every style is in use
    LinkPoolExhausted { offensive: RegionId },
    Merged {
        survivor: RegionId,
        removed: Vec<RegionId>,
        column: usize,
    },
    /// Input focus should return to the grid container
    FocusContainer,
}

/// Receives every [`Event`] a session emits, in order, before the mutating
/// call returns.
pub trait Subscriber {
    fn notify(&mut self, event: &Event);
}

impl<F> Subscriber for F
where
    F: FnMut(&Event),
{
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}
