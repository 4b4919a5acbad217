//! The document object for one flowing session.
//!
//! A [`Session`] owns a single grid together with its selection, link state
//! and the two offensive collections. Every mutator runs to completion,
//! returns the [`Event`]s it produced and hands the same events to each
//! registered [`Subscriber`] before returning.

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{Event, Subscriber};

use tracing::{debug, info};

use crate::io::config_io::{self, ConfigError};
use crate::model::{FlowConfig, Grid, GridError, OffensiveKind, RegionId, Side};
use crate::ops::navigate::{Direction, NavigationError};
use crate::ops::region_ops;
use crate::ops::{LinkChange, LinkOutcome, Linker, MergeError, Selection, SelectionDelta, StylePool};
use crate::util::{RelativeIndexError, relative_index};

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    RelativeIndex(#[from] RelativeIndexError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no active speech")]
    NoActiveSpeech,
    #[error("nothing selected to refute")]
    EmptySelection,
    #[error("region is not offensive: {0}")]
    NotOffensive(RegionId),
}

pub struct Session {
    grid: Grid,
    selection: Selection,
    linker: Linker,
    offensive_cards: Vec<RegionId>,
    offensive_reasonings: Vec<RegionId>,
    config: FlowConfig,
    subscribers: Vec<Box<dyn Subscriber>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("grid", &self.grid)
            .field("selection", &self.selection)
            .field("linker", &self.linker)
            .field("offensive_cards", &self.offensive_cards)
            .field("offensive_reasonings", &self.offensive_reasonings)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Session {
    /// Start an empty grid for `side`
    pub fn new(side: Side, config: FlowConfig) -> Result<Self, SessionError> {
        Session::from_grid(Grid::new(side), config)
    }

    /// Wrap an existing grid, e.g. one loaded from a document.
    ///
    /// Offensive regions are registered and linked in column order, so with a
    /// small palette the earliest ones win the available styles.
    pub fn from_grid(grid: Grid, config: FlowConfig) -> Result<Self, SessionError> {
        let units = config_io::palette_units(&config.links)?;
        Ok(Session::with_pool(grid, config, StylePool::new(units)))
    }

    /// Like [`Session::from_grid`] with an explicit style pool
    pub fn with_pool(grid: Grid, config: FlowConfig, pool: StylePool) -> Self {
        let mut session = Session {
            grid,
            selection: Selection::new(),
            linker: Linker::new(pool),
            offensive_cards: Vec::new(),
            offensive_reasonings: Vec::new(),
            config,
            subscribers: Vec::new(),
        };
        session.selection.set_selected_column(Some(0));

        let offensives: Vec<(RegionId, OffensiveKind)> = session
            .grid
            .regions()
            .filter_map(|r| r.offensive_kind().map(|kind| (r.id, kind)))
            .collect();
        for (id, kind) in offensives {
            session.register_offensive(id, kind);
        }
        info!(
            side = %session.grid.side(),
            regions = session.grid.region_count(),
            links = session.linker.links().count(),
            "session opened"
        );
        session
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn linker(&self) -> &Linker {
        &self.linker
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Hand the grid back, e.g. for persistence
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Column that authoring actions append to
    pub fn active_speech(&self) -> Option<usize> {
        self.selection.selected_column()
    }

    /// Offensive regions of `kind`, in the order they were registered
    pub fn offensives(&self, kind: OffensiveKind) -> &[RegionId] {
        match kind {
            OffensiveKind::Card => &self.offensive_cards,
            OffensiveKind::Reasoning => &self.offensive_reasonings,
        }
    }

    /// Region text shortened by the configured length limit
    pub fn summary(&self, region: RegionId) -> Option<String> {
        let limits = &self.config.regions;
        self.grid
            .region(region)
            .map(|r| r.summary(limits.length_limit, limits.length_limit_type))
    }

    /// Register a subscriber; it sees every event emitted from now on.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn publish(&mut self, events: Vec<Event>) -> Vec<Event> {
        for subscriber in &mut self.subscribers {
            for event in &events {
                subscriber.notify(event);
            }
        }
        events
    }

    // -----------------------------------------------------------------------
    // Selection and focus

    /// Pointer click: toggle `region`, keeping the rest of the selection when `extend`.
    pub fn click(&mut self, region: RegionId, extend: bool) -> Result<Vec<Event>, SessionError> {
        if !self.grid.contains(region) {
            return Err(GridError::RegionNotFound(region).into());
        }
        let delta = self.selection.toggle_select(region, extend);
        Ok(self.publish(selection_events(delta)))
    }

    /// Toggle the neighbor of the last selected region in `direction`.
    /// At a boundary, or with nothing selected, nothing happens.
    pub fn move_focus(&mut self, direction: Direction, extend: bool) -> Result<Vec<Event>, SessionError> {
        let delta = self
            .selection
            .directional_extend(&self.grid, direction, extend)?;
        Ok(self.publish(selection_events(delta)))
    }

    /// Move the active speech by `offset`, wrapping around the grid
    pub fn cycle_speech(&mut self, offset: isize) -> Result<Vec<Event>, SessionError> {
        let from = self.active_speech().ok_or(SessionError::NoActiveSpeech)?;
        let to = relative_index(self.grid.speeches().len(), from, offset)?;
        if to == from {
            return Ok(Vec::new());
        }
        self.selection.set_selected_column(Some(to));
        debug!(from, to, "active speech changed");
        Ok(self.publish(vec![Event::ActiveSpeechChanged { from: Some(from), to }]))
    }

    pub fn next_speech(&mut self) -> Result<Vec<Event>, SessionError> {
        self.cycle_speech(1)
    }

    /// Return input focus to the grid container
    pub fn escape(&mut self) -> Vec<Event> {
        self.publish(vec![Event::FocusContainer])
    }

    // -----------------------------------------------------------------------
    // Authoring

    /// Append a plain region to the active speech. Blank text is ignored.
    pub fn author(&mut self, text: &str) -> Result<Vec<Event>, SessionError> {
        let column = self.active_speech().ok_or(SessionError::NoActiveSpeech)?;
        if text.trim().is_empty() {
            debug!(column, "ignoring blank region text");
            return Ok(Vec::new());
        }
        let region = region_ops::add_region(&mut self.grid, column, text)?;
        Ok(self.publish(vec![Event::RegionAdded { region, column }]))
    }

    /// Append an offensive region of `kind` to the active speech, aimed at
    /// the selected regions in column order, and link it.
    pub fn refute(&mut self, kind: OffensiveKind, text: &str) -> Result<Vec<Event>, SessionError> {
        let column = self.active_speech().ok_or(SessionError::NoActiveSpeech)?;
        let targets = self.selection.in_grid_order(&self.grid);
        if targets.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        let region = region_ops::add_offensive(&mut self.grid, column, kind, text, targets)?;
        let mut events = vec![Event::RegionAdded { region, column }];
        events.extend(self.register_offensive(region, kind));
        Ok(self.publish(events))
    }

    /// Remove `offensive` from its collection, demote it to a plain region
    /// and release its link.
    pub fn withdraw(&mut self, offensive: RegionId) -> Result<Vec<Event>, SessionError> {
        let kind = self
            .grid
            .region(offensive)
            .ok_or(GridError::RegionNotFound(offensive))?
            .offensive_kind()
            .ok_or(SessionError::NotOffensive(offensive))?;
        self.collection_mut(kind).retain(|id| *id != offensive);
        region_ops::demote(&mut self.grid, offensive)?;

        let events = match self.linker.unlink(offensive) {
            Some(change) => vec![Event::Unlinked(change)],
            None => Vec::new(),
        };
        debug!(region = %offensive, %kind, "withdrew offensive region");
        Ok(self.publish(events))
    }

    pub fn edit_text(&mut self, region: RegionId, text: &str) -> Result<Vec<Event>, SessionError> {
        region_ops::edit_text(&mut self.grid, region, text)?;
        Ok(self.publish(vec![Event::TextChanged { region }]))
    }

    pub fn attach_card(&mut self, region: RegionId, card: &str) -> Result<Vec<Event>, SessionError> {
        region_ops::attach_card(&mut self.grid, region, card)?;
        Ok(self.publish(vec![Event::MetadataChanged { region }]))
    }

    pub fn set_question(&mut self, region: RegionId, question: Option<String>) -> Result<Vec<Event>, SessionError> {
        region_ops::set_question(&mut self.grid, region, question)?;
        Ok(self.publish(vec![Event::MetadataChanged { region }]))
    }

    // -----------------------------------------------------------------------
    // Structural edits

    /// Merge the selection into its column-order first region.
    ///
    /// A selection spanning several columns is rejected and left as it was.
    pub fn merge(&mut self) -> Result<Vec<Event>, SessionError> {
        let outcome = crate::ops::merge(
            &mut self.grid,
            &mut self.selection,
            &self.config.regions.merge_separator,
        )?;

        let mut events = vec![
            Event::Merged {
                survivor: outcome.survivor,
                removed: outcome.removed.clone(),
                column: outcome.column,
            },
            Event::TextChanged {
                region: outcome.survivor,
            },
        ];
        events.extend(targets_changed(&outcome.retargeted));
        events.extend(self.forget_removed(&outcome.removed));
        events.extend(selection_events(outcome.selection));
        Ok(self.publish(events))
    }

    /// Delete every selected region
    pub fn delete_selected(&mut self) -> Result<Vec<Event>, SessionError> {
        let ids = self.selection.in_grid_order(&self.grid);
        if ids.is_empty() {
            debug!("nothing selected to delete");
            return Ok(Vec::new());
        }
        let deletion = region_ops::delete_regions(&mut self.grid, &ids)?;
        let removed = deletion.removed_ids();

        let mut events = vec![Event::RegionsRemoved {
            regions: removed.clone(),
        }];
        events.extend(targets_changed(&deletion.retargeted));
        events.extend(self.forget_removed(&removed));
        events.extend(selection_events(self.selection.purge(&removed)));
        Ok(self.publish(events))
    }

    // -----------------------------------------------------------------------
    // Offensive bookkeeping

    fn collection_mut(&mut self, kind: OffensiveKind) -> &mut Vec<RegionId> {
        match kind {
            OffensiveKind::Card => &mut self.offensive_cards,
            OffensiveKind::Reasoning => &mut self.offensive_reasonings,
        }
    }

    /// Add to the collection for `kind` and try to link
    fn register_offensive(&mut self, region: RegionId, kind: OffensiveKind) -> Vec<Event> {
        let collection = self.collection_mut(kind);
        if !collection.contains(&region) {
            collection.push(region);
        }
        match self.linker.link(&self.grid, region) {
            LinkOutcome::Linked(change) => vec![Event::Linked(change)],
            LinkOutcome::Exhausted => vec![Event::LinkPoolExhausted { offensive: region }],
            LinkOutcome::AlreadyLinked | LinkOutcome::NotOffensive => Vec::new(),
        }
    }

    /// Drop removed regions from the offensive collections and the linker
    fn forget_removed(&mut self, removed: &[RegionId]) -> Vec<Event> {
        self.offensive_cards.retain(|id| !removed.contains(id));
        self.offensive_reasonings.retain(|id| !removed.contains(id));
        self.linker
            .purge(removed)
            .into_iter()
            .map(Event::Unlinked)
            .collect()
    }
}

fn selection_events(delta: SelectionDelta) -> Vec<Event> {
    if delta.is_empty() {
        Vec::new()
    } else {
        vec![Event::SelectionChanged(delta)]
    }
}

fn targets_changed(offensives: &[RegionId]) -> impl Iterator<Item = Event> + '_ {
    offensives
        .iter()
        .map(|offensive| Event::TargetsChanged { offensive: *offensive })
}

/// Links released by `events`, for subscribers that only track styling
pub fn unlinked(events: &[Event]) -> impl Iterator<Item = &LinkChange> {
    events.iter().filter_map(|e| match e {
        Event::Unlinked(change) => Some(change),
        _ => None,
    })
}
