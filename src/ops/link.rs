//! Visual links between offensive regions and the regions they target.
//!
//! A link takes one unit from a finite pool of styles and applies it to the
//! offensive region and each of its targets. When the pool is empty a new link
//! is dropped (logged, not an error). Releasing a link returns its unit and
//! restores every participant to the appearance it would have without it.

use indexmap::IndexMap;
use ratatui::style::{Color, Modifier, Style};
use tracing::{debug, warn};

use crate::model::{Grid, RegionId};

/// A text color and background pair used to mark one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleUnit {
    pub text: Color,
    pub background: Color,
}

impl StyleUnit {
    pub fn new(text: Color, background: Color) -> Self {
        StyleUnit { text, background }
    }

    /// Terminal style for linked regions; bold keeps the text color prominent
    pub fn style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }
}

/// Fixed set of style units, each either free or held by one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePool {
    units: Vec<StyleUnit>,
    in_use: Vec<bool>,
}

impl StylePool {
    pub fn new(units: Vec<StyleUnit>) -> Self {
        let in_use = vec![false; units.len()];
        StylePool { units, in_use }
    }

    /// Number of concurrently distinguishable links
    pub fn capacity(&self) -> usize {
        self.units.len()
    }

    /// Units not held by any link
    pub fn available(&self) -> usize {
        self.in_use.iter().filter(|used| !**used).count()
    }

    pub fn has_next(&self) -> bool {
        self.available() > 0
    }

    pub fn unit(&self, index: usize) -> Option<StyleUnit> {
        self.units.get(index).copied()
    }

    /// Take the lowest-numbered free unit
    pub fn acquire(&mut self) -> Option<usize> {
        let index = self.in_use.iter().position(|used| !*used)?;
        self.in_use[index] = true;
        Some(index)
    }

    /// Return a unit to the pool
    pub fn release(&mut self, index: usize) {
        if let Some(used) = self.in_use.get_mut(index) {
            *used = false;
        }
    }
}

/// One live link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub offensive: RegionId,
    /// Pool index of the unit this link holds
    pub unit: usize,
    /// Targets followed by the offensive region itself
    pub participants: Vec<RegionId>,
}

impl Link {
    pub fn targets(&self) -> &[RegionId] {
        let n = self.participants.len().saturating_sub(1);
        &self.participants[..n]
    }
}

/// New appearance of a region: the unit it now shows, or none for plain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restyle {
    pub region: RegionId,
    pub unit: Option<usize>,
}

/// A link that was created or released, with the regions whose appearance changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkChange {
    pub offensive: RegionId,
    pub unit: usize,
    pub restyled: Vec<Restyle>,
}

/// Result of asking for a new link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked(LinkChange),
    /// The region already holds a link
    AlreadyLinked,
    /// No free unit; nothing was styled
    Exhausted,
    /// The region is missing or has no offensive capability
    NotOffensive,
}

/// Allocates pool units to offensive regions and tracks every region's link appearance
#[derive(Debug, Clone)]
pub struct Linker {
    pool: StylePool,
    /// Live links, oldest first
    links: IndexMap<RegionId, Link>,
}

impl Linker {
    pub fn new(pool: StylePool) -> Self {
        Linker {
            pool,
            links: IndexMap::new(),
        }
    }

    pub fn pool(&self) -> &StylePool {
        &self.pool
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    pub fn link_for(&self, offensive: RegionId) -> Option<&Link> {
        self.links.get(&offensive)
    }

    pub fn is_linked(&self, offensive: RegionId) -> bool {
        self.links.contains_key(&offensive)
    }

    /// Pool unit currently shown by `region`: that of the newest live link it takes part in
    pub fn appearance(&self, region: RegionId) -> Option<usize> {
        self.links
            .values()
            .rev()
            .find(|link| link.participants.contains(&region))
            .map(|link| link.unit)
    }

    pub fn style_of(&self, region: RegionId) -> Option<StyleUnit> {
        self.appearance(region).and_then(|unit| self.pool.unit(unit))
    }

    /// Link `offensive` to its targets with a fresh unit.
    ///
    /// Targets that are no longer in the grid are ignored.
    pub fn link(&mut self, grid: &Grid, offensive: RegionId) -> LinkOutcome {
        let Some(region) = grid.region(offensive).filter(|r| r.is_offensive()) else {
            return LinkOutcome::NotOffensive;
        };
        if self.links.contains_key(&offensive) {
            return LinkOutcome::AlreadyLinked;
        }
        let Some(unit) = self.pool.acquire() else {
            warn!(
                offensive = %offensive,
                capacity = self.pool.capacity(),
                "ran out of link styles; region left unlinked"
            );
            return LinkOutcome::Exhausted;
        };

        let mut participants: Vec<RegionId> = Vec::new();
        for target in region.targets() {
            if *target != offensive && grid.contains(*target) && !participants.contains(target) {
                participants.push(*target);
            }
        }
        participants.push(offensive);

        let restyled = participants
            .iter()
            .map(|id| Restyle {
                region: *id,
                unit: Some(unit),
            })
            .collect();

        debug!(offensive = %offensive, unit, targets = participants.len() - 1, "linked");
        self.links.insert(
            offensive,
            Link {
                offensive,
                unit,
                participants,
            },
        );
        LinkOutcome::Linked(LinkChange {
            offensive,
            unit,
            restyled,
        })
    }

    /// Release the link held by `offensive`, restoring its participants.
    /// Returns `None` if the region holds no link.
    pub fn unlink(&mut self, offensive: RegionId) -> Option<LinkChange> {
        let participants = self.links.get(&offensive)?.participants.clone();
        let before: Vec<Option<usize>> = participants.iter().map(|id| self.appearance(*id)).collect();

        let link = self.links.shift_remove(&offensive)?;
        self.pool.release(link.unit);

        let restyled = participants
            .iter()
            .zip(before)
            .filter_map(|(id, was)| {
                let now = self.appearance(*id);
                (now != was).then_some(Restyle {
                    region: *id,
                    unit: now,
                })
            })
            .collect();

        debug!(offensive = %offensive, unit = link.unit, "unlinked");
        Some(LinkChange {
            offensive,
            unit: link.unit,
            restyled,
        })
    }

    /// Drop every reference to regions removed from the grid.
    ///
    /// Links held by removed offensive regions are released; removed targets
    /// leave the links they took part in.
    pub fn purge(&mut self, removed: &[RegionId]) -> Vec<LinkChange> {
        let released: Vec<RegionId> = self
            .links
            .keys()
            .filter(|id| removed.contains(id))
            .copied()
            .collect();

        for link in self.links.values_mut() {
            link.participants.retain(|id| !removed.contains(id));
        }

        released
            .into_iter()
            .filter_map(|id| self.unlink(id))
            .map(|mut change| {
                change.restyled.retain(|r| !removed.contains(&r.region));
                change
            })
            .collect()
    }
}
