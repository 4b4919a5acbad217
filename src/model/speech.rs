use serde::{Deserialize, Serialize};

use super::region::{Region, RegionId};

/// One of the two opposing teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Affirmative,
    Negation,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Affirmative => Side::Negation,
            Side::Negation => Side::Affirmative,
        }
    }

    /// Short header used in speech labels
    pub fn header(self) -> &'static str {
        match self {
            Side::Affirmative => "Aff",
            Side::Negation => "Neg",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Affirmative => write!(f, "affirmative"),
            Side::Negation => write!(f, "negation"),
        }
    }
}

/// Whether a speech builds its side's case or answers the paired speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechRole {
    Defensive,
    Refutation,
}

/// A column of the grid: the regions flowed during one speech, top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speech {
    index: usize,
    side: Side,
    role: SpeechRole,
    label: String,
    regions: Vec<Region>,
}

impl Speech {
    pub fn new(index: usize, side: Side, role: SpeechRole, label: impl Into<String>) -> Self {
        Speech {
            index,
            side,
            role,
            label: label.into(),
            regions: Vec::new(),
        }
    }

    /// Fixed column index within the grid
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn role(&self) -> SpeechRole {
        self.role
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sub-round this speech belongs to (constructive, rebuttal, summary, final focus)
    pub fn subround(&self) -> usize {
        self.index / 2
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions in this speech
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Region> {
        self.regions.get(row)
    }

    /// Row of the region with this id
    pub fn position(&self, id: RegionId) -> Option<usize> {
        self.regions.iter().position(|r| r.id == id)
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.position(id).is_some()
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.id == id)
    }

    pub(crate) fn regions_mut(&mut self) -> &mut [Region] {
        &mut self.regions
    }

    /// Append a region at the bottom of the speech
    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Remove every region whose id is in `ids`, keeping the rest in order.
    /// Returns the removed regions in column order.
    pub fn remove_ids(&mut self, ids: &[RegionId]) -> Vec<Region> {
        let (removed, kept): (Vec<Region>, Vec<Region>) = std::mem::take(&mut self.regions)
            .into_iter()
            .partition(|r| ids.contains(&r.id));
        self.regions = kept;
        removed
    }
}
