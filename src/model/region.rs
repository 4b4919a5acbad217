use serde::{Deserialize, Serialize};

use super::config::LengthLimitType;
use crate::util::limit_text;

/// Stable identity of a region for the life of its grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Which offensive collection an offensive region belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffensiveKind {
    /// Evidence read against the targets
    Card,
    /// Analytic argument against the targets
    Reasoning,
}

impl std::fmt::Display for OffensiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffensiveKind::Card => write!(f, "card"),
            OffensiveKind::Reasoning => write!(f, "reasoning"),
        }
    }
}

/// Capability of a region, resolved once when the region is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RegionRole {
    /// An ordinary note fragment
    Plain,
    /// A region that asserts a relationship toward its targets
    Offensive {
        kind: OffensiveKind,
        targets: Vec<RegionId>,
    },
}

/// A single authored note fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub text: String,
    #[serde(flatten)]
    pub role: RegionRole,
    /// External references (evidence cards) attached to this region
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<String>,
    /// Cross-examination question attached to this region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl Region {
    /// Create a plain region
    pub fn new(id: RegionId, text: impl Into<String>) -> Self {
        Region {
            id,
            text: text.into(),
            role: RegionRole::Plain,
            cards: Vec::new(),
            question: None,
        }
    }

    /// Create an offensive region aimed at `targets`
    pub fn offensive(
        id: RegionId,
        text: impl Into<String>,
        kind: OffensiveKind,
        targets: Vec<RegionId>,
    ) -> Self {
        Region {
            role: RegionRole::Offensive { kind, targets },
            ..Region::new(id, text)
        }
    }

    pub fn is_offensive(&self) -> bool {
        matches!(self.role, RegionRole::Offensive { .. })
    }

    pub fn offensive_kind(&self) -> Option<OffensiveKind> {
        match &self.role {
            RegionRole::Offensive { kind, .. } => Some(*kind),
            RegionRole::Plain => None,
        }
    }

    /// Regions this one targets; empty for plain regions
    pub fn targets(&self) -> &[RegionId] {
        match &self.role {
            RegionRole::Offensive { targets, .. } => targets,
            RegionRole::Plain => &[],
        }
    }

    /// Drop `ids` from this region's targets. Returns true if anything was removed.
    pub fn forget_targets(&mut self, ids: &[RegionId]) -> bool {
        match &mut self.role {
            RegionRole::Offensive { targets, .. } => {
                let before = targets.len();
                targets.retain(|t| !ids.contains(t));
                targets.len() != before
            }
            RegionRole::Plain => false,
        }
    }

    /// Shortened text for compact display
    pub fn summary(&self, limit: usize, kind: LengthLimitType) -> String {
        limit_text(&self.text, limit, kind)
    }
}
