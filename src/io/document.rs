//! Serialized form of a round: both grids with their speeches and regions.
//!
//! Only text conversion lives here; reading and writing files is left to the
//! caller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::grid::SPEECH_COUNT;
use crate::model::{Grid, GridError, Region, RegionId, Side, Speech};

/// Error type for document conversion
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected 8 speeches, found {0}")]
    SpeechCount(usize),
    #[error("speech at position {position} does not match the grid layout")]
    SpeechOrder { position: usize },
    #[error("duplicate region id: {0}")]
    DuplicateRegion(RegionId),
    #[error("region {region} targets missing region {target}")]
    DanglingTarget { region: RegionId, target: RegionId },
    #[error("region id {0} leaves no room for new regions")]
    IdOverflow(RegionId),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// One column and its regions, top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechDocument {
    pub index: usize,
    pub side: Side,
    pub label: String,
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// The eight speeches flowed for one side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDocument {
    pub side: Side,
    pub speeches: Vec<SpeechDocument>,
}

/// A whole round: the flows kept for both sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDocument {
    pub name: String,
    /// The side the flowing team is on
    pub side: Side,
    pub affirmative: GridDocument,
    pub negation: GridDocument,
}

impl RoundDocument {
    pub fn new(name: impl Into<String>, side: Side, affirmative: &Grid, negation: &Grid) -> Self {
        RoundDocument {
            name: name.into(),
            side,
            affirmative: affirmative.to_document(),
            negation: negation.to_document(),
        }
    }

    /// Rebuild both grids, validating each
    pub fn grids(&self) -> Result<(Grid, Grid), DocumentError> {
        Ok((
            Grid::from_document(&self.affirmative)?,
            Grid::from_document(&self.negation)?,
        ))
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Grid {
    pub fn to_document(&self) -> GridDocument {
        GridDocument {
            side: self.side(),
            speeches: self
                .speeches()
                .iter()
                .map(|speech| SpeechDocument {
                    index: speech.index(),
                    side: speech.side(),
                    label: speech.label().to_string(),
                    regions: speech.regions().to_vec(),
                })
                .collect(),
        }
    }

    /// Build a grid from its document.
    ///
    /// Speeches must follow the fixed layout for the document's side. Region
    /// ids must be unique and every target must name a region in the grid.
    pub fn from_document(doc: &GridDocument) -> Result<Grid, DocumentError> {
        if doc.speeches.len() != SPEECH_COUNT {
            return Err(DocumentError::SpeechCount(doc.speeches.len()));
        }

        let layout = Grid::new(doc.side);
        let mut seen = HashSet::new();
        let mut speeches: Vec<Speech> = Vec::with_capacity(SPEECH_COUNT);
        for (position, (speech_doc, template)) in doc.speeches.iter().zip(layout.speeches()).enumerate() {
            if speech_doc.index != position || speech_doc.side != template.side() {
                return Err(DocumentError::SpeechOrder { position });
            }
            let mut speech = template.clone();
            for region in &speech_doc.regions {
                if !seen.insert(region.id) {
                    return Err(DocumentError::DuplicateRegion(region.id));
                }
                speech.push(region.clone());
            }
            speeches.push(speech);
        }

        for region in speeches.iter().flat_map(|s| s.regions()) {
            if let Some(target) = region.targets().iter().find(|t| !seen.contains(*t)) {
                return Err(DocumentError::DanglingTarget {
                    region: region.id,
                    target: *target,
                });
            }
        }

        Grid::from_parts(doc.side, speeches).map_err(|err| match err {
            GridError::IdOverflow(id) => DocumentError::IdOverflow(id),
            other => DocumentError::Grid(other),
        })
    }
}

impl GridDocument {
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OffensiveKind;
    use crate::ops::region_ops;
    use insta::assert_snapshot;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(Side::Affirmative);
        let claim = region_ops::add_region(&mut grid, 0, "Tariffs raise prices").unwrap();
        let turn =
            region_ops::add_offensive(&mut grid, 1, OffensiveKind::Card, "Link turn", vec![claim]).unwrap();
        region_ops::attach_card(&mut grid, turn, "Smith 21").unwrap();
        grid
    }

    #[test]
    fn test_speech_snapshot() {
        let doc = sample_grid().to_document();
        let json = serde_json::to_string_pretty(&doc.speeches[1]).unwrap();
        assert_snapshot!(json, @r#"
        {
          "index": 1,
          "side": "negation",
          "label": "AT-Aff 1",
          "regions": [
            {
              "id": 2,
              "text": "Link turn",
              "role": "offensive",
              "kind": "card",
              "targets": [
                1
              ],
              "cards": [
                "Smith 21"
              ]
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_grid_from_document_restores_regions() {
        let grid = sample_grid();
        let doc = GridDocument::from_json(&grid.to_document().to_json().unwrap()).unwrap();
        let restored = Grid::from_document(&doc).unwrap();
        assert_eq!(restored, grid);

        let mut restored = restored;
        let next = restored.append_region(0, "new").unwrap();
        assert_eq!(next, RegionId(3));
    }

    #[test]
    fn test_round_document() {
        let aff = sample_grid();
        let neg = Grid::new(Side::Negation);
        let round = RoundDocument::new("Round 3", Side::Negation, &aff, &neg);
        let parsed = RoundDocument::from_json(&round.to_json().unwrap()).unwrap();
        assert_eq!(parsed.name, "Round 3");
        let (a, n) = parsed.grids().unwrap();
        assert_eq!(a.region_count(), 2);
        assert_eq!(n.speech(0).unwrap().label(), "Neg 1");
    }

    #[test]
    fn test_rejects_wrong_speech_count() {
        let mut doc = sample_grid().to_document();
        doc.speeches.pop();
        assert!(matches!(Grid::from_document(&doc), Err(DocumentError::SpeechCount(7))));
    }

    #[test]
    fn test_rejects_speeches_out_of_order() {
        let mut doc = sample_grid().to_document();
        doc.speeches.swap(2, 3);
        assert!(matches!(
            Grid::from_document(&doc),
            Err(DocumentError::SpeechOrder { position: 2 })
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut doc = sample_grid().to_document();
        let copy = doc.speeches[0].regions[0].clone();
        doc.speeches[4].regions.push(copy);
        assert!(matches!(
            Grid::from_document(&doc),
            Err(DocumentError::DuplicateRegion(RegionId(1)))
        ));
    }

    #[test]
    fn test_rejects_dangling_target() {
        let mut doc = sample_grid().to_document();
        doc.speeches[0].regions.clear();
        assert!(matches!(
            Grid::from_document(&doc),
            Err(DocumentError::DanglingTarget {
                region: RegionId(2),
                target: RegionId(1)
            })
        ));
    }

    #[test]
    fn test_rejects_largest_id() {
        let mut doc = Grid::new(Side::Negation).to_document();
        doc.speeches[5]
            .regions
            .push(Region::new(RegionId(u64::MAX), "last word"));
        assert!(matches!(
            Grid::from_document(&doc),
            Err(DocumentError::IdOverflow(RegionId(u64::MAX)))
        ));

        doc.speeches[5].regions[0].id = RegionId(u64::MAX - 1);
        let mut grid = Grid::from_document(&doc).unwrap();
        assert!(grid.append_region(0, "one more").is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(GridDocument::from_json("{"), Err(DocumentError::Json(_))));
    }
}
