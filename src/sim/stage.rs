//! Stage geometry
//!
//! A stage is a single row of fixed-width tiles. The tile codes are the only
//! source of truth for collision; sprite placement is derived from them by the
//! presentation layer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TILE_SIZE;

/// Contents of one stage tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Ground,
    Pit,
    /// Ground with a checkpoint flag
    Checkpoint,
    /// Ground with the goal flag
    Goal,
}

impl TileKind {
    /// Decode a stage file tile code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Empty),
            1 => Some(TileKind::Ground),
            2 => Some(TileKind::Pit),
            3 => Some(TileKind::Checkpoint),
            4 => Some(TileKind::Goal),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TileKind::Empty => 0,
            TileKind::Ground => 1,
            TileKind::Pit => 2,
            TileKind::Checkpoint => 3,
            TileKind::Goal => 4,
        }
    }

    /// Whether the player can stand on this tile
    pub fn is_solid(self) -> bool {
        !matches!(self, TileKind::Empty | TileKind::Pit)
    }
}

/// Errors raised while building a stage
#[derive(Debug, Error)]
pub enum StageError {
    #[error("stage has no tiles")]
    Empty,

    #[error("invalid tile code {code} at index {index}")]
    InvalidTileCode { index: usize, code: i64 },

    #[error("stage has more than one goal (tiles {first} and {second})")]
    MultipleGoals { first: usize, second: usize },

    #[error("failed to read stage file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse stage file: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk stage format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageFile {
    /// Wider than a tile code so out-of-range values surface as `InvalidTileCode`
    pub tiles: Vec<i64>,
}

impl StageFile {
    /// Narrow the stored values to tile codes
    pub fn codes(&self) -> Result<Vec<u8>, StageError> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, &code)| {
                u8::try_from(code).map_err(|_| StageError::InvalidTileCode { index, code })
            })
            .collect()
    }
}

/// The course used when no stage file is given: ten 8-tile sections.
#[rustfmt::skip]
const DEFAULT_STAGE: [u8; 80] = [
    // start
    1, 1, 1, 1, 1, 1, 1, 1,
    // first pit
    1, 1, 2, 1, 1, 1, 1, 1,
    // step
    1, 1, 1, 1, 1, 1, 1, 1,
    // checkpoint 1
    1, 1, 1, 3, 1, 1, 1, 1,
    // double pits
    1, 2, 2, 1, 1, 2, 1, 1,
    // long ground
    1, 1, 1, 1, 1, 1, 1, 1,
    // checkpoint 2
    1, 1, 3, 1, 1, 1, 1, 1,
    // hard pit zone
    1, 2, 1, 2, 1, 2, 2, 1,
    // final straight
    1, 1, 1, 1, 1, 1, 1, 1,
    // goal
    1, 1, 1, 4, 1, 1, 1, 1,
];

/// Immutable tile row plus derived geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StageFile", into = "StageFile")]
pub struct Stage {
    tiles: Vec<TileKind>,
    goal_index: Option<usize>,
}

impl Stage {
    /// Build a stage from tile codes, rejecting unknown codes and duplicate goals
    pub fn from_codes(codes: &[u8]) -> Result<Self, StageError> {
        if codes.is_empty() {
            return Err(StageError::Empty);
        }

        let mut tiles = Vec::with_capacity(codes.len());
        let mut goal_index = None;
        for (index, &code) in codes.iter().enumerate() {
            let kind = TileKind::from_code(code).ok_or(StageError::InvalidTileCode {
                index,
                code: code.into(),
            })?;
            if kind == TileKind::Goal {
                if let Some(first) = goal_index {
                    return Err(StageError::MultipleGoals {
                        first,
                        second: index,
                    });
                }
                goal_index = Some(index);
            }
            tiles.push(kind);
        }

        Ok(Self { tiles, goal_index })
    }

    /// Parse a `{"tiles": [...]}` stage document
    pub fn from_json(json: &str) -> Result<Self, StageError> {
        let file: StageFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    /// Load a stage file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StageError> {
        let json = std::fs::read_to_string(path)?;
        let stage = Self::from_json(&json)?;
        log::info!(
            "Loaded stage: {} tiles, {} checkpoints, goal {:?}",
            stage.tile_count(),
            stage.checkpoint_xs().count(),
            stage.goal_x()
        );
        Ok(stage)
    }

    /// Ground test at a horizontal position. Anything off either end is a pit.
    pub fn is_ground_at(&self, x: f32) -> bool {
        let index = (x / TILE_SIZE).floor();
        if index < 0.0 || index >= self.tiles.len() as f32 {
            return false;
        }
        self.tiles[index as usize].is_solid()
    }

    pub fn tile_at(&self, index: usize) -> Option<TileKind> {
        self.tiles.get(index).copied()
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Total width of the stage
    pub fn length(&self) -> f32 {
        self.tiles.len() as f32 * TILE_SIZE
    }

    /// Left edge of the goal tile, if the stage has one
    pub fn goal_x(&self) -> Option<f32> {
        self.goal_index.map(tile_x)
    }

    /// Left edges of every checkpoint tile, in stage order
    pub fn checkpoint_xs(&self) -> impl Iterator<Item = f32> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == TileKind::Checkpoint)
            .map(|(i, _)| tile_x(i))
    }
}

impl Default for Stage {
    fn default() -> Self {
        let tiles = DEFAULT_STAGE
            .iter()
            .filter_map(|&code| TileKind::from_code(code))
            .collect::<Vec<_>>();
        let goal_index = tiles.iter().position(|&t| t == TileKind::Goal);
        Self { tiles, goal_index }
    }
}

impl TryFrom<StageFile> for Stage {
    type Error = StageError;

    fn try_from(file: StageFile) -> Result<Self, Self::Error> {
        Self::from_codes(&file.codes()?)
    }
}

impl From<Stage> for StageFile {
    fn from(stage: Stage) -> Self {
        Self {
            tiles: stage.tiles.iter().map(|t| i64::from(t.code())).collect(),
        }
    }
}

/// Left edge of a tile
#[inline]
pub fn tile_x(index: usize) -> f32 {
    index as f32 * TILE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ground_classes() {
        let stage = Stage::from_codes(&[0, 1, 2, 3, 4]).unwrap();
        let expected = [false, true, false, true, true];
        for (i, &solid) in expected.iter().enumerate() {
            let left = tile_x(i);
            assert_eq!(stage.is_ground_at(left), solid, "tile {i} left edge");
            assert_eq!(stage.is_ground_at(left + 7.99), solid, "tile {i} right edge");
        }
    }

    #[test]
    fn test_off_stage_is_not_ground() {
        let stage = Stage::from_codes(&[1, 1, 1]).unwrap();
        assert!(!stage.is_ground_at(-0.01));
        assert!(!stage.is_ground_at(-8.0));
        assert!(stage.is_ground_at(23.99));
        assert!(!stage.is_ground_at(24.0));
    }

    #[test]
    fn test_derived_geometry() {
        let stage = Stage::from_codes(&[1, 3, 1, 3, 4, 1]).unwrap();
        assert_eq!(stage.length(), 48.0);
        assert_eq!(stage.goal_x(), Some(32.0));
        assert_eq!(stage.checkpoint_xs().collect::<Vec<_>>(), vec![8.0, 24.0]);
        assert_eq!(stage.tile_at(4), Some(TileKind::Goal));
        assert_eq!(stage.tile_at(6), None);
    }

    #[test]
    fn test_goal_is_optional() {
        let stage = Stage::from_codes(&[1, 1, 2, 1]).unwrap();
        assert_eq!(stage.goal_x(), None);
    }

    #[test]
    fn test_rejects_bad_stages() {
        assert!(matches!(Stage::from_codes(&[]), Err(StageError::Empty)));
        assert!(matches!(
            Stage::from_codes(&[1, 1, 5]),
            Err(StageError::InvalidTileCode { index: 2, code: 5 })
        ));
        assert!(matches!(
            Stage::from_codes(&[4, 1, 4]),
            Err(StageError::MultipleGoals { first: 0, second: 2 })
        ));
    }

    #[test]
    fn test_default_stage() {
        let stage = Stage::default();
        assert_eq!(stage.tile_count(), 80);
        assert_eq!(stage.length(), 640.0);
        assert_eq!(stage.checkpoint_xs().collect::<Vec<_>>(), vec![216.0, 400.0]);
        assert_eq!(stage.goal_x(), Some(600.0));
        assert_eq!(Stage::from_codes(&DEFAULT_STAGE).unwrap(), stage);
    }

    #[test]
    fn test_json_stage() {
        let stage = Stage::from_json(r#"{"tiles":[1,1,3,1,4]}"#).unwrap();
        assert_eq!(stage.goal_x(), Some(32.0));

        let err = Stage::from_json(r#"{"tiles":[1,9]}"#).unwrap_err();
        assert!(matches!(err, StageError::InvalidTileCode { index: 1, code: 9 }));

        assert!(matches!(Stage::from_json("not json"), Err(StageError::Json(_))));
    }

    #[test]
    fn test_json_codes_outside_u8() {
        let err = Stage::from_json(r#"{"tiles":[1,300]}"#).unwrap_err();
        assert!(matches!(err, StageError::InvalidTileCode { index: 1, code: 300 }));

        let err = Stage::from_json(r#"{"tiles":[-1,1]}"#).unwrap_err();
        assert!(matches!(err, StageError::InvalidTileCode { index: 0, code: -1 }));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_stage_file() {
        let path = std::env::temp_dir().join(format!("slime-run-stage-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"tiles":[1,1,2,1,3,1,4]}"#).unwrap();
        let stage = Stage::load(&path);
        std::fs::remove_file(&path).unwrap();

        let stage = stage.unwrap();
        assert_eq!(stage.tile_count(), 7);
        assert_eq!(stage.checkpoint_xs().collect::<Vec<_>>(), vec![32.0]);
        assert_eq!(stage.goal_x(), Some(48.0));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_file() {
        let err = Stage::load("/nonexistent/slime-run-stage.json").unwrap_err();
        assert!(matches!(err, StageError::Io(_)));
        assert!(err.to_string().starts_with("failed to read stage file"));
    }

    #[test]
    fn test_serde_uses_tile_codes() {
        let stage = Stage::from_codes(&[1, 2, 3]).unwrap();
        let json = serde_json::to_string(&stage).unwrap();
        assert_eq!(json, r#"{"tiles":[1,2,3]}"#);
        assert!(serde_json::from_str::<Stage>(r#"{"tiles":[4,4]}"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_outside_stage_never_ground(
            codes in proptest::collection::vec(1u8..=3, 1..40),
            past in 0.0f32..1000.0,
        ) {
            let stage = Stage::from_codes(&codes).unwrap();
            prop_assert!(!stage.is_ground_at(-0.001 - past));
            prop_assert!(!stage.is_ground_at(stage.length() + past));
        }
    }
}
