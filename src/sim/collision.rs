//! Ground collision against the stage tile row
//!
//! The player samples two points under its feet. It can only stand when both
//! land on solid tiles, so hanging one foot over a ledge means falling.

use super::stage::Stage;
use super::state::Player;
use crate::consts::{FALL_TOLERANCE, GROUND_Y, STAND_Y};

/// Outcome of resolving the player against the ground line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundContact {
    /// Still above the ground line; nothing to resolve
    Airborne,
    /// Snapped onto the ground
    Landed,
    /// At or below the ground line with at least one foot over a gap
    Falling,
}

/// Whether both foot samples of `player` rest on solid tiles
pub fn feet_on_ground(stage: &Stage, player: &Player) -> bool {
    let (left, right) = player.feet();
    stage.is_ground_at(left) && stage.is_ground_at(right)
}

/// Snap the player onto the ground when it reaches the ground line with both
/// feet supported, otherwise mark it as falling.
pub fn resolve_ground(stage: &Stage, player: &mut Player) -> GroundContact {
    if player.pos.y < STAND_Y {
        return GroundContact::Airborne;
    }

    if feet_on_ground(stage, player) {
        player.pos.y = STAND_Y;
        player.vy = 0.0;
        player.grounded = true;
        GroundContact::Landed
    } else {
        player.grounded = false;
        GroundContact::Falling
    }
}

/// Whether the player has dropped far enough below the ground to be lost
#[inline]
pub fn fell_out(player: &Player) -> bool {
    player.pos.y > GROUND_Y + FALL_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn stage() -> Stage {
        Stage::from_codes(&[1, 1, 2, 1]).unwrap()
    }

    fn player_at(x: f32, y: f32, vy: f32) -> Player {
        Player {
            pos: Vec2::new(x, y),
            vy,
            grounded: false,
        }
    }

    #[test]
    fn test_landing_snaps_exactly() {
        let mut player = player_at(4.0, 97.3, 2.1);
        assert_eq!(resolve_ground(&stage(), &mut player), GroundContact::Landed);
        assert_eq!(player.pos.y, STAND_Y);
        assert_eq!(player.vy, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn test_above_ground_is_untouched() {
        let mut player = player_at(4.0, 90.0, -1.0);
        assert_eq!(resolve_ground(&stage(), &mut player), GroundContact::Airborne);
        assert_eq!(player.pos.y, 90.0);
        assert_eq!(player.vy, -1.0);
        assert!(!player.grounded);
    }

    #[test]
    fn test_one_foot_over_pit_falls() {
        // Left foot at 12 (ground), right foot at 16 (pit)
        let mut player = player_at(11.0, 96.3, 0.3);
        assert_eq!(resolve_ground(&stage(), &mut player), GroundContact::Falling);
        assert!(!player.grounded);
        assert_eq!(player.pos.y, 96.3);

        // Left foot at 20 (pit), right foot at 24 (ground)
        let mut player = player_at(19.0, 96.3, 0.3);
        assert_eq!(resolve_ground(&stage(), &mut player), GroundContact::Falling);
    }

    #[test]
    fn test_off_stage_end_falls() {
        // Right foot at 33 is past the last tile
        let mut player = player_at(28.0, 96.3, 0.3);
        assert_eq!(resolve_ground(&stage(), &mut player), GroundContact::Falling);
    }

    #[test]
    fn test_fell_out_threshold() {
        assert!(!fell_out(&player_at(0.0, 120.0, 0.0)));
        assert!(fell_out(&player_at(0.0, 120.01, 0.0)));
    }
}
