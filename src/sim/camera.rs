//! Horizontal follow camera

use crate::consts::SCREEN_WIDTH;

/// Viewport origin that keeps the player a third of the way into the screen,
/// clamped to the stage. Stages narrower than the screen pin the camera to 0.
pub fn follow(player_x: f32, stage_length: f32) -> f32 {
    let target = player_x - SCREEN_WIDTH / 3.0;
    target.min(stage_length - SCREEN_WIDTH).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tracks_inside_range() {
        assert!((follow(100.0, 640.0) - (100.0 - 160.0 / 3.0)).abs() < 1e-4);
    }

    #[test]
    fn test_clamps_at_edges() {
        assert_eq!(follow(4.0, 640.0), 0.0);
        assert_eq!(follow(630.0, 640.0), 480.0);
        assert_eq!(follow(5000.0, 640.0), 480.0);
    }

    #[test]
    fn test_short_stage_pins_to_zero() {
        assert_eq!(follow(30.0, 32.0), 0.0);
        assert_eq!(follow(500.0, 32.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_camera_within_stage(x in -100.0f32..2000.0, tiles in 20usize..200) {
            let length = tiles as f32 * 8.0;
            let cam = follow(x, length);
            prop_assert!(cam >= 0.0);
            prop_assert!(cam <= length - SCREEN_WIDTH);
        }
    }
}
