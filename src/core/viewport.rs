use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};

/// Viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge in pixels
    #[serde(default)]
    pub x: f32,
    /// Bottom edge in pixels
    #[serde(default)]
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Viewport anchored at the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Rejects viewports with no area
    pub fn validate(&self) -> Result<()> {
        if self.width > 0.0 && self.height > 0.0 {
            Ok(())
        } else {
            Err(ViewError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Converts window coordinates (origin top-left, y down) to normalized
    /// device coordinates (origin centre, y up)
    pub fn window_to_ndc(&self, win_x: f32, win_y: f32) -> Result<Vec2> {
        self.validate()?;
        Ok(Vec2::new(
            (win_x - self.x) / self.width * 2.0 - 1.0,
            ((self.height - win_y) - self.y) / self.height * 2.0 - 1.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_viewport_with_dimensions() {
        let vp = Viewport::new(1920.0, 1080.0);
        assert_eq!(vp.width, 1920.0);
        assert_eq!(vp.height, 1080.0);
        assert_eq!(vp.x, 0.0);
    }

    #[test]
    fn test_aspect() {
        let vp = Viewport::new(800.0, 600.0);
        assert!((vp.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_to_ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.window_to_ndc(0.0, 0.0).unwrap(), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.window_to_ndc(800.0, 600.0).unwrap(), Vec2::new(1.0, -1.0));
        assert_eq!(vp.window_to_ndc(400.0, 300.0).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_zero_area_rejected() {
        let vp = Viewport::new(0.0, 600.0);
        assert!(matches!(
            vp.window_to_ndc(1.0, 1.0),
            Err(ViewError::InvalidViewport { .. })
        ));
    }
}
