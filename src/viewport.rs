//! Pan/zoom transform between screen space and world space.
//!
//! Screen coordinates are pixels relative to the canvas origin. World coordinates are
//! where map elements live. The mapping is
//!
//! ```text
//! world  = (screen - offset) / scale
//! screen = world * scale + offset
//! ```
use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Bounds and step size for zooming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
    /// Factor applied per zoom step
    pub step: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 3.0,
            step: 1.1,
        }
    }
}

impl ZoomLimits {
    /// Requires `0 < min <= max` and `step > 1`, all finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min > 0.0
            && self.min <= self.max
            && self.step > 1.0
    }

    pub fn clamp(&self, scale: f32) -> f32 {
        // Inverted bounds resolve to `max`
        scale.max(self.min).min(self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Maps a vertical scroll delta to a zoom direction.
    ///
    /// egui reports positive `y` when the wheel turns away from the user, which zooms in.
    pub fn from_scroll(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::In)
        } else if delta_y < 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    offset: Vec2,
    scale: f32,
    limits: ZoomLimits,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl Viewport {
    /// Invalid limits are replaced by the defaults.
    pub fn new(limits: ZoomLimits) -> Self {
        let limits = if limits.is_valid() {
            limits
        } else {
            log::warn!("Ignoring invalid zoom limits {:?}", limits);
            ZoomLimits::default()
        };
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            limits,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Zoom level as a whole percentage, e.g. `110` for a scale of 1.1
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.offset) / self.scale).to_pos2()
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.scale + self.offset).to_pos2()
    }

    /// Converts a world-space length to screen pixels
    pub fn world_len_to_screen(&self, len: f32) -> f32 {
        len * self.scale
    }

    pub fn screen_len_to_world(&self, len: f32) -> f32 {
        len / self.scale
    }

    /// The world-space rectangle visible through a canvas of `screen_size` pixels.
    pub fn visible_world_rect(&self, screen_size: Vec2) -> Rect {
        Rect::from_two_pos(
            self.screen_to_world(Pos2::ZERO),
            self.screen_to_world(screen_size.to_pos2()),
        )
    }

    /// Zooms one step around `anchor` (screen space), keeping the world point under the
    /// anchor fixed. Returns `false` when the scale was already at its limit.
    pub fn zoom_at(&mut self, anchor: Pos2, direction: ZoomDirection) -> bool {
        let target = match direction {
            ZoomDirection::In => self.scale * self.limits.step,
            ZoomDirection::Out => self.scale / self.limits.step,
        };
        self.zoom_to(anchor, target)
    }

    /// Sets the scale (clamped) around `anchor`. Returns `false` if nothing changed.
    pub fn zoom_to(&mut self, anchor: Pos2, scale: f32) -> bool {
        if !scale.is_finite() {
            return false;
        }
        let new_scale = self.limits.clamp(scale);
        if new_scale == self.scale {
            return false;
        }
        let anchor = anchor.to_vec2();
        self.offset = anchor - (anchor - self.offset) * (new_scale / self.scale);
        self.scale = new_scale;
        true
    }

    /// Translates the world origin by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn close(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn identity_by_default() {
        let viewport = Viewport::default();
        let p = pos2(12.5, -40.0);
        assert_eq!(viewport.screen_to_world(p), p);
        assert_eq!(viewport.world_to_screen(p), p);
        assert_eq!(viewport.zoom_percent(), 100);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut viewport = Viewport::default();
        viewport.pan(vec2(37.0, -12.0));
        let anchor = pos2(320.0, 200.0);
        let before = viewport.screen_to_world(anchor);

        assert!(viewport.zoom_at(anchor, ZoomDirection::In));
        assert!(close(viewport.screen_to_world(anchor), before));

        assert!(viewport.zoom_at(anchor, ZoomDirection::Out));
        assert!(viewport.zoom_at(anchor, ZoomDirection::Out));
        assert!(close(viewport.screen_to_world(anchor), before));
    }

    #[test]
    fn zoom_stops_at_limits() {
        let mut viewport = Viewport::default();
        for _ in 0..100 {
            viewport.zoom_at(Pos2::ZERO, ZoomDirection::In);
        }
        assert_eq!(viewport.scale(), 3.0);
        assert!(!viewport.zoom_at(Pos2::ZERO, ZoomDirection::In));

        for _ in 0..100 {
            viewport.zoom_at(Pos2::ZERO, ZoomDirection::Out);
        }
        assert_eq!(viewport.scale(), 0.1);
    }

    #[test]
    fn invalid_limits_fall_back_to_defaults() {
        let inverted = ZoomLimits {
            min: 2.0,
            max: 1.0,
            step: 1.1,
        };
        assert_eq!(inverted.clamp(1.5), 1.0);

        let mut viewport = Viewport::new(ZoomLimits {
            min: 0.0,
            ..ZoomLimits::default()
        });
        assert_eq!(viewport.limits(), ZoomLimits::default());
        for _ in 0..1000 {
            viewport.zoom_at(Pos2::ZERO, ZoomDirection::Out);
        }
        assert_eq!(viewport.scale(), 0.1);

        let viewport = Viewport::new(inverted);
        assert_eq!(viewport.limits(), ZoomLimits::default());
    }

    #[test]
    fn pan_moves_in_screen_units_regardless_of_scale() {
        let mut viewport = Viewport::default();
        viewport.zoom_to(Pos2::ZERO, 2.0);
        let world = pos2(10.0, 10.0);
        let before = viewport.world_to_screen(world);
        viewport.pan(vec2(5.0, 7.0));
        assert!(close(viewport.world_to_screen(world), before + vec2(5.0, 7.0)));
    }

    #[test]
    fn scroll_direction_mapping() {
        assert_eq!(ZoomDirection::from_scroll(3.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_scroll(-1.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_scroll(0.0), None);
    }

    #[test]
    fn reset_restores_identity() {
        let mut viewport = Viewport::default();
        viewport.pan(vec2(100.0, 50.0));
        viewport.zoom_at(pos2(10.0, 10.0), ZoomDirection::In);
        viewport.reset();
        assert_eq!(viewport.offset(), Vec2::ZERO);
        assert_eq!(viewport.scale(), 1.0);
    }
}
