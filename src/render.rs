//! Render collaborator
//!
//! The simulation never touches the GPU. It pushes [`SpriteDraw`] commands
//! into [`RenderData`], and the host drains them once per frame.

use glam::{IVec2, Vec2, Vec4};

use crate::assets::SpriteId;

/// Orthographic camera in world units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera2D {
    pub dimensions: Vec2,
    pub position: Vec2,
}

/// Draw ordering buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Game,
    Ui,
}

const LAYER_STRIDE: f32 = 100.0;

/// Absolute depth of `depth` inside `layer`
pub fn get_layer(layer: Layer, depth: f32) -> f32 {
    let base = match layer {
        Layer::Game => 0.0,
        Layer::Ui => 1.0,
    };
    base * LAYER_STRIDE + depth
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawData {
    pub layer: f32,
    pub animation_idx: u32,
    pub flip_x: bool,
    pub color: Vec4,
}

impl Default for DrawData {
    fn default() -> Self {
        Self {
            layer: 0.0,
            animation_idx: 0,
            flip_x: false,
            color: Vec4::ONE,
        }
    }
}

impl DrawData {
    pub fn on_layer(layer: Layer, depth: f32) -> Self {
        Self {
            layer: get_layer(layer, depth),
            ..Default::default()
        }
    }
}

/// A queued sprite draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sprite: SpriteId,
    pub pos: IVec2,
    pub data: DrawData,
}

/// Everything the host needs to present a frame
#[derive(Debug, Clone, Default)]
pub struct RenderData {
    pub game_camera: Camera2D,
    pub ui_camera: Camera2D,
    pub sprites: Vec<SpriteDraw>,
}

impl RenderData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_sprite(&mut self, sprite: SpriteId, pos: IVec2, data: DrawData) {
        self.sprites.push(SpriteDraw { sprite, pos, data });
    }

    /// Drop last frame's commands (host calls this after presenting)
    pub fn clear(&mut self) {
        self.sprites.clear();
    }
}

/// Frame index for a looping animation of `frame_count` frames over `duration` seconds
///
/// Wraps `time` back into `[0, duration)` so it never grows without bound.
pub fn animate(time: &mut f32, frame_count: u32, duration: f32) -> u32 {
    if frame_count <= 1 || duration <= 0.0 {
        return 0;
    }
    *time = time.rem_euclid(duration);
    let idx = (*time / duration * frame_count as f32) as u32;
    idx.min(frame_count - 1)
}

/// Linear interpolation between two tick snapshots, truncating to whole pixels
pub fn lerp_ivec2(from: IVec2, to: IVec2, t: f32) -> IVec2 {
    from.as_vec2().lerp(to.as_vec2(), t).as_ivec2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animate_wraps() {
        let mut time = 0.0;
        assert_eq!(animate(&mut time, 12, 0.6), 0);

        let mut time = 0.325;
        assert_eq!(animate(&mut time, 12, 0.6), 6);

        let mut time = 0.62;
        let idx = animate(&mut time, 12, 0.6);
        assert!(time < 0.6);
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_single_frame_sprite() {
        let mut time = 5.0;
        assert_eq!(animate(&mut time, 1, 0.6), 0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = IVec2::new(0, 10);
        let b = IVec2::new(10, 20);
        assert_eq!(lerp_ivec2(a, b, 0.0), a);
        assert_eq!(lerp_ivec2(a, b, 1.0), b);
        assert_eq!(lerp_ivec2(a, b, 0.5), IVec2::new(5, 15));
    }

    #[test]
    fn test_ui_layer_above_game() {
        assert!(get_layer(Layer::Ui, 0.0) > get_layer(Layer::Game, 10.0));
    }
}
