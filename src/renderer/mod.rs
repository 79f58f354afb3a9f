//! Renderer contract
//!
//! Each frame the host gets a flat list of sprites in level space plus the
//! camera offset. Asset loading and drawing belong to the `Renderer`
//! implementation; a renderer that cannot draw something should skip it.

use crate::sim::{GameState, Rect};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Ground,
    Platform,
    Coin,
    Hazard,
    Rabbit,
}

/// Pose hints for the rabbit sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RabbitPose {
    Idle,
    Running,
    Airborne,
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Level-space bounds
    pub rect: Rect,
    pub facing_right: bool,
    /// Hazard is resting after a hit
    pub on_cooldown: bool,
}

impl Sprite {
    fn plain(kind: SpriteKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            facing_right: true,
            on_cooldown: false,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameView {
    /// Subtract from level x to get screen x
    pub camera_x: f32,
    /// Back to front: platforms, coins, hazards, rabbit
    pub sprites: Vec<Sprite>,
    pub rabbit_pose: RabbitPose,
}

impl FrameView {
    pub fn from_state(state: &GameState) -> Self {
        let mut sprites = Vec::with_capacity(
            state.platforms.len() + state.coins.len() + state.hazards.len() + 1,
        );

        sprites.extend(state.platforms.iter().map(|p| {
            let kind = if p.is_ground {
                SpriteKind::Ground
            } else {
                SpriteKind::Platform
            };
            Sprite::plain(kind, p.rect)
        }));
        sprites.extend(
            state
                .coins
                .iter()
                .filter(|c| !c.collected)
                .map(|c| Sprite::plain(SpriteKind::Coin, c.rect())),
        );
        sprites.extend(state.hazards.iter().map(|h| Sprite {
            on_cooldown: h.on_cooldown,
            ..Sprite::plain(SpriteKind::Hazard, h.rect())
        }));

        let rabbit = &state.rabbit;
        sprites.push(Sprite {
            facing_right: rabbit.facing_right,
            ..Sprite::plain(SpriteKind::Rabbit, rabbit.rect())
        });

        let rabbit_pose = if rabbit.jumping || rabbit.vel.y > 1.0 {
            RabbitPose::Airborne
        } else if rabbit.vel.x.abs() > 0.1 {
            RabbitPose::Running
        } else {
            RabbitPose::Idle
        };

        Self {
            camera_x: state.camera_x,
            sprites,
            rabbit_pose,
        }
    }

    /// Sprites that overlap the viewport
    pub fn visible(&self, view_width: f32) -> impl Iterator<Item = &Sprite> {
        let left = self.camera_x;
        let right = self.camera_x + view_width;
        self.sprites
            .iter()
            .filter(move |s| s.rect.right() >= left && s.rect.left() <= right)
    }
}

/// Presentation collaborator
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView);
}
