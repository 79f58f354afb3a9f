//! Rabbit motion: input intent, gravity integration and landing
//!
//! Gravity is a fixed per-tick velocity increment; positions integrate with
//! the tick's `dt`. There is no terminal velocity.

use super::aabb::Rect;
use super::state::{Platform, Rabbit};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Set horizontal velocity from the intent and attempt a jump.
/// Returns true if a jump started.
pub fn apply_input(rabbit: &mut Rabbit, input: &TickInput) -> bool {
    match (input.left, input.right) {
        (true, false) => {
            rabbit.vel.x = -rabbit.speed;
            rabbit.facing_right = false;
        }
        (false, true) => {
            rabbit.vel.x = rabbit.speed;
            rabbit.facing_right = true;
        }
        // Neither or both: stand still
        _ => rabbit.vel.x = 0.0,
    }

    input.jump && jump(rabbit)
}

/// Launch upward if grounded
pub fn jump(rabbit: &mut Rabbit) -> bool {
    if !rabbit.on_ground {
        return false;
    }
    rabbit.vel.y = -rabbit.jump_height;
    rabbit.on_ground = false;
    rabbit.jumping = true;
    true
}

/// Advance the rabbit by one tick.
///
/// Grounding is dropped first and only landing resolution can restore it,
/// so walking off an edge makes the rabbit airborne on this very tick.
pub fn integrate(rabbit: &mut Rabbit, gravity: f32, dt: f32) {
    rabbit.on_ground = false;
    rabbit.vel.y += gravity;
    rabbit.pos += rabbit.vel * dt;
}

/// Falling, feet within the tolerance band under the platform top and the
/// rabbit's central span over the platform
pub fn should_land_on(rabbit: &Rabbit, platform: &Platform, tuning: &Tuning) -> bool {
    let falling = rabbit.vel.y > 0.0;
    let feet = rabbit.rect().bottom();
    let top = platform.top();
    let at_level = feet >= top && feet <= top + tuning.landing_tolerance;
    over_platform(&rabbit.rect(), &platform.rect, tuning.landing_inset) && falling && at_level
}

fn over_platform(body: &Rect, platform: &Rect, inset: f32) -> bool {
    body.left() + body.width * inset < platform.right()
        && body.left() + body.width * (1.0 - inset) > platform.left()
}

/// Rest the rabbit exactly on a platform top
pub fn land(rabbit: &mut Rabbit, platform_top: f32) {
    rabbit.pos.y = platform_top - rabbit.size.y;
    rabbit.vel.y = 0.0;
    rabbit.jumping = false;
    rabbit.on_ground = true;
}

/// Land on the first qualifying platform in list order.
/// Returns its index.
pub fn resolve_landing(rabbit: &mut Rabbit, platforms: &[Platform], tuning: &Tuning) -> Option<usize> {
    let index = platforms
        .iter()
        .position(|platform| should_land_on(rabbit, platform, tuning))?;
    land(rabbit, platforms[index].top());
    Some(index)
}

/// Height gained by a jump before gravity turns it around
pub fn jump_apex(jump_height: f32, gravity: f32, dt: f32) -> f32 {
    if jump_height <= 0.0 || gravity <= 0.0 {
        return 0.0;
    }
    // Ticks in which the rabbit still moves up
    let n = (jump_height / gravity).floor();
    dt * (n * jump_height - gravity * n * (n + 1.0) / 2.0)
}
