//! Procedural level layout
//!
//! Platforms are placed band by band from the ground up. A candidate is only
//! accepted if some already placed surface lies within one jump below it, so
//! every platform has a chain of hops back to the ground. Slots that cannot
//! be filled within the attempt budget are dropped.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Rect;
use super::physics::jump_apex;
use super::state::{Coin, Hazard, Platform};
use crate::consts::*;
use crate::tuning::Tuning;

/// Output of the generator for one level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Ground first, then platforms in placement order
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub hazards: Vec<Hazard>,
    /// Platform slots asked for (the ground is not counted)
    pub requested_platforms: u32,
}

/// Vertical band of the level that a platform slot samples from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Smallest platform-top y allowed (higher on screen)
    pub y_min: f32,
    /// Largest platform-top y allowed
    pub y_max: f32,
}

/// Generate platforms, coins and hazards for `level`
pub fn generate_level<R: Rng>(level: u32, jump_height: f32, tuning: &Tuning, rng: &mut R) -> LevelLayout {
    let reach = jump_apex(jump_height, tuning.gravity, SIM_DT);
    let requested = tuning.platforms_for_level(level);

    let platforms = place_platforms(requested, reach, tuning, rng);
    let coins = scatter_coins(&platforms, tuning, rng);
    let hazards = scatter_hazards(&platforms, &coins, tuning, rng);

    log::info!(
        "Level {}: reach={:.1}, platforms={}/{}, coins={}, hazards={}",
        level,
        reach,
        platforms.len() - 1,
        requested,
        coins.len(),
        hazards.len()
    );

    LevelLayout {
        platforms,
        coins,
        hazards,
        requested_platforms: requested,
    }
}

/// Split the space between the top margin and the ground clearance into
/// equal bands, bottom band first
pub fn vertical_bands(tuning: &Tuning) -> Vec<Band> {
    let sections = tuning.vertical_sections.max(1);
    let top = tuning.top_margin;
    let bottom = GROUND_TOP - tuning.ground_clearance;
    let band_height = (bottom - top).max(0.0) / sections as f32;

    (0..sections)
        .map(|i| {
            let y_max = bottom - i as f32 * band_height;
            Band {
                y_min: y_max - band_height,
                y_max,
            }
        })
        .collect()
}

/// Slots per band: an even share each, the remainder on the topmost band
pub fn allocate_slots(total: u32, bands: usize) -> Vec<u32> {
    if bands == 0 {
        return Vec::new();
    }
    let share = total / bands as u32;
    let remainder = total % bands as u32;
    let mut slots = vec![share; bands];
    slots[bands - 1] += remainder;
    slots
}

/// A platform at `candidate` can be reached from the ground directly, or by
/// hopping up from a placed platform that is lower, within `reach` and
/// horizontally close
pub fn is_reachable(candidate: &Rect, placed: &[Platform], reach: f32, tolerance: f32) -> bool {
    if GROUND_TOP - candidate.top() <= reach {
        return true;
    }
    placed.iter().any(|other| {
        let gap = other.top() - candidate.top();
        gap > 0.0 && gap <= reach && candidate.overlaps_horizontally(&other.rect, tolerance)
    })
}

fn overlaps_placed(candidate: &Rect, placed: &[Platform], buffer: f32) -> bool {
    let padded = candidate.inflate(buffer);
    placed.iter().any(|other| padded.intersects(&other.rect))
}

fn place_platforms<R: Rng>(requested: u32, reach: f32, tuning: &Tuning, rng: &mut R) -> Vec<Platform> {
    let mut platforms = vec![Platform::ground()];
    let bands = vertical_bands(tuning);
    let slots = allocate_slots(requested, bands.len());

    for (band_index, (band, count)) in bands.iter().zip(slots).enumerate() {
        for _ in 0..count {
            match sample_platform(band, reach, &platforms, tuning, rng) {
                Some(platform) => platforms.push(platform),
                None => log::debug!("Dropped platform slot in band {}", band_index),
            }
        }
    }

    platforms
}

fn sample_platform<R: Rng>(
    band: &Band,
    reach: f32,
    placed: &[Platform],
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Platform> {
    let width_span = (tuning.platform_max_width - tuning.platform_min_width).max(0.0);
    let band_height = band.y_max - band.y_min;

    for _ in 0..tuning.platform_attempts {
        let width = tuning.platform_min_width + rng.random::<f32>() * width_span;
        let x = rng.random::<f32>() * (LEVEL_WIDTH - width).max(0.0);
        let y = band.y_min + rng.random::<f32>() * band_height;
        let candidate = Platform::new(x, y, width);

        if overlaps_placed(&candidate.rect, placed, tuning.platform_buffer) {
            continue;
        }
        if !is_reachable(&candidate.rect, placed, reach, tuning.reach_tolerance) {
            continue;
        }
        return Some(candidate);
    }

    None
}

fn pick_surface<'a, R: Rng>(surfaces: &[&'a Platform], rng: &mut R) -> Option<&'a Platform> {
    if surfaces.is_empty() {
        return None;
    }
    Some(surfaces[rng.random_range(0..surfaces.len())])
}

/// Random x for an item of `size` resting on `platform`
fn offset_on<R: Rng>(platform: &Platform, size: f32, rng: &mut R) -> f32 {
    platform.rect.x + rng.random::<f32>() * (platform.rect.width - size).max(0.0)
}

fn scatter_coins<R: Rng>(platforms: &[Platform], tuning: &Tuning, rng: &mut R) -> Vec<Coin> {
    let surfaces: Vec<&Platform> = platforms.iter().filter(|p| !p.is_ground).collect();
    let mut coins = Vec::with_capacity(tuning.coins_per_level as usize);

    for _ in 0..tuning.coins_per_level {
        let Some(platform) = pick_surface(&surfaces, rng) else {
            log::debug!("No platforms to hold coins");
            break;
        };
        let x = offset_on(platform, COIN_SIZE, rng);
        let y = platform.top() - COIN_SIZE - COIN_HOVER;
        coins.push(Coin::new(Vec2::new(x, y)));
    }

    coins
}

fn near_coin(pos: Vec2, coins: &[Coin], separation: f32) -> bool {
    coins.iter().any(|coin| {
        (pos.x - coin.pos.x).abs() < separation && (pos.y - coin.pos.y).abs() < separation
    })
}

fn scatter_hazards<R: Rng>(
    platforms: &[Platform],
    coins: &[Coin],
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<Hazard> {
    let surfaces: Vec<&Platform> = platforms.iter().filter(|p| !p.is_ground).collect();
    let mut hazards = Vec::with_capacity(tuning.hazards_per_level as usize);

    for _ in 0..tuning.hazards_per_level {
        let mut placed = None;
        for _ in 0..tuning.hazard_attempts {
            let Some(platform) = pick_surface(&surfaces, rng) else {
                break;
            };
            let pos = Vec2::new(
                offset_on(platform, HAZARD_SIZE, rng),
                platform.top() - HAZARD_SIZE,
            );
            if !near_coin(pos, coins, tuning.hazard_coin_separation) {
                placed = Some(Hazard::new(pos));
                break;
            }
        }
        match placed {
            Some(hazard) => hazards.push(hazard),
            None => log::debug!("Skipped hazard: no spot clear of coins"),
        }
    }

    hazards
}
