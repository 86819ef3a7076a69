//! Side-scrolling desert: dunes, rotating set-pieces, moon, stars and mist.

use std::f32::consts::TAU;

use super::{SceneContext, Shape};

/// World units covered by one set-piece.
pub const PHASE_SPACING: f64 = 150.0;

const MOON_RADIUS: f32 = 8.0;

pub(super) const SHAPES: &[Shape] = &[dunes, temple, pyramid, caravan, oasis, moon, stars, mist];

/// Which of the four set-pieces occupies world x.
pub fn scene_phase(world_x: f64) -> u32 {
    ((world_x / PHASE_SPACING).floor() as i64).rem_euclid(4) as u32
}

/// Position of world x inside its set-piece span, shifted so pieces sit off-center.
/// Narrowed to `f32` only after the span base is removed.
pub fn phase_local_x(world_x: f64) -> f32 {
    (world_x % PHASE_SPACING - PHASE_SPACING * 0.3) as f32
}

/// Deterministic pseudo-random value in `[0, 1)` for a grid position.
pub fn star_noise(col: f32, row: f32) -> f32 {
    let seed = (col as f64 * 12.9898 + row as f64 * 78.233).sin() * 43758.5453;
    (seed - seed.floor()) as f32
}

/// Raise `slot` to `value` if brighter.
fn raise(slot: &mut Option<f32>, value: f32) {
    *slot = Some(slot.map_or(value, |current| current.max(value)));
}

fn dunes(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let world_x = ctx.world_x(col);
    let ground = ctx.ground_level();

    let wave = |freq: f64, shift: f64| (world_x * freq + shift).sin() as f32;

    let dune1 = wave(0.015, 0.0) * 12.0 + ground - 20.0;
    let dune2 = wave(0.025, 1.5) * 8.0 + ground - 10.0;
    let dune3 = wave(0.035, 3.0) * 6.0 + ground - 5.0;
    let crest = dune1.min(dune2).min(dune3);

    if row < crest.min(ground) {
        return None;
    }
    let depth = row - crest;
    Some((0.5 - depth * 0.02).max(0.2))
}

fn temple(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let world_x = ctx.world_x(col);
    if scene_phase(world_x) != 0 {
        return None;
    }
    let x = phase_local_x(world_x);

    let base = ctx.ground_level() - 5.0;
    let top = base - ctx.rows * 0.35;
    let center = 40.0;
    let half_width = 30.0;

    if (x - center).abs() >= half_width || row <= top || row >= base {
        return None;
    }

    let mut lit = None;
    for i in 0..4 {
        let column_x = center - 20.0 + i as f32 * 13.0;
        if (x - column_x).abs() < 3.0 {
            raise(&mut lit, 0.7 + ctx.shimmer(2.0, i as f32) * 0.2);
        }
    }

    // Roof
    if row < top + 8.0 {
        raise(&mut lit, 0.8);
    }

    // Hieroglyph stripes drifting down the walls; truncated remainder keeps
    // negative offsets inside the stripe.
    if (f64::from(x + row) + ctx.time * 10.0) % 12.0 < 3.0 {
        raise(&mut lit, 0.9);
    }

    lit
}

fn pyramid(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let world_x = ctx.world_x(col);
    if scene_phase(world_x) != 1 {
        return None;
    }
    let x = phase_local_x(world_x);

    let center = 50.0;
    let base = ctx.ground_level() - 8.0;
    let height = ctx.rows * 0.45;
    let width = 70.0;

    let dist = (x - center).abs();
    let above_base = base - row;
    let half_width_here = (width / 2.0) * (1.0 - above_base / height);

    if above_base <= 0.0 || above_base >= height || dist >= half_width_here {
        return None;
    }

    // Entrance
    if dist < 4.0 && above_base < 15.0 {
        return Some(0.3);
    }

    let block = (row / 4.0).floor() as i64 + (x / 6.0).floor() as i64;
    Some(0.6 + (block % 3) as f32 * 0.1)
}

fn caravan(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let world_x = ctx.world_x(col);
    if scene_phase(world_x) != 2 {
        return None;
    }
    let x = phase_local_x(world_x);
    let line = ctx.ground_level() - 15.0;

    let mut lit = None;
    for camel in 0..3 {
        let camel = camel as f32;
        let camel_x = 20.0 + camel * 25.0 + ctx.shimmer(1.0, camel) * 2.0;

        // Body
        if (x - camel_x).abs() < 8.0 && (row - line).abs() < 6.0 {
            raise(&mut lit, 0.7);
        }
        // Hump
        if (x - camel_x).abs() < 4.0 && (row - (line - 8.0)).abs() < 3.0 {
            raise(&mut lit, 0.8);
        }
        // Neck and head
        if (x - (camel_x + 6.0)).abs() < 2.0 && (row - (line - 6.0)).abs() < 6.0 {
            raise(&mut lit, 0.7);
        }
    }
    lit
}

fn oasis(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let world_x = ctx.world_x(col);
    if scene_phase(world_x) != 3 {
        return None;
    }
    let x = phase_local_x(world_x);

    let center = 35.0;
    let water_line = ctx.ground_level() - 5.0;

    let mut lit = None;

    let lake_radius = 15.0 + ctx.shimmer(2.0, 0.0) * 2.0;
    let to_lake = (x - center).hypot(row - water_line);
    if to_lake < lake_radius {
        let ripple = ctx.shimmer(-4.0, to_lake * 0.5) * 0.2;
        raise(&mut lit, 0.4 + ripple);
    }

    for palm in 0..4 {
        let palm = palm as f32;
        let angle = palm / 4.0 * TAU;
        let palm_x = center + angle.cos() * 20.0;
        let crown_y = water_line - 25.0;

        // Trunk
        if (x - palm_x).abs() < 2.0 && row > crown_y && row < water_line {
            raise(&mut lit, 0.6);
        }

        // Fronds
        let to_crown = (x - palm_x).hypot(row - crown_y);
        if to_crown > 8.0 && to_crown < 12.0 {
            let leaf_angle = (row - crown_y).atan2(x - palm_x);
            if (leaf_angle * 4.0 + palm).sin() > 0.3 {
                raise(&mut lit, 0.5);
            }
        }
    }
    lit
}

fn moon(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let dist = (col - ctx.columns * 0.15).hypot(row - ctx.rows * 0.15);
    (dist < MOON_RADIUS).then(|| 1.0 - (dist / MOON_RADIUS) * 0.4)
}

fn stars(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    if row >= ctx.rows * 0.7 || star_noise(col, row) <= 0.995 {
        return None;
    }
    Some(ctx.shimmer(3.0, col * 0.1 + row * 0.1) * 0.3 + 0.7)
}

fn mist(ctx: &SceneContext, col: f32, row: f32) -> Option<f32> {
    let top = ctx.rows * 0.7;
    if row <= top {
        return None;
    }
    let swell = (ctx.world_x(col) * 0.02 + ctx.time * 0.5).sin() as f32 * 0.1 + 0.1;
    let fade = (row - top) / (ctx.rows - top);
    Some(swell * fade)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(scroll_offset: f64, time: f64) -> SceneContext {
        SceneContext {
            columns: 100.0,
            rows: 100.0,
            time,
            scroll_offset,
        }
    }

    #[test]
    fn test_scene_phase_cycles() {
        let phases: Vec<u32> = (0..9).map(|step| scene_phase(step as f64 * 150.0)).collect();
        assert_eq!(phases, vec![0, 1, 2, 3, 0, 1, 2, 3, 0]);
        assert_eq!(scene_phase(149.9), 0);
        assert_eq!(scene_phase(151.0), 1);
    }

    #[test]
    fn test_phase_local_x() {
        assert_eq!(phase_local_x(0.0), -45.0);
        assert_eq!(phase_local_x(215.0), 20.0);
    }

    #[test]
    fn test_moon_center_is_full_brightness() {
        let value = moon(&ctx(0.0, 0.0), 15.0, 15.0).unwrap();
        assert!((value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_moon_has_hard_edge() {
        let c = ctx(0.0, 0.0);
        assert!(moon(&c, 24.0, 15.0).is_none());
        assert!(moon(&c, 21.0, 21.0).is_none());
        assert!(moon(&c, 40.0, 40.0).is_none());
        let rim = moon(&c, 22.0, 15.0).unwrap();
        assert!((rim - (1.0 - 7.0 / 8.0 * 0.4)).abs() < 1e-6);
    }

    #[test]
    fn test_moon_ignores_scroll() {
        assert_eq!(
            moon(&ctx(0.0, 0.0), 15.0, 15.0),
            moon(&ctx(9000.0, 3.0), 15.0, 15.0)
        );
    }

    #[test]
    fn test_star_selection_is_deterministic() {
        for row in 0..70 {
            for col in 0..100 {
                let (c, r) = (col as f32, row as f32);
                assert_eq!(star_noise(c, r), star_noise(c, r));
                let early = stars(&ctx(0.0, 0.0), c, r).is_some();
                let late = stars(&ctx(40.0, 12.5), c, r).is_some();
                assert_eq!(early, late);
            }
        }
    }

    #[test]
    fn test_star_noise_range() {
        for row in 0..50 {
            for col in 0..50 {
                let n = star_noise(col as f32, row as f32);
                assert!((0.0..=1.0).contains(&n));
            }
        }
    }

    #[test]
    fn test_no_stars_in_lower_rows() {
        let c = ctx(0.0, 0.0);
        for row in 70..100 {
            for col in 0..100 {
                assert!(stars(&c, col as f32, row as f32).is_none());
            }
        }
    }

    #[test]
    fn test_mist_fades_in_toward_bottom() {
        let c = ctx(0.0, 0.0);
        assert!(mist(&c, 10.0, 50.0).is_none());
        assert!(mist(&c, 10.0, 70.0).is_none());
        let shallow = mist(&c, 10.0, 72.0).unwrap();
        let deep = mist(&c, 10.0, 99.0).unwrap();
        assert!(deep > shallow);
    }

    #[test]
    fn test_dunes_cover_the_floor() {
        let c = ctx(0.0, 0.0);
        assert!(dunes(&c, 10.0, 20.0).is_none());
        let floor = dunes(&c, 10.0, 99.0).unwrap();
        assert!((0.2..=0.5).contains(&floor));
    }

    #[test]
    fn test_temple_only_in_phase_zero() {
        // World x 65 is the first column of the temple.
        let c = ctx(0.0, 0.0);
        let lit = temple(&c, 65.0, 60.0).unwrap();
        assert!(lit >= 0.5);
        let shifted = ctx(1500.0, 0.0);
        assert!(temple(&shifted, 65.0, 60.0).is_none());
    }

    #[test]
    fn test_pyramid_entrance_is_darker_than_blocks() {
        // Scroll 1500 shifts the world by one set-piece into the pyramid span.
        let c = ctx(1500.0, 0.0);
        assert_eq!(pyramid(&c, 95.0, 70.0), Some(0.3));
        let block = pyramid(&c, 115.0, 70.0).unwrap();
        assert!((block - 0.7).abs() < 1e-6);
        assert!(pyramid(&c, 95.0, 10.0).is_none());
    }

    #[test]
    fn test_set_pieces_resolve_far_along_the_world() {
        // Ten million set-pieces on from the pyramid test above.
        let c = ctx(60_000_001_500.0, 0.0);
        assert_eq!(scene_phase(c.world_x(95.0)), 1);
        assert_eq!(pyramid(&c, 95.0, 70.0), Some(0.3));
        let block = pyramid(&c, 115.0, 70.0).unwrap();
        assert!((block - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_caravan_body() {
        // Phase 2 starts at world x 300; the first camel sits near local x 20.
        let c = ctx(3000.0, 0.0);
        let line = c.ground_level() - 15.0;
        assert_eq!(caravan(&c, 65.0, line), Some(0.7));
        assert!(caravan(&c, 65.0, 10.0).is_none());
    }

    #[test]
    fn test_oasis_lake_center() {
        // Phase 3 starts at world x 450; lake center is local x 35.
        let c = ctx(4500.0, 0.0);
        let water_line = c.ground_level() - 5.0;
        let value = oasis(&c, 80.0, water_line).unwrap();
        assert!((0.2..=0.6).contains(&value));
    }
}
