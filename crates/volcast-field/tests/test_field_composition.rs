//! Integration tests composing shapes, displacement and ramps into fields.

use glam::DVec3;
use pretty_assertions::assert_eq;
use volcast_field::displacement::displacement;
use volcast_field::effects::{fire, noise3d, positive, turbulence};
use volcast_field::shape::{ball_shape, paraboloid_fire_shape};
use volcast_field::{Color, ColorField, ColorRamp, FieldPreset, Intensity, PRESET_NAMES};

fn flame_shape() -> Intensity {
    paraboloid_fire_shape(DVec3::new(0.5, 1.0, 0.5), DVec3::new(0.5, -1.0, 0.5))
}

#[test]
fn paraboloid_stays_in_unit_range_over_cube() {
    let shape = flame_shape();
    for i in 0..=10 {
        for j in 0..=10 {
            for k in 0..=10 {
                let p = DVec3::new(i as f64, j as f64, k as f64) / 10.0;
                let v = shape.sample(p);
                assert!((0.0..=1.0).contains(&v), "shape({p}) = {v}");
            }
        }
    }
}

#[test]
fn paraboloid_is_zero_outside_cone() {
    let shape = flame_shape();
    assert_eq!(shape.sample(DVec3::new(0.0, 0.9, 0.0)), 0.0);
    assert_eq!(shape.sample(DVec3::new(0.5, 1.1, 0.5)), 0.0);
    assert!(shape.sample(DVec3::new(0.5, 0.5, 0.5)) > 0.0);
}

#[test]
fn ramp_endpoints_are_exact() {
    let ramp = ColorRamp::fire_yellow();
    assert_eq!(ramp.at(0.0), Color::rgb(0.920, 0.0, 0.0));
    assert_eq!(ramp.at(1.0), Color::rgb(0.916, 0.930, 0.122));
    let blue = ColorRamp::fire_blue();
    assert_eq!(blue.at(1.0), Color::white());
}

#[test]
fn displaced_ball_differs_from_plain_ball() {
    let ball = ball_shape(DVec3::splat(0.5), DVec3::splat(0.3));
    let warp = displacement(noise3d(5));
    let warped = {
        let ball = ball.clone();
        Intensity::new(move |p| ball.sample(p + warp.sample(p * 3.0) * 0.2))
    };
    let differs = (0..20).any(|i| {
        let p = DVec3::new(0.2 + i as f64 * 0.03, 0.5, 0.45);
        (ball.sample(p) - warped.sample(p)).abs() > 1e-6
    });
    assert!(differs);
}

#[test]
fn fire_built_by_hand_matches_preset_defaults() {
    let preset = FieldPreset::named("fire").unwrap().build().unwrap();
    let noise = noise3d(0);
    let manual: ColorField = fire(
        flame_shape(),
        turbulence(noise.clone(), 4),
        noise,
        ColorRamp::fire_yellow(),
        1.0,
        1.0,
    );
    for t in [0.0, 0.75] {
        for y in [0.2, 0.5, 0.8] {
            let p = DVec3::new(0.48, y, 0.52);
            assert_eq!(preset.sample(p, t), manual.sample(p, t));
        }
    }
}

#[test]
fn positive_noise_in_unit_interval() {
    let field = positive(noise3d(11));
    for i in 0..50 {
        let v = field.sample(DVec3::new(i as f64 * 0.37, i as f64 * 0.11, 0.5));
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn every_preset_samples_finite_colors() {
    for name in PRESET_NAMES {
        let field = FieldPreset::named(name).unwrap().build().unwrap();
        for i in 0..=4 {
            let p = DVec3::splat(i as f64 / 4.0);
            assert!(field.sample(p, 1.5).is_finite(), "{name} at {p}");
        }
    }
}
