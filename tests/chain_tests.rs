use approx::assert_abs_diff_eq;
use vinekit::{
    DistanceConstraint, Particle, SimpleBody, SwingInput, SystemConfig, Vec2, VineConfig,
    VineManager,
};

fn far_body() -> SimpleBody {
    SimpleBody::new(Vec2::new(10_000.0, 10_000.0))
}

#[test]
fn new_vine_hangs_straight_down() {
    let mut vines = VineManager::default();
    let vine = vines.create_vine(800.0, 100.0, 20).unwrap();
    let positions = vines.positions(vine).unwrap();

    assert_eq!(positions.len(), 20);
    assert_eq!(positions[0], Vec2::new(800.0, 100.0));
    assert_abs_diff_eq!(positions[1].x, 800.0);
    assert_abs_diff_eq!(positions[1].y, 115.0, epsilon = 1e-9);
    assert_abs_diff_eq!(positions[19].y, 100.0 + 15.0 * 19.0, epsilon = 1e-9);
}

#[test]
fn too_short_vine_is_rejected() {
    let mut vines = VineManager::default();
    assert!(vines.create_vine(0.0, 0.0, 1).is_err());
    assert!(vines.create_vine(0.0, 0.0, 0).is_err());
    assert!(vines.is_empty());
}

#[test]
fn anchor_never_moves() {
    let mut vines = VineManager::default();
    let vine = vines.create_vine(800.0, 100.0, 20).unwrap();
    let anchor = vines.positions(vine).unwrap()[0];

    let mut body = SimpleBody::new(Vec2::new(800.0, 190.0));
    vines.grab(vine, 5, &mut body).unwrap();

    for frame in 0..600 {
        let input = if (frame / 40) % 2 == 0 { SwingInput::Left } else { SwingInput::Right };
        vines.swing(&mut body, input);
        if frame % 50 == 0 {
            vines.apply_force(vine, Vec2::new(400.0, -200.0));
        }
        vines.update(16.0, &mut body);
        assert_eq!(vines.positions(vine).unwrap()[0], anchor, "frame {}", frame);
    }
}

#[test]
fn free_vine_sags_but_stays_vertical() {
    let mut vines = VineManager::default();
    let vine = vines.create_vine(0.0, 0.0, 10).unwrap();
    let mut body = far_body();
    for _ in 0..200 {
        vines.update(16.0, &mut body);
    }
    let positions = vines.positions(vine).unwrap();
    assert!(positions[9].y > 15.0 * 9.0, "rope should stretch under its own gravity");
    for p in &positions {
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
    }
}

fn settled_stretch(iterations: usize) -> f64 {
    let config = SystemConfig::new().with_vine(VineConfig::new().with_iterations(iterations));
    let mut vines = VineManager::new(config).unwrap();
    let vine = vines.create_vine(0.0, 0.0, 20).unwrap();
    let mut body = far_body();
    for _ in 0..600 {
        vines.update(16.0, &mut body);
    }
    vines.vine(vine).unwrap().mean_stretch()
}

#[test]
fn more_iterations_never_stretch_more() {
    let stretches: Vec<f64> = [1, 2, 4, 8, 16, 32].iter().map(|&k| settled_stretch(k)).collect();
    for pair in stretches.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "stretch went up: {:?}", stretches);
    }
    assert!(
        stretches[5] < stretches[0] * 0.1,
        "stretch should shrink toward zero: {:?}",
        stretches
    );
}

#[test]
fn coincident_particles_are_left_alone() {
    let mut particles = vec![
        Particle::pinned(Vec2::new(5.0, 5.0)),
        Particle::new(Vec2::new(5.0, 5.0)),
        Particle::new(Vec2::new(5.0, 5.0)),
    ];
    let constraints = [
        DistanceConstraint::new(0, 1, 15.0, 0.8),
        DistanceConstraint::new(1, 2, 15.0, 0.8),
    ];
    for _ in 0..10 {
        for c in &constraints {
            c.solve(&mut particles);
        }
    }
    for p in &particles {
        assert!(p.pos.is_finite());
        assert_eq!(p.pos, Vec2::new(5.0, 5.0));
    }
}

#[test]
fn zero_frame_time_pauses_simulation() {
    let mut vines = VineManager::default();
    let vine = vines.create_vine(0.0, 0.0, 10).unwrap();
    let mut body = far_body();
    vines.update(16.0, &mut body);
    let before = vines.positions(vine).unwrap();
    vines.update(0.0, &mut body);
    assert_eq!(vines.positions(vine).unwrap(), before);
    assert_eq!(vines.now_ms(), 16.0);
}

#[test]
fn long_frame_is_clamped() {
    let mut a = VineManager::default();
    let mut b = VineManager::default();
    let va = a.create_vine(0.0, 0.0, 10).unwrap();
    let vb = b.create_vine(0.0, 0.0, 10).unwrap();
    let mut body = far_body();
    a.update(16.0, &mut body);
    b.update(500.0, &mut body);
    assert_eq!(a.positions(va), b.positions(vb));
    assert_eq!(b.now_ms(), 500.0);
}

#[test]
fn short_frames_sag_like_full_frames() {
    let mut fast = VineManager::default();
    let mut slow = VineManager::default();
    let vf = fast.create_vine(0.0, 0.0, 10).unwrap();
    let vs = slow.create_vine(0.0, 0.0, 10).unwrap();
    let mut body = far_body();
    for _ in 0..30 {
        fast.update(8.0, &mut body);
        slow.update(16.0, &mut body);
    }
    assert_eq!(fast.positions(vf), slow.positions(vs));
    assert_abs_diff_eq!(fast.now_ms(), 240.0);
}

#[test]
fn segment_angles_follow_the_swing() {
    let mut vines = VineManager::default();
    let vine = vines.create_vine(0.0, 0.0, 10).unwrap();
    let mut body = SimpleBody::new(Vec2::new(0.0, 165.0));
    vines.grab(vine, 9, &mut body).unwrap();
    for _ in 0..20 {
        vines.swing(&mut body, SwingInput::Right);
        vines.update(16.0, &mut body);
    }
    let angles = vines.vine(vine).unwrap().segment_angles();
    assert_eq!(angles.len(), 9);
    assert!(angles.iter().any(|a| a.abs() > 1e-3), "swinging vine should tilt");
}
