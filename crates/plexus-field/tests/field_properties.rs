//! Whole-loop checks driving the animator headless.

use plexus_core::Profile;
use plexus_field::{
    Animator, DrawCall, ManualStepper, Particle, ParticleField, Point, RecordingSurface, Size,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn run_frames(animator: &mut Animator<RecordingSurface>, stepper: &mut ManualStepper, n: usize) {
    for _ in 0..n {
        assert!(stepper.step(), "drive loop stopped requesting frames");
        animator.animate(stepper);
    }
}

fn assert_inside(field: &ParticleField) {
    let bounds = field.bounds();
    for p in field.particles() {
        assert!(
            p.position.x >= 0.0 && p.position.x < bounds.width,
            "x = {} outside [0, {})",
            p.position.x,
            bounds.width
        );
        assert!(
            p.position.y >= 0.0 && p.position.y < bounds.height,
            "y = {} outside [0, {})",
            p.position.y,
            bounds.height
        );
    }
}

#[test]
fn particles_stay_inside_after_every_frame() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut stepper = ManualStepper::new();
    let surface = RecordingSurface::new(Size::new(640.0, 360.0));
    let mut animator =
        Animator::launch(Some(surface), Profile::Background.params(), &mut rng, &mut stepper)
            .unwrap();
    animator.pointer_moved(Point::new(320.0, 180.0));

    for _ in 0..2000 {
        run_frames(&mut animator, &mut stepper, 1);
        assert_inside(animator.field());
    }
}

#[test]
fn fast_particles_still_wrap_inside() {
    let params = Profile::Splash.params();
    let bounds = Size::new(100.0, 80.0);
    let mut rng = StdRng::seed_from_u64(11);
    let particles = (0..30)
        .map(|_| {
            Particle::new(
                Point::new(rng.random::<f32>() * 100.0, rng.random::<f32>() * 80.0),
                Point::new(rng.random_range(-300.0..300.0), rng.random_range(-300.0..300.0)),
            )
        })
        .collect();
    let mut field = ParticleField::from_particles(params, bounds, particles);

    for _ in 0..200 {
        field.update();
        assert_inside(&field);
    }
}

#[test]
fn particle_count_never_changes() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut stepper = ManualStepper::new();
    let surface = RecordingSurface::new(Size::new(1000.0, 600.0));
    let mut animator =
        Animator::launch(Some(surface), Profile::Background.params(), &mut rng, &mut stepper)
            .unwrap();
    assert_eq!(animator.field().particles().len(), 40);

    animator.surface_mut().set_size(Size::new(3000.0, 600.0));
    animator.resize();
    run_frames(&mut animator, &mut stepper, 100);
    assert_eq!(animator.field().particles().len(), 40);
}

#[test]
fn edges_match_brute_force_pairs() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut stepper = ManualStepper::new();
    let surface = RecordingSurface::new(Size::new(600.0, 400.0));
    let mut animator =
        Animator::launch(Some(surface), Profile::Splash.params(), &mut rng, &mut stepper)
            .unwrap();

    for _ in 0..50 {
        run_frames(&mut animator, &mut stepper, 3);

        let field = animator.field();
        let d = field.params().connection_distance;
        let particles = field.particles();
        let mut expected = Vec::new();
        for i in 0..particles.len() {
            for j in i + 1..particles.len() {
                if particles[i].position.distance(particles[j].position) < d {
                    expected.push((i, j));
                }
            }
        }
        let actual: Vec<_> = field.edges().iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(actual, expected);
        assert!(field.edges().iter().all(|e| e.opacity >= 0.0));
    }
}

#[test]
fn drawn_frame_matches_field_state() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut stepper = ManualStepper::new();
    let surface = RecordingSurface::new(Size::new(800.0, 600.0));
    let mut animator =
        Animator::launch(Some(surface), Profile::Background.params(), &mut rng, &mut stepper)
            .unwrap();
    run_frames(&mut animator, &mut stepper, 10);

    let field = animator.field();
    let frame = animator.surface().frame();
    let lines = frame
        .iter()
        .filter(|c| matches!(c, DrawCall::Line { .. }))
        .count();
    let glows = frame
        .iter()
        .filter(|c| matches!(c, DrawCall::Glow { .. }))
        .count();
    assert_eq!(lines, field.edges().len());
    assert_eq!(glows, field.particles().len());
    assert_eq!(lines + glows, frame.len());
}

#[test]
fn resize_with_same_size_is_a_no_op() {
    let mut rng = StdRng::seed_from_u64(21);
    let surface = RecordingSurface::new(Size::new(500.0, 500.0));
    let mut animator = Animator::new(surface, Profile::Background.params(), &mut rng);
    let before = animator.field().particles().to_vec();

    for _ in 0..5 {
        animator.resize();
    }
    assert_eq!(animator.field().bounds(), Size::new(500.0, 500.0));
    assert_eq!(animator.field().particles(), before.as_slice());
}

#[test]
fn clamp_never_increases_speed() {
    let params = Profile::Background.params().with_attraction(None);
    let particles = vec![
        Particle::new(Point::new(10.0, 10.0), Point::new(3.0, 4.0)),
        Particle::new(Point::new(50.0, 50.0), Point::new(-0.9, 0.2)),
        Particle::new(Point::new(90.0, 20.0), Point::new(0.1, 0.1)),
    ];
    let mut field = ParticleField::from_particles(params, Size::new(100.0, 100.0), particles);
    let mut previous: Vec<f32> = field.particles().iter().map(Particle::speed).collect();

    for _ in 0..200 {
        field.update();
        let speeds: Vec<f32> = field.particles().iter().map(Particle::speed).collect();
        for (now, before) in speeds.iter().zip(&previous) {
            assert!(now <= before);
        }
        previous = speeds;
    }
    assert!(previous.iter().all(|&speed| speed <= 0.5));
    // Slow particles are left alone.
    assert!((previous[2] - Point::new(0.1, 0.1).length()).abs() < 1e-7);
}

#[test]
fn two_particles_at_one_hundred() {
    let mut params = Profile::Background.params().with_attraction(None);
    params.connection_distance = 150.0;
    params.edge_opacity = 0.3;
    let particles = vec![
        Particle::new(Point::new(100.0, 100.0), Point::default()),
        Particle::new(Point::new(200.0, 100.0), Point::default()),
    ];
    let mut field = ParticleField::from_particles(params, Size::new(1000.0, 1000.0), particles);
    field.update();

    assert_eq!(field.edges().len(), 1);
    assert!((field.edges()[0].opacity - 0.1).abs() < 1e-6);
}
