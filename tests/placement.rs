use ballsim::core::{MassPolicy, ParticleSet, SimConfig, Simulation, VelocitySampling};
use ballsim::error::{Error, Result};
use rand::{rngs::StdRng, SeedableRng};

/// No two particles of a freshly built set may overlap.
#[test]
fn fresh_set_has_no_overlaps() -> Result<()> {
    for seed in [1_u64, 2, 3, 4, 5] {
        let mut rng = StdRng::seed_from_u64(seed);
        let set = ParticleSet::initialize(&SimConfig::default(), [1024.0, 768.0], &mut rng)?;
        let ps = set.as_slice();
        for i in 0..ps.len() {
            for j in (i + 1)..ps.len() {
                let d = (ps[j].r[0] - ps[i].r[0]).hypot(ps[j].r[1] - ps[i].r[1]);
                let min = ps[i].radius() + ps[j].radius();
                assert!(
                    d >= min,
                    "seed {seed}: particles {i} and {j} overlap (distance {d}, radii sum {min})"
                );
            }
        }
    }
    Ok(())
}

/// Default velocities are whole numbers in -3..=3, radii whole numbers in 10..=30.
#[test]
fn default_sampling_matches_classic_setup() -> Result<()> {
    let sim = Simulation::new(&SimConfig::default(), [1280.0, 720.0], Some(99))?;
    for p in sim.particles() {
        for &c in &p.v {
            assert_eq!(c, c.trunc(), "velocity component {c} is not whole");
            assert!((-3.0..=3.0).contains(&c), "velocity component {c} out of range");
        }
        let r = p.radius();
        assert!((10.0..=30.0).contains(&r) && r == r.trunc(), "bad radius {r}");
    }
    Ok(())
}

/// Same seed, same simulation; different seed, different simulation.
#[test]
fn seeded_construction_is_deterministic() -> Result<()> {
    let cfg = SimConfig::with_count(50);
    let mut a = Simulation::new(&cfg, [900.0, 700.0], Some(2024))?;
    let mut b = Simulation::new(&cfg, [900.0, 700.0], Some(2024))?;
    let c = Simulation::new(&cfg, [900.0, 700.0], Some(2025))?;
    assert_eq!(a.positions(), b.positions());
    assert_ne!(a.positions(), c.positions());

    a.advance_ticks(200);
    b.advance_ticks(200);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.velocities(), b.velocities());
    Ok(())
}

/// Area-proportional masses and uniform velocities are honored.
#[test]
fn alternative_policies_applied() -> Result<()> {
    let cfg = SimConfig {
        count: 30,
        velocity_sampling: VelocitySampling::Uniform,
        velocity_range: (-1.0, 1.0),
        mass_policy: MassPolicy::Area { density: 0.01 },
        ..SimConfig::default()
    };
    let sim = Simulation::new(&cfg, [800.0, 800.0], Some(8))?;
    for p in sim.particles() {
        let expected = 0.01 * std::f64::consts::PI * p.radius() * p.radius();
        assert!((p.mass() - expected).abs() < 1e-12);
        assert!(p.v.iter().all(|c| (-1.0..=1.0).contains(c)));
    }
    Ok(())
}

/// Too many large particles for a small plane is reported, not spun on forever.
#[test]
fn overcrowded_plane_is_infeasible() {
    let cfg = SimConfig {
        count: 500,
        radius_range: 30..=30,
        max_placement_attempts: 1_000,
        ..SimConfig::default()
    };
    let err = Simulation::new(&cfg, [400.0, 400.0], Some(1)).unwrap_err();
    match err {
        Error::PlacementInfeasible { index, attempts } => {
            assert!(index > 0 && index < 500, "unexpected failing index {index}");
            assert_eq!(attempts, 1_000);
        }
        other => panic!("expected PlacementInfeasible, got {other}"),
    }
}

/// Bad construction parameters are configuration errors.
#[test]
fn invalid_parameters_rejected() {
    let bad_count = Simulation::new(&SimConfig::with_count(0), [800.0, 600.0], Some(1));
    assert!(matches!(bad_count, Err(Error::InvalidParam(_))));

    let bad_plane = Simulation::new(&SimConfig::default(), [800.0, 0.0], Some(1));
    assert!(matches!(bad_plane, Err(Error::InvalidParam(_))));

    #[allow(clippy::reversed_empty_ranges)]
    let cfg = SimConfig {
        radius_range: 20..=10,
        ..SimConfig::default()
    };
    let bad_range = Simulation::new(&cfg, [800.0, 600.0], Some(1));
    assert!(matches!(bad_range, Err(Error::InvalidParam(_))));
}
