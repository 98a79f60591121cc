//! End-to-end manifold behaviour over many frames.

use std::f64::consts::TAU;

use fibhelix_core::{Manifold, ManifoldConfig, ManifoldEvent};

/// No splits at all: a single loop grows undisturbed.
fn single_loop_config(points_per_frame: usize) -> ManifoldConfig {
    ManifoldConfig {
        points_per_frame,
        base_split_prob: 0.0,
        curvature_split_threshold: 1e12,
        seed: 2024,
        ..Default::default()
    }
}

/// Largest distance two consecutive points of a fib-3 loop can be apart.
///
/// Around the axis the helix moves at most `radius * dang`, plus the slopes of
/// the radius wobble and the jitter. The pitch plus the sway slope bound the
/// climb. Each point also carries a twist of at most `0.5 * (1 + twist_scale)`.
fn spacing_bound(config: &ManifoldConfig, fib_value: f64) -> f64 {
    let dang = TAU * (config.fib_ang_freq_base + fib_value * config.fib_ang_freq_scale)
        / f64::from(config.cycle_length);
    let radius = (config.base_radius + config.fib_radius_scale * fib_value + 8.0) * 1.06;
    let planar = radius * dang
        + radius * 0.06 * 0.12
        + config.helix_noise_amp * 0.23
        + config.helix_noise_amp * dang;

    let max_pitch = 1.0 + config.fib_pitch_scale * fib_value + 0.6;
    let vertical = max_pitch + 6.0 * 2.0 * dang;

    let twist = 0.5 * (1.0 + config.curvature_twist_scale);
    planar + vertical + 2.0 * twist
}

#[test]
fn one_full_cycle_from_the_seed_loop() {
    let config = single_loop_config(1);
    let cycle_length = config.cycle_length as usize;
    let mut manifold = Manifold::new(config.clone()).unwrap();

    let seed = &manifold.loops()[0];
    assert_eq!(seed.fib_index(), 3);
    assert_eq!(seed.phase(), 0.0);

    manifold.run(cycle_length as u64);

    assert_eq!(manifold.len(), 1);
    let lp = &manifold.loops()[0];
    assert_eq!(lp.cycle(), 1);
    assert_eq!(lp.step(), 0);
    assert_eq!(lp.points().len(), cycle_length * config.points_per_frame);

    let bound = spacing_bound(&config, 3.0);
    for (i, pair) in lp.points().windows(2).enumerate() {
        let gap = pair[0].distance(pair[1]);
        assert!(gap <= bound, "gap {gap} at {i} exceeds {bound}");
    }
}

#[test]
fn one_full_cycle_with_batched_growth() {
    let config = single_loop_config(4);
    let frames = u64::from(config.cycle_length) / 4;
    let mut manifold = Manifold::new(config.clone()).unwrap();

    let reports = manifold.run(frames);

    let lp = &manifold.loops()[0];
    assert_eq!(lp.cycle(), 1);
    assert_eq!(lp.step(), 0);
    assert_eq!(lp.points().len(), config.cycle_length as usize);

    let rollovers: Vec<_> = reports
        .iter()
        .flat_map(|r| &r.events)
        .filter(|e| matches!(e, ManifoldEvent::CycleCompleted { .. }))
        .collect();
    assert_eq!(rollovers.len(), 1);
    assert_eq!(rollovers[0].frame(), frames);
}

#[test]
fn fibonacci_index_never_skips() {
    let config = single_loop_config(36);
    let fib_count = config.fib_count;
    let mut manifold = Manifold::new(config).unwrap();

    let mut previous = manifold.loops()[0].fib_index();
    let mut rollovers = 0;
    for report in manifold.run(500) {
        for event in report.events {
            if let ManifoldEvent::CycleCompleted { fib_index, .. } = event {
                let advance = (fib_index + fib_count - previous) % fib_count;
                assert!(advance <= 1, "index jumped from {previous} to {fib_index}");
                previous = fib_index;
                rollovers += 1;
            }
        }
    }
    assert_eq!(rollovers, 50);
    assert_eq!(manifold.loops()[0].cycle(), 50);
}

#[test]
fn population_never_exceeds_cap() {
    let cap = 5;
    let config = ManifoldConfig {
        max_loops: cap,
        curvature_split_threshold: 1e-9,
        split_cooldown_frames: 0,
        base_split_prob: 1.0,
        seed: 11,
        ..Default::default()
    };
    let mut manifold = Manifold::new(config).unwrap();

    let mut rejected = 0;
    for _ in 0..300 {
        let report = manifold.tick();
        assert!(manifold.len() <= cap);
        rejected += report
            .events
            .iter()
            .filter(|e| matches!(e, ManifoldEvent::SplitRejected { .. }))
            .count();
    }
    assert_eq!(manifold.len(), cap);
    assert!(rejected > 0);
}

#[test]
fn cooldown_allows_one_curvature_split_per_window() {
    let config = ManifoldConfig {
        curvature_split_threshold: 1e-9,
        split_cooldown_frames: 1_000,
        base_split_prob: 0.0,
        seed: 5,
        ..Default::default()
    };
    let mut manifold = Manifold::new(config).unwrap();

    let splits: usize = manifold
        .run(50)
        .iter()
        .flat_map(|r| &r.events)
        .filter(|e| matches!(e, ManifoldEvent::CurvatureSplit { .. }))
        .count();

    // the seed splits on frame 1; it and its child then sit out the window
    assert_eq!(splits, 1);
    assert_eq!(manifold.len(), 2);
    assert_eq!(manifold.loops()[0].last_split_frame(), Some(1));
    assert_eq!(manifold.loops()[1].last_split_frame(), Some(1));
}

#[test]
fn same_seed_same_manifold() {
    let config = ManifoldConfig { seed: 77, ..Default::default() };
    let mut a = Manifold::new(config.clone()).unwrap();
    let mut b = Manifold::new(config).unwrap();

    let reports_a = a.run(400);
    let reports_b = b.run(400);
    assert_eq!(reports_a, reports_b);

    assert_eq!(a.len(), b.len());
    for (la, lb) in a.loops().iter().zip(b.loops()) {
        assert_eq!(la.identity(), lb.identity());
        assert_eq!(la.is_active(), lb.is_active());
        assert_eq!(la.points().len(), lb.points().len());
        for (pa, pb) in la.points().iter().zip(lb.points()) {
            assert_eq!(pa.to_array().map(f64::to_bits), pb.to_array().map(f64::to_bits));
        }
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = Manifold::new(ManifoldConfig { seed: 1, ..Default::default() }).unwrap();
    let mut b = Manifold::new(ManifoldConfig { seed: 2, ..Default::default() }).unwrap();
    a.run(10);
    b.run(10);
    assert_ne!(a.loops()[0].identity(), b.loops()[0].identity());
    assert_ne!(a.loops()[0].tip(), b.loops()[0].tip());
}

#[test]
fn loops_are_retained_and_never_revived() {
    let config = ManifoldConfig {
        base_split_prob: 0.02,
        merge_distance: 25.0,
        seed: 99,
        ..Default::default()
    };
    let mut manifold = Manifold::new(config).unwrap();

    let mut was_inactive: Vec<bool> = Vec::new();
    let mut population = manifold.len();
    for _ in 0..1_500 {
        manifold.tick();
        assert!(manifold.len() >= population);
        population = manifold.len();

        was_inactive.resize(manifold.len(), false);
        for (i, lp) in manifold.loops().iter().enumerate() {
            if was_inactive[i] {
                assert!(!lp.is_active(), "loop {i} came back to life");
            }
            was_inactive[i] = !lp.is_active();
            assert!(lp.step() < manifold.config().cycle_length);
            assert!(lp.fib_index() < manifold.config().fib_count);
        }
    }
    assert!(manifold.len() <= manifold.config().max_loops);
}

#[test]
fn merged_tips_share_a_point() {
    let config = ManifoldConfig {
        base_split_prob: 0.05,
        merge_distance: 30.0,
        seed: 3,
        ..Default::default()
    };
    let mut manifold = Manifold::new(config).unwrap();

    let mut checked = 0;
    for _ in 0..800 {
        let report = manifold.tick();
        for event in &report.events {
            if let ManifoldEvent::Merged { absorbed, .. } = event {
                assert!(!manifold.get(*absorbed).unwrap().is_active());
                checked += 1;
            }
        }
        // the last write of the pass is the one that sticks
        let last = report.events.iter().rev().find_map(|e| match e {
            ManifoldEvent::Merged { survivor, absorbed, midpoint, .. } => {
                Some((*survivor, *absorbed, *midpoint))
            }
            _ => None,
        });
        if let Some((_, absorbed, midpoint)) = last {
            assert_eq!(manifold.get(absorbed).unwrap().tip(), Some(midpoint));
        }
    }
    assert!(checked > 0, "scenario produced no merges");
}
