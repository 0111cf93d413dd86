use approx::{assert_abs_diff_eq, assert_relative_eq};
use magic_tire::{
    default_calibration, evaluate_force, slip, ContactPatchState, ForceResult, TireCalibration,
    TireCalibrationInit, TireError, TireForceModel,
};
use noisy_float::types::r64;
use rand::{rngs::StdRng, Rng, SeedableRng};

const SAMPLES: usize = 2000;

fn random_states(seed: u64) -> impl Iterator<Item = ContactPatchState> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..SAMPLES).map(move |_| ContactPatchState {
        normal_force: rng.gen_range(0.0..10_000.0),
        slip_ratio: rng.gen_range(-5.0..5.0),
        slip_angle: rng.gen_range(-3.0..3.0),
        friction_coefficient: rng.gen_range(0.0..=1.0),
    })
}

#[test]
fn no_force_without_load_or_friction() {
    let cal = default_calibration();

    for state in random_states(1) {
        let no_load = evaluate_force(&cal, 0.0, state.slip_ratio, state.slip_angle, 1.0).unwrap();
        assert_eq!(no_load, ForceResult::ZERO);

        let no_friction = evaluate_force(
            &cal,
            state.normal_force,
            state.slip_ratio,
            state.slip_angle,
            0.0,
        )
        .unwrap();
        assert_eq!(no_friction, ForceResult::ZERO);
    }
}

#[test]
fn unshifted_curve_is_odd() {
    let model = TireForceModel::default();

    for state in random_states(2) {
        let ContactPatchState {
            normal_force,
            slip_ratio,
            slip_angle,
            friction_coefficient,
        } = state;

        let fwd = model
            .force(normal_force, slip_ratio, 0.0, friction_coefficient)
            .unwrap();
        let rev = model
            .force(normal_force, -slip_ratio, 0.0, friction_coefficient)
            .unwrap();
        assert_abs_diff_eq!(fwd.fx, -rev.fx, epsilon = 1e-9);

        let left = model
            .force(normal_force, 0.0, slip_angle, friction_coefficient)
            .unwrap();
        let right = model
            .force(normal_force, 0.0, -slip_angle, friction_coefficient)
            .unwrap();
        assert_abs_diff_eq!(left.fy, -right.fy, epsilon = 1e-9);
    }
}

#[test]
fn peak_slip_lands_near_curve_maximum() {
    let cal = default_calibration();
    let model = TireForceModel::new(cal);
    let normal_force = 1000.0;
    let steps = 4000;

    let peak_x = cal.longitudinal().peak_slip;
    let max_fx = (0..=steps)
        .map(|i| 2.0 * peak_x * i as f64 / steps as f64)
        .map(|r| r64(model.force(normal_force, r, 0.0, 1.0).unwrap().fx.abs()))
        .max()
        .unwrap()
        .raw();
    let at_peak_x = model.force(normal_force, peak_x, 0.0, 1.0).unwrap().fx.abs();
    assert!(at_peak_x <= max_fx);
    // The reference longitudinal curve peaks near slip 0.236 and reaches about
    // 90.5% of its maximum at peak_slip_x.
    assert!(at_peak_x >= 0.9 * max_fx, "{at_peak_x} vs {max_fx}");

    let peak_y = cal.lateral().peak_slip;
    let max_fy = (0..=steps)
        .map(|i| 2.0 * peak_y * i as f64 / steps as f64)
        .map(|a| r64(model.force(normal_force, 0.0, a, 1.0).unwrap().fy.abs()))
        .max()
        .unwrap()
        .raw();
    let at_peak_y = model.force(normal_force, 0.0, peak_y, 1.0).unwrap().fy.abs();
    assert!(at_peak_y <= max_fy);
    assert!(at_peak_y >= 0.98 * max_fy, "{at_peak_y} vs {max_fy}");
}

#[test]
fn force_scales_linearly_with_load() {
    let model = TireForceModel::default();

    for state in random_states(3) {
        let single = model.force_at(&state).unwrap();
        let double = model
            .force_at(&ContactPatchState {
                normal_force: 2.0 * state.normal_force,
                ..state
            })
            .unwrap();

        assert_relative_eq!(double.fx, 2.0 * single.fx, max_relative = 1e-12);
        assert_relative_eq!(double.fy, 2.0 * single.fy, max_relative = 1e-12);
    }
}

#[test]
fn force_never_exceeds_scaled_peak() {
    let init = TireCalibrationInit {
        svx: 0.03,
        svy: -0.05,
        shx: 0.1,
        shy: -0.02,
        ..TireCalibrationInit::default()
    };
    let cal = init.build().unwrap();
    let model = TireForceModel::new(cal);

    for state in random_states(4) {
        let force = model.force_at(&state).unwrap();
        let grip = state.normal_force * state.friction_coefficient;
        let x = cal.longitudinal();
        let y = cal.lateral();

        assert!(force.fx.abs() <= (x.peak.abs() + x.vertical_shift.abs()) * grip + 1e-9);
        assert!(force.fy.abs() <= (y.peak.abs() + y.vertical_shift.abs()) * grip + 1e-9);
    }
}

#[test]
fn finite_for_wild_slip() {
    let model = TireForceModel::default();

    for slip in [1e6, -1e6, 1e150, -1e300, f64::MAX, f64::MIN_POSITIVE] {
        let force = model.force(3000.0, slip, slip, 1.0).unwrap();
        assert!(force.fx.is_finite() && force.fy.is_finite());
    }
}

#[test]
fn reference_fixture() {
    let force = evaluate_force(&default_calibration(), 1000.0, 0.1, 0.05, 1.0).unwrap();
    let (fx, fy): (f64, f64) = force.into();

    assert_abs_diff_eq!(fx, 768.6213982176083, epsilon = 1e-4);
    assert_abs_diff_eq!(fy, 850.0287510531331, epsilon = 1e-4);
}

#[test]
fn evaluation_is_repeatable() {
    let cal = default_calibration();
    let first = evaluate_force(&cal, 2500.0, -0.37, 0.21, 0.8).unwrap();
    let second = evaluate_force(&cal, 2500.0, -0.37, 0.21, 0.8).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_peak_slip_is_rejected() {
    let err = TireCalibration::new(
        1.9, 9.0, 1.65, 1.36, 1.1, 1.0, -1.0, 0.96, 0.0, 0.0, 0.0, 0.0, 0.0, 0.34907,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        TireError::InvalidCalibration {
            field: "peak_slip_x",
            ..
        }
    ));
}

#[test]
fn shared_calibration_across_threads() {
    let model = TireForceModel::default();
    let states: Vec<_> = random_states(5).take(64).collect();
    let expected: Vec<_> = states
        .iter()
        .map(|state| model.force_at(state).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    states
                        .iter()
                        .map(|state| model.force_at(state).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn wheel_kinematics_drive_the_model() {
    let model = TireForceModel::default();
    let effective_radius = 0.3;
    let front_left = slip::Vector2::new(1.4, 0.75);
    let hub = slip::hub_velocity(slip::Vector2::new(15.0, 0.5), 0.2, front_left);

    let braking = slip::wheel_slip(hub, 40.0, effective_radius, 0.05);
    let force = model.force(4000.0, braking.x, braking.y, 0.9).unwrap();

    assert!(braking.x < 0.0);
    assert!(force.fx < 0.0);
    assert!(slip::reaction_torque(force, effective_radius) > 0.0);
}

#[cfg(feature = "serde")]
#[test]
fn calibration_loads_from_json() {
    let json = serde_json::to_string(&TireCalibrationInit::default()).unwrap();
    let init: TireCalibrationInit = serde_json::from_str(&json).unwrap();
    assert_eq!(init.build().unwrap(), default_calibration());

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["peak_slip_y"] = serde_json::json!(0.0);
    let init: TireCalibrationInit = serde_json::from_value(value).unwrap();
    assert!(init.build().is_err());
}
