use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use magic_tire::{Axis, TireCalibrationInit, TireForceModel};
use noisy_float::types::r64;

#[derive(Clone, Copy, ValueEnum)]
enum Sweep {
    Ratio,
    Angle,
}

/// Prints a force-vs-slip sweep of the reference tire as CSV.
#[derive(Parser)]
struct Opts {
    #[clap(value_enum, default_value = "ratio")]
    pub sweep: Sweep,
    #[clap(long, default_value = "4000.0")]
    pub normal_force: f64,
    #[clap(long, default_value = "1.0")]
    pub friction: f64,
    /// Sweep range in multiples of the axis peak slip.
    #[clap(long, default_value = "3.0")]
    pub range: f64,
    #[clap(long, default_value = "200")]
    pub steps: usize,
    /// Overrides the longitudinal peak slip of the reference calibration.
    #[clap(long)]
    pub peak_slip_x: Option<f64>,
}

fn main() -> Result<()> {
    let Opts {
        sweep,
        normal_force,
        friction,
        range,
        steps,
        peak_slip_x,
    } = Opts::parse();
    ensure!(steps > 0, "steps must be positive");

    let defaults = TireCalibrationInit::default();
    let init = TireCalibrationInit {
        peak_slip_x: peak_slip_x.unwrap_or(defaults.peak_slip_x),
        ..defaults
    };
    let model = TireForceModel::new(init.build()?);

    let axis = match sweep {
        Sweep::Ratio => Axis::Longitudinal,
        Sweep::Angle => Axis::Lateral,
    };
    let limit = range * model.calibration().axis(axis).peak_slip;

    let mut samples = Vec::with_capacity(steps + 1);
    println!("slip,fx,fy");

    for i in 0..=steps {
        let slip = -limit + 2.0 * limit * i as f64 / steps as f64;
        let force = match sweep {
            Sweep::Ratio => model.force(normal_force, slip, 0.0, friction)?,
            Sweep::Angle => model.force(normal_force, 0.0, slip, friction)?,
        };
        println!("{slip},{},{}", force.fx, force.fy);
        samples.push((slip, force.magnitude()));
    }

    let (peak_at, peak) = samples
        .into_iter()
        .max_by_key(|&(_, magnitude)| r64(magnitude))
        .unwrap_or_default();
    eprintln!("peak force {peak:.1} at slip {peak_at:.4}");

    Ok(())
}
