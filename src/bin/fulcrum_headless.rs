//! Headless driver for the rigid-body core.
//!
//! Stands in for the interactive window: the action program replaces the
//! A/D keys, `--reset-every` replaces R. Runs either as fast as possible or
//! paced against the wall clock with the fixed-step accumulator.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use fulcrum::{DrawList, FixedStepper, Shape, Simulator};

#[derive(Parser, Debug)]
#[command(name = "fulcrum_headless")]
#[command(about = "Run a fulcrum scene without a window")]
struct Args {
    /// Scene document to load
    #[arg(default_value = "scenes/fulcrum.json")]
    scene: PathBuf,

    /// RNG seed
    #[arg(long, default_value = "12345")]
    seed: u32,

    /// Physics rate in Hz (60, 120 or 240)
    #[arg(long, default_value = "240")]
    hz: u32,

    /// Number of physics steps to run
    #[arg(long, default_value = "2400")]
    steps: u64,

    /// Constant beam angle command (radians)
    #[arg(long, default_value = "0.0")]
    action: f32,

    /// Sweep the beam sinusoidally with this amplitude instead of a constant
    #[arg(long)]
    sweep: Option<f32>,

    /// Sweep period in seconds
    #[arg(long, default_value = "4.0")]
    period: f32,

    /// Clamp commands to [-limit, limit]
    #[arg(long, default_value = "0.5")]
    limit: f32,

    /// Reset the simulator every N steps
    #[arg(long)]
    reset_every: Option<u64>,

    /// Pace steps against the wall clock
    #[arg(long)]
    realtime: bool,

    /// Log a status line every this many simulated seconds
    #[arg(long, default_value = "1.0")]
    report_every: f32,

    /// Enable velocity arrows in the debug traversal
    #[arg(long)]
    show_velocity: bool,

    /// Retain contacts for the debug traversal
    #[arg(long)]
    show_contacts: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !matches!(args.hz, 60 | 120 | 240) {
        bail!("unsupported rate {} Hz (expected 60, 120 or 240)", args.hz);
    }
    let dt = 1.0 / args.hz as f32;

    let mut sim = Simulator::create(&args.scene, args.seed, dt)
        .with_context(|| format!("failed to create simulator from {}", args.scene.display()))?;
    apply_debug_flags(&mut sim, &args);

    let report_interval = ((args.report_every / dt).round() as u64).max(1);
    let mut draw = DrawList::new();
    let mut step = 0u64;

    if args.realtime {
        let mut stepper = FixedStepper::new(dt);
        let mut last = Instant::now();
        while step < args.steps {
            let now = Instant::now();
            let due = stepper.advance(now.duration_since(last).as_secs_f32());
            last = now;
            for _ in 0..due {
                if step >= args.steps {
                    break;
                }
                run_step(&mut sim, &args, step, dt)?;
                step += 1;
                if step % report_interval == 0 {
                    report(&sim, &mut draw, step);
                }
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    } else {
        while step < args.steps {
            run_step(&mut sim, &args, step, dt)?;
            step += 1;
            if step % report_interval == 0 {
                report(&sim, &mut draw, step);
            }
        }
    }

    print_bodies(&sim);
    Ok(())
}

fn run_step(sim: &mut Simulator, args: &Args, step: u64, dt: f32) -> Result<()> {
    if let Some(every) = args.reset_every {
        if step > 0 && step % every == 0 {
            sim.reset().context("reset failed")?;
            apply_debug_flags(sim, args);
            log::info!("reset at step {}", step);
        }
    }
    let t = sim.steps() as f32 * dt;
    let command = match args.sweep {
        Some(amplitude) => amplitude * (std::f32::consts::TAU * t / args.period).sin(),
        None => args.action,
    };
    sim.step(command.clamp(-args.limit, args.limit));
    Ok(())
}

fn apply_debug_flags(sim: &mut Simulator, args: &Args) {
    let world = sim.world_mut();
    world.debug.show_velocity = args.show_velocity;
    world.debug.show_contacts = args.show_contacts;
}

fn report(sim: &Simulator, draw: &mut DrawList, step: u64) {
    let stats = sim.world().last_stats();
    draw.clear();
    sim.world().render_debug(draw);
    let actuator = sim.actuator();
    match sim.observe() {
        Some(obs) => log::info!(
            "step {:>6} | angle {:+.4} rad ({:+.1} deg) | ang vel {:+.4} rad/s | ball {:+8.2} px @ {:+8.2} px/s | contacts {} | draw cmds {}",
            step,
            actuator.angle,
            actuator.angle.to_degrees(),
            actuator.angular_velocity,
            obs.ball_offset,
            obs.ball_velocity,
            stats.contacts,
            draw.cmds.len()
        ),
        None => log::info!(
            "step {:>6} | {} bodies | contacts {} | clamped {} | draw cmds {}",
            step,
            stats.bodies,
            stats.contacts,
            stats.clamped,
            draw.cmds.len()
        ),
    }
}

fn print_bodies(sim: &Simulator) {
    println!("{:>4} {:>7} {:>10} {:>10} {:>10} {:>10} {:>8}", "idx", "shape", "x", "y", "vx", "vy", "angle");
    for (i, b) in sim.world().bodies().iter().enumerate() {
        let shape = match b.shape {
            Shape::Circle { .. } => "circle",
            Shape::Rect { .. } => "rect",
        };
        println!(
            "{:>4} {:>7} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8.4}",
            i, shape, b.position.x, b.position.y, b.velocity.x, b.velocity.y, b.angle
        );
    }
}
