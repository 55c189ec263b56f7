use clap::Parser;
use evergreen::{DemoConfig, DemoRunner};
use evergreen_core::Mode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulated duration in seconds
    #[arg(long)]
    seconds: Option<f32>,

    /// Frames per second
    #[arg(long)]
    fps: Option<f32>,

    /// Seconds between toggles between tree and cloud (0 disables)
    #[arg(long)]
    toggle_every: Option<f32>,

    /// Number of particles
    #[arg(long)]
    particles: Option<usize>,

    /// Seed for particle layout and ornament styles
    #[arg(long)]
    seed: Option<u64>,

    /// Smoothing rate in 1/seconds
    #[arg(long)]
    rate: Option<f32>,

    /// Starting mode: shape-a (assembled) or shape-b (scattered)
    #[arg(long)]
    start_mode: Option<Mode>,

    /// RON config file (default: ./evergreen.ron if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a RON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Pace frames in wall-clock time instead of fixed simulated steps
    #[arg(long)]
    realtime: bool,
}

impl Args {
    /// Command-line flags take priority over every config layer
    fn apply(&self, config: &mut DemoConfig) {
        if let Some(seconds) = self.seconds {
            config.run.seconds = seconds;
        }
        if let Some(fps) = self.fps {
            config.run.fps = fps;
        }
        if let Some(toggle_every) = self.toggle_every {
            config.run.toggle_every = toggle_every;
        }
        if let Some(particles) = self.particles {
            config.field.particle_count = particles;
        }
        if let Some(seed) = self.seed {
            config.field.seed = seed;
        }
        if let Some(rate) = self.rate {
            config.field.rate = rate;
        }
        if let Some(mode) = self.start_mode {
            config.field.start_mode = mode;
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = DemoConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    log::info!("Starting Evergreen");

    let runner = DemoRunner::new(&config)?;
    let report = if args.realtime {
        runner.run_realtime()?
    } else {
        runner.run_fixed()?
    };

    if let Some(path) = &args.report {
        report.to_file(path)?;
        log::info!("Wrote run report to {}", path.display());
    }

    Ok(())
}
