use anyhow::Context;
use clap::Parser;
use nimbus::VisualizerConfig;

/// Weather-driven particle backdrop
#[derive(Parser, Debug)]
#[command(name = "nimbus")]
#[command(about = "Particle backdrop that follows the weather", long_about = None)]
struct Args {
    /// Initial weather condition, e.g. "light rain" or "scattered clouds"
    condition: Option<String>,

    /// Nominal particle count (clouds use half, clear skies double)
    #[arg(short, long, default_value_t = nimbus::config::DEFAULT_PARTICLE_COUNT)]
    particles: u32,

    /// Animation speed multiplier
    #[arg(short, long, default_value_t = nimbus::config::DEFAULT_ANIMATION_SPEED)]
    speed: f32,

    /// Disable the 3D background entirely
    #[arg(long)]
    disable_3d: bool,

    /// Read further weather conditions from stdin, one per line
    #[arg(long)]
    stdin: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = VisualizerConfig::new()
        .with_enabled(!args.disable_3d)
        .with_particle_count(args.particles)
        .with_animation_speed(args.speed);

    log::info!(
        "Starting with {} particles at speed {} (keys 1-5 switch weather, Esc quits)",
        config.particle_count,
        config.animation_speed
    );

    nimbus::run(config, args.condition, args.stdin)
        .context("weather backdrop failed")
}
