use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orrery_render::RenderConfig;
use orrery_sim::{rates, SceneConfig, TimeController};

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Kinematic solar system viewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive 3D view
    Render {
        /// Scene JSON file (built-in solar scene when omitted)
        #[arg(short, long)]
        scene: Option<PathBuf>,
        /// OBJ model used for every body
        #[arg(short, long)]
        mesh: Option<PathBuf>,
        #[arg(long)]
        sun_texture: Option<PathBuf>,
        #[arg(long)]
        planet_texture: Option<PathBuf>,
        /// Simulated time units per real second
        #[arg(short, long, default_value_t = rates::NORMAL)]
        rate: f32,
        #[arg(long, default_value = "900")]
        width: u32,
        #[arg(long, default_value = "900")]
        height: u32,
        /// Start with orbit rings hidden
        #[arg(long)]
        no_orbits: bool,
    },

    /// Step the scene headlessly and print body positions
    Simulate {
        #[arg(short, long)]
        scene: Option<PathBuf>,
        #[arg(short, long, default_value_t = rates::NORMAL)]
        rate: f32,
        #[arg(short = 'n', long, default_value = "10")]
        steps: usize,
        /// Real seconds per step
        #[arg(long, default_value = "0.1")]
        dt: f32,
    },

    /// Print the built-in scene as JSON
    Scene,
}

fn load_scene(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            mesh,
            sun_texture,
            planet_texture,
            rate,
            width,
            height,
            no_orbits,
        } => {
            let options = RenderConfig {
                scene: load_scene(scene.as_deref())?,
                mesh,
                sun_texture,
                planet_texture,
                rate,
                width,
                height,
                show_orbits: !no_orbits,
            };

            println!("Starting orrery renderer...");
            println!("Controls:");
            println!("{}", orrery_render::CONTROLS);

            orrery_render::run(options)?;
        }

        Commands::Simulate {
            scene,
            rate,
            steps,
            dt,
        } => {
            let scene = load_scene(scene.as_deref())?;
            let mut system = scene.build_system();
            let mut clock = TimeController::with_rate(rate);
            tracing::info!("Simulating {} bodies for {steps} steps", system.body_count());

            for step in 1..=steps {
                system.advance(clock.tick(dt));

                println!("Step {step} (t = {:.2}):", clock.elapsed());
                println!("  {:<12} {:>10} {:>10} {:>10} {:>10}", "Body", "X", "Y", "Z", "Angle");
                for (i, body) in system.bodies().iter().enumerate() {
                    let pos = body.orbit_position();
                    println!(
                        "  {:<12} {:>10.3} {:>10.3} {:>10.3} {:>10.2}",
                        scene.body_name(i),
                        pos.x,
                        pos.y,
                        pos.z,
                        body.orbit_angle
                    );
                }
            }
        }

        Commands::Scene => {
            println!("{}", SceneConfig::default().to_json()?);
        }
    }

    Ok(())
}
