#![deny(unsafe_code)]
//! CLI binary for landing-fx.
//!
//! Subcommands:
//! - `render [effect]`: run an effect N frames, write the last frame as PNG
//! - `list`: print available effects (with parameter schemas under `--json`)
//! - `typing`: print the headline typing sequence

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use landing_fx_core::frame_loop::{tick, LoopHandle};
use landing_fx_core::{Effect, Recorder, Rgba, Scene, Viewport, Xorshift64};
use landing_fx_effects::EffectKind;
use landing_fx_page::Typewriter;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "landing-fx", about = "Landing page animation renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an effect for N frames and write the last one as PNG.
    Render {
        /// Effect name ("network" or "tree"). Not needed with --scene.
        effect: Option<String>,

        /// Replay a scene JSON file instead of the flags below.
        #[arg(long, conflicts_with = "effect")]
        scene: Option<PathBuf>,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280.0)]
        width: f64,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 720.0)]
        height: f64,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Effect parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Page background behind the canvas.
        #[arg(short, long, default_value = "#0b0f19")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,

        /// Also write the last frame's draw commands as JSON.
        #[arg(long)]
        commands: Option<PathBuf>,
    },
    /// List available effects.
    List,
    /// Print the typing headline sequence.
    Typing {
        /// Number of ticks to print.
        #[arg(short, long, default_value_t = 40)]
        ticks: usize,

        /// Typing parameters (words, type_ms, delete_ms, hold_ms) as JSON.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

/// What a render produced.
struct RenderReport {
    effect: String,
    viewport: Viewport,
    frames: usize,
    seed: u64,
}

/// Runs `scene` offline and writes the final frame.
fn render_scene(
    scene: &Scene,
    background: Rgba,
    output: &Path,
    commands_out: Option<&Path>,
) -> Result<RenderReport, CliError> {
    let mut rng = Xorshift64::new(scene.seed);
    let mut effect =
        EffectKind::from_name(&scene.effect, scene.viewport()?, &scene.params, &mut rng)?;
    let mut surface = Recorder::new();
    let handle = LoopHandle::new();

    let mut drawn = 0;
    for _ in 0..scene.frames {
        let again = tick(&mut effect, &mut surface, &mut rng, &handle)?;
        surface.retain_last_frame();
        drawn += 1;
        if !again {
            break;
        }
    }
    log::info!("{} ran {drawn} frames", scene.effect);

    let viewport = effect.viewport();
    landing_fx_effects::snapshot::write_png(surface.last_frame(), viewport, background, output)?;
    if let Some(path) = commands_out {
        std::fs::write(path, serde_json::to_string_pretty(surface.last_frame())?)?;
    }

    Ok(RenderReport {
        effect: scene.effect.clone(),
        viewport,
        frames: drawn,
        seed: scene.seed,
    })
}

fn parse_params(raw: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn load_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid scene {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let names = EffectKind::list_effects();
            if cli.json {
                let mut rng = Xorshift64::new(1);
                let viewport = Viewport::new(800.0, 600.0)?;
                let mut effects = serde_json::Map::new();
                for name in names {
                    let effect =
                        EffectKind::from_name(name, viewport, &serde_json::json!({}), &mut rng)?;
                    effects.insert((*name).to_string(), effect.param_schema());
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "effects": effects }))?
                );
            } else {
                println!("Effects:");
                for name in names {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            effect,
            scene,
            width,
            height,
            frames,
            seed,
            params,
            background,
            output,
            commands,
        } => {
            let scene = match (scene, effect) {
                (Some(path), _) => load_scene(&path)?,
                (None, Some(name)) => {
                    let mut s = Scene::new(&name, width, height, seed);
                    s.params = parse_params(&params)?;
                    s.frames = frames;
                    s
                }
                (None, None) => {
                    return Err(CliError::Input(
                        "render needs an effect name or --scene".into(),
                    ))
                }
            };
            let background = Rgba::from_hex(&background)?;
            let report = render_scene(&scene, background, &output, commands.as_deref())?;

            if cli.json {
                let info = serde_json::json!({
                    "effect": report.effect,
                    "width": report.viewport.width,
                    "height": report.viewport.height,
                    "frames": report.frames,
                    "seed": report.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} frames, seed {}) -> {}",
                    report.effect,
                    report.viewport.width,
                    report.viewport.height,
                    report.frames,
                    report.seed,
                    output.display()
                );
            }
        }
        Command::Typing { ticks, params } => {
            let mut writer = Typewriter::from_json(&parse_params(&params)?)?;
            let sequence: Vec<_> = (0..ticks).map(|_| writer.tick()).collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&sequence)?);
            } else {
                for t in &sequence {
                    println!("{:>5}ms  {}", t.delay_ms, t.text);
                }
            }
        }
    }

    Ok(())
}

fn log_spec(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let _logger = flexi_logger::Logger::try_with_env_or_str(log_spec(cli.verbose))
        .and_then(|logger| logger.start())
        .map_err(|e| eprintln!("warning: logging disabled: {e}"))
        .ok();

    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
