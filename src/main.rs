//! Spritewell main entry point.
//!
//! A headless 2D sprite sandbox written in Rust using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **image** for decoding sprite sheets and generating placeholder art
//!
//! This executable generates throwaway sprite sheets in a temp directory,
//! loads them through the asset store, registers animation atlases against
//! them, and runs one of two toy game variants for a fixed number of ticks,
//! reporting the draw queue the sprite systems produce.
//!
//! # Project Structure
//!
//! - [`spritewell::atlas`] – Animation atlas model and sheet-geometry baking
//! - [`spritewell::components`] – ECS components (position, sprite, animation, etc.)
//! - [`spritewell::games`] – Game variants (snake, shooter) with their events
//! - [`spritewell::resources`] – ECS resources (asset store, render queue, config, time)
//! - [`spritewell::systems`] – ECS systems (movement, animation, sprite queue)
//!
//! # Main Loop
//!
//! 1. Load configuration and build the sprite sheets + asset store
//! 2. Create the ECS world, insert resources, run the variant's setup
//! 3. Register observers and systems
//! 4. Run the fixed-tick loop:
//!    - Advance world time by the configured tick delta
//!    - Step the game variant, movement, and animation
//!    - Collect visible sprites into the ordered draw queue
//! 5. Report the final queue and session state, then release assets
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --game snake --ticks 120
//! ```

use spritewell::atlas::Atlas;
use spritewell::blackboard::Blackboard;
use spritewell::components::animation::Animation;
use spritewell::components::mapposition::MapPosition;
use spritewell::components::sprite::Sprite;
use spritewell::components::zindex::ZIndex;
use spritewell::games::shooter;
use spritewell::games::shooter::Ship;
use spritewell::games::shooter::spawn_gun_system;
use spritewell::games::snake;
use spritewell::games::snake::{Direction, Snake, SnakeSession, snake_step};
use spritewell::resources::assetstore::AssetStore;
use spritewell::resources::renderqueue::RenderQueue;
use spritewell::resources::sandboxconfig::SandboxConfig;
use spritewell::resources::worldtime::WorldTime;
use spritewell::systems::animation::animation;
use spritewell::systems::movement::movement_system;
use spritewell::systems::spritequeue::sprite_queue;
use spritewell::systems::time::update_world_time;

use bevy_ecs::prelude::*;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Spritewell sandbox
#[derive(Parser)]
#[command(version,
          about = "Headless sprite sandbox: atlas baking, frame resolution and two toy game variants.")]
struct Cli {
    /// Game variant to run.
    #[arg(long, value_enum, default_value_t = GameArg::Snake)]
    game: GameArg,

    /// Number of fixed simulation ticks to run before reporting.
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    /// Path to the INI configuration file (default: ./sandbox.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameArg {
    Snake,
    Shooter,
}

/// Writes a placeholder sprite sheet: a two-axis gradient so individual
/// frames stay visually distinct when the queue is dumped for inspection.
fn write_sheet(path: &Path, width: u32, height: u32) {
    let sheet = image::RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        image::Rgba([r, g, 128, 255])
    });
    sheet.save(path).expect("Failed to write sprite sheet");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Hello, world! This is the Spritewell sandbox!");

    let mut config = match &cli.config {
        Some(path) => SandboxConfig::with_path(path),
        None => SandboxConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults

    // --------------- Sprite sheets & asset store ---------------
    let sheet_dir = std::env::temp_dir().join("spritewell-demo");
    std::fs::create_dir_all(&sheet_dir).expect("Failed to create sheet directory");
    let ships_path = sheet_dir.join("ships.png");
    let apple_path = sheet_dir.join("apple.png");
    write_sheet(&ships_path, 256, 64);
    write_sheet(&apple_path, 128, 32);

    let mut store = AssetStore::new();
    store
        .load_texture_named(&ships_path, "ships")
        .expect("Failed to load ships sheet");
    store
        .load_texture_named(&apple_path, "apple")
        .expect("Failed to load apple sheet");

    // Ships atlas built through the setter chain: one full-width idle line,
    // one ping-pong thrust line that derives its column count from the sheet.
    let mut ships = Atlas::new("ships");
    ships
        .add_line("idle")
        .expect("Failed to add idle line")
        .set_frames_count(8, false);
    ships
        .add_line("thrust")
        .expect("Failed to add thrust line")
        .set_frame_width(32)
        .set_frames_count(0, true);
    store
        .register_atlas(ships)
        .expect("Failed to register ships atlas");

    // Apple atlas built from a JSON manifest instead.
    let apple = Atlas::from_manifest(
        r#"{
            "name": "apple",
            "lines": [
                { "name": "pulse", "frames_count": 4 }
            ]
        }"#,
    )
    .expect("Failed to parse apple manifest");
    store
        .register_atlas(apple)
        .expect("Failed to register apple atlas");

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(RenderQueue::new());
    world.insert_resource(config.clone());
    world.insert_non_send_resource(store);
    world.insert_non_send_resource(Blackboard::new());

    let mut update = Schedule::default();
    match cli.game {
        GameArg::Snake => {
            snake::setup(&mut world, &config);
            world.resource_mut::<Snake>().set_direction(Direction::Right);
            // Decorative animated apple so the queue exercises both sprite paths.
            world.spawn((
                MapPosition::new(16.0, 16.0),
                Sprite::new("apple"),
                Animation::new("apple", "pulse", 6.0),
                ZIndex(5),
            ));
            update.add_systems(snake_step);
            update.add_systems(movement_system);
            update.add_systems(animation);
            update.add_systems(
                sprite_queue
                    .after(snake_step)
                    .after(movement_system)
                    .after(animation),
            );
        }
        GameArg::Shooter => {
            shooter::setup(&mut world, &config);
            update.add_systems(spawn_gun_system.before(movement_system)); // Before movement so spawned ships move on their first frame
            update.add_systems(movement_system);
            update.add_systems(animation);
            update.add_systems(sprite_queue.after(movement_system).after(animation));
        }
    }

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    let dt = config.tick_delta();
    for _ in 0..cli.ticks {
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }

    // --------------- Report & teardown ---------------
    {
        let queue = world.resource::<RenderQueue>();
        log::info!("final draw queue holds {} command(s)", queue.len());
        for cmd in &queue.commands {
            log::debug!(
                "draw '{}' src={:?} dest={:?} z={}",
                cmd.tex_key,
                cmd.src,
                cmd.dest,
                cmd.z
            );
        }
    }
    match cli.game {
        GameArg::Snake => {
            let length = world.resource::<Snake>().len();
            let session = world
                .non_send_resource::<Blackboard>()
                .get::<SnakeSession>()
                .copied()
                .unwrap_or_default();
            log::info!(
                "snake ran {} tick(s): length {}, score {}, game over: {}",
                cli.ticks,
                length,
                session.score,
                session.game_over
            );
        }
        GameArg::Shooter => {
            let mut ships = world.query::<&Ship>();
            let fleet = ships.iter(&world).count();
            log::info!("shooter ran {} tick(s): fleet size {}", cli.ticks, fleet);
        }
    }
    world.non_send_resource_mut::<AssetStore>().release_all();
}
