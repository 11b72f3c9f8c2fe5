//! Golf Pixel entry point
//!
//! Loads settings and assets, then runs a self-playing headless session
//! against in-memory backends and logs how it went.

use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use golf_pixel::assets::{AssetManifest, MemoryLoader, ResourceManager};
use golf_pixel::audio::{AudioManager, RecordingSink};
use golf_pixel::consts::WINDOW_TITLE;
use golf_pixel::platform::{self, Autopilot, Clock, RunSummary, Runtime, VirtualClock};
use golf_pixel::renderer::RecordingSurface;
use golf_pixel::{Game, GolfError, Settings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("{} (headless) starting...", WINDOW_TITLE);

    match run_session() {
        Ok(summary) => {
            log::info!(
                "Session over ({:?}): {} rounds, {} bounces, {} frames",
                summary.exit,
                summary.rounds,
                summary.bounces,
                summary.frames
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run_session() -> Result<RunSummary, GolfError> {
    let settings = Settings::load()?;

    let mut manifest = match &settings.asset_manifest {
        Some(path) => AssetManifest::load(path)?,
        None => AssetManifest::default(),
    };
    if let Some(root) = &settings.asset_root {
        manifest = manifest.rooted(root);
    }
    let resources = ResourceManager::acquire(MemoryLoader::new(), &manifest)?;
    log::info!("Loaded {} assets", resources.loader().live_count());

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Game initialized with seed: {}", seed);
    let mut game = Game::with_frame_delay(seed, settings.frame_delay_ms);

    let mut events = Autopilot::from_settings(&settings.autoplay);
    let mut clock = VirtualClock::new();
    let mut surface = RecordingSurface::new();
    let mut audio = AudioManager::from_settings(RecordingSink::default(), &settings);

    let summary = platform::run(
        &mut game,
        Runtime {
            events: &mut events,
            clock: &mut clock,
            surface: &mut surface,
            audio: &mut audio,
            resources: &resources,
            frame_delay: Duration::from_millis(settings.frame_delay_ms),
            max_frames: None,
        },
    );

    log::info!(
        "{} putts, {} sounds, {}ms of play",
        events.shots(),
        audio.sink().played.len(),
        clock.now_ms()
    );
    resources.teardown();
    Ok(summary)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
