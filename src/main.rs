//! Wingjump headless driver
//!
//! Plays a level with a scripted "run right and hop" input at 60 Hz and logs
//! how it ended. Usage: `wingjump [LEVEL] [--tuning FILE] [--seed N]`.

use std::path::PathBuf;

use clap::Parser;
use wingjump::sim::{LevelSession, TickInput, TickOutcome, tick};
use wingjump::{Campaign, Result, Tuning};

/// Command-line arguments for the headless driver
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Campaign level to play
    #[arg(
        value_name = "LEVEL",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    level: u32,
    /// JSON file with tuning overrides
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Session seed
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
}

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Hard stop for the demo loop (five minutes of play)
const MAX_TICKS: u32 = 60 * 60 * 5;

/// Hold right, tap jump every `period` ticks and hold it for a while
fn scripted_input(tick_index: u32) -> TickInput {
    let period = 40;
    let phase = tick_index % period;
    TickInput {
        right: true,
        jump_pressed: phase == 0,
        jump_held: phase < 12,
        elapsed_ms: FRAME_MS,
        ..Default::default()
    }
}

fn play(session: &mut LevelSession) -> (TickOutcome, u32) {
    for i in 0..MAX_TICKS {
        let outcome = tick(session, &scripted_input(i));
        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::BranchChanged { to } => log::info!("Switched to {:?} map", to),
            _ => return (outcome, i + 1),
        }
    }
    (TickOutcome::Continue, MAX_TICKS)
}

fn run(args: CliArgs) -> Result<()> {
    let level_id = args.level;
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut campaign = Campaign::new();
    campaign.close_tutorial();
    let mut session = campaign.start_level(level_id, tuning, args.seed)?;

    let (outcome, ticks) = play(&mut session);
    log::info!(
        "Level {} ended after {} ticks ({:.1}s left): {:?}",
        level_id,
        ticks,
        session.time_remaining_ms() / 1000.0,
        outcome
    );
    log::info!(
        "Player at ({:.0}, {:.0}), {} enemies left",
        session.player.rect.x,
        session.player.rect.y,
        session.world.live_enemies().count()
    );

    if let TickOutcome::Won { secret_completed } = outcome {
        campaign.record_completion(level_id, secret_completed);
        log::info!("Next: {:?}", campaign.next_step(level_id));
    }
    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Wingjump (headless) starting...");

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
