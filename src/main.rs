//! Astro Dodge entry point
//!
//! Headless native runner: the autopilot plays a session at 60 Hz until game
//! over (or a frame cap) and the logging sinks report what happens.
//!
//! Run `astro-dodge --help` for options.

use std::path::PathBuf;
use std::process::ExitCode;

use astro_dodge::consts::FRAME_MS;
use astro_dodge::platform::Autopilot;
use astro_dodge::session::Schedule;
use astro_dodge::{InvincibilityPolicy, Session, Settings};
use clap::{Parser, ValueEnum};

/// Ten minutes of play
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;

#[derive(Parser, Debug)]
#[command(name = "astro-dodge")]
#[command(about = "Headless Astro Dodge runner: the autopilot plays until game over")]
struct Args {
    /// JSON settings file; missing fields fall back to defaults
    settings_path: Option<PathBuf>,
    /// Play with both ships
    #[arg(long, short = '2')]
    two_player: bool,
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    max_frames: u64,
    /// Override the settings' invincibility policy
    #[arg(long, value_enum)]
    policy: Option<CliPolicy>,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliPolicy {
    Move,
    Freeze,
}

impl From<CliPolicy> for InvincibilityPolicy {
    fn from(value: CliPolicy) -> Self {
        match value {
            CliPolicy::Move => InvincibilityPolicy::MoveWhileInvincible,
            CliPolicy::Freeze => InvincibilityPolicy::FreezeWhileInvincible,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Astro Dodge (headless) starting...");

    let args = Args::parse();

    let mut settings = match args.settings_path.as_deref() {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    if let Some(policy) = args.policy {
        settings.invincibility_policy = policy.into();
    }

    if args.dump_settings {
        return match settings.to_json() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to serialize settings: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut builder = Session::builder(settings)
        .two_player(args.two_player)
        .log_sinks();
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let mut session = match builder.build(0.0) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to start session: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut pilot = Autopilot::new();
    let mut now = 0.0;
    for _ in 0..args.max_frames {
        now += FRAME_MS;
        pilot.plan(session.state(), session.settings());
        if session.frame(now, &pilot) == Schedule::Stopped {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "Finished after {} frames ({:.1}s game time), score {}, seed {}",
        state.frame_count,
        session.game_time(now) / 1000.0,
        state.score,
        session.seed()
    );
    println!("score: {}", state.score);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_flags_in_both_forms() {
        let args = Args::try_parse_from([
            "astro-dodge",
            "custom.json",
            "-2",
            "--seed=7",
            "--max-frames",
            "10",
            "--policy",
            "freeze",
        ])
        .unwrap();
        assert_eq!(args.settings_path, Some(PathBuf::from("custom.json")));
        assert!(args.two_player);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.max_frames, 10);
        assert_eq!(
            InvincibilityPolicy::from(args.policy.unwrap()),
            InvincibilityPolicy::FreezeWhileInvincible
        );
    }

    #[test]
    fn test_defaults_and_help() {
        let args = Args::try_parse_from(["astro-dodge"]).unwrap();
        assert!(!args.two_player);
        assert_eq!(args.seed, None);
        assert_eq!(args.max_frames, DEFAULT_MAX_FRAMES);
        assert!(args.policy.is_none());

        let err = Args::try_parse_from(["astro-dodge", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(Args::try_parse_from(["astro-dodge", "--seed", "abc"]).is_err());
    }
}
