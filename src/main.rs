//! Hardcore Sim - Entry Point
//!
//! Spawns a handful of players with random skills, then runs rounds of
//! deaths and PvP kills through the hardcore rules and settles the results.

use std::path::PathBuf;

use clap::Parser;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use hardcore_mode::core::config::{HardcoreConfig, ReloadableConfig};
use hardcore_mode::core::error::Result;
use hardcore_mode::core::types::Player;
use hardcore_mode::events::EventDispatcher;
use hardcore_mode::hardcore::{settle_event, HardcoreManager, PenaltyOutcome};
use hardcore_mode::notify::TracingNotifier;
use hardcore_mode::skills::{InMemoryProfiles, PlayerProfile, SkillType};
use hardcore_mode::zones::NoZoneIntegration;

#[derive(Parser, Debug)]
#[command(name = "hardcore-sim", about = "Simulate hardcore death penalties and vampirism")]
struct Args {
    /// Hardcore config file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 6)]
    players: usize,

    #[arg(short, long, default_value_t = 20)]
    rounds: usize,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    deaths: usize,
    kills: usize,
    levels_lost: i64,
    levels_stolen: i64,
    skipped: usize,
    cancelled: usize,
    power_levels: Vec<(String, i32)>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("hardcore_mode=debug,hardcore_sim=info")
        .init();

    let args = Args::parse();

    // Read the config once up front; defaults apply without a file
    let config = match &args.config {
        Some(path) => {
            let file = ReloadableConfig::open(path)?;
            tracing::info!("Using hardcore config {}", file.path().display());
            file.snapshot()
        }
        None => HardcoreConfig::default(),
    };
    tracing::info!("Hardcore sim starting with {} players", args.players);

    // Spawn players with random skill levels
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let players = spawn_players(&mut rng, args.players);
    let mut profiles = InMemoryProfiles::new();
    for player in &players {
        profiles.insert(player.id, random_profile(&mut rng));
    }

    // No region plugin in the sim, so every zone is hardcore
    let zones = NoZoneIntegration;
    let events = EventDispatcher::new();
    let notifier = TracingNotifier;
    let mut summary = Summary::default();

    // Main loop: one death or kill per round
    for round in 0..args.rounds {
        let outcome = {
            let manager =
                HardcoreManager::new(&zones, &config, &profiles, &config, &events, &notifier);
            if round == 0 {
                tracing::info!(
                    "Stat loss enabled: {}, vampirism enabled: {}",
                    manager.is_stat_loss_enabled(),
                    manager.is_vampirism_enabled()
                );
            }

            // Pick two distinct players
            let mut picks = players.choose_multiple(&mut rng, 2);
            let (Some(victim), Some(killer)) = (picks.next(), picks.next()) else {
                tracing::warn!("Need at least two players to simulate");
                break;
            };

            // Coin flip between a PvP kill and a plain death
            if rng.gen_bool(0.5) {
                summary.kills += 1;
                let outcome = manager.apply_vampirism(killer, victim);
                if let PenaltyOutcome::Applied { total_levels, .. } = &outcome {
                    summary.levels_stolen += i64::from(*total_levels);
                }
                outcome
            } else {
                summary.deaths += 1;
                let outcome = manager.apply_death_penalty(victim);
                if let PenaltyOutcome::Applied { total_levels, .. } = &outcome {
                    summary.levels_lost += i64::from(*total_levels);
                }
                outcome
            }
        };

        // Tally what happened
        match outcome {
            PenaltyOutcome::Skipped(_) => summary.skipped += 1,
            PenaltyOutcome::Cancelled => summary.cancelled += 1,
            PenaltyOutcome::Applied { .. } => {}
        }

        // Settle accepted events now that the manager no longer borrows the profiles
        for event in events.drain_accepted() {
            if !settle_event(&mut profiles, &event) {
                tracing::warn!("Dropped event for a player who logged out");
            }
        }
    }

    // Final power levels
    summary.power_levels = players
        .iter()
        .map(|p| {
            let power = profiles.get(p.id).map_or(0, PlayerProfile::power_level);
            (p.name.clone(), power)
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn spawn_players(rng: &mut ChaCha8Rng, count: usize) -> Vec<Player> {
    let names = ["Steve", "Alex", "Notch", "Jeb", "Dinnerbone", "Grumm", "Herobrine", "Kai"];
    (0..count)
        .map(|i| {
            let base = names.choose(rng).copied().unwrap_or("Player");
            Player::new(format!("{base}{i}"))
        })
        .collect()
}

fn random_profile(rng: &mut ChaCha8Rng) -> PlayerProfile {
    let mut profile = PlayerProfile::new();
    for skill in SkillType::PRIMARY {
        profile.set_level(skill, rng.gen_range(0..=1000));
        profile.set_experience(skill, f64::from(rng.gen_range(0..2000i32)));
    }
    profile
}

fn print_summary(summary: &Summary) {
    println!("\n=== HARDCORE SIM ===");
    println!("Deaths: {}  Kills: {}", summary.deaths, summary.kills);
    println!("Levels lost on death: {}", summary.levels_lost);
    println!("Levels stolen by killers: {}", summary.levels_stolen);
    println!(
        "Skipped: {}  Cancelled: {}",
        summary.skipped, summary.cancelled
    );
    println!();
    println!("Power levels:");
    for (name, power) in &summary.power_levels {
        println!("  {:<14} {}", name, power);
    }
}
