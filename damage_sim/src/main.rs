//! damage_sim - fire rounds from the ammunition catalog at catalog targets

use clap::{Parser, Subcommand};
use damage_core::config::{
    default_ammo, default_targets, load_ammo_catalog, load_target_catalog, AmmoCatalog, AmmoRound,
    TargetCatalog,
};
use damage_core::{DamageRegistry, TargetState};
use damage_sim::logging::init_logging;
use damage_sim::simulation::{distance_sweep, EngagementSimulation, SimError};
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "damage_sim")]
#[command(about = "Resolve kinetic impacts against armored targets")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ammunition catalog (TOML); the bundled catalog is used when omitted
    #[arg(long, value_name = "PATH", global = true)]
    ammo_file: Option<PathBuf>,

    /// Target catalog (TOML); the bundled catalog is used when omitted
    #[arg(long, value_name = "PATH", global = true)]
    target_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List rounds and targets in the catalogs.
    List,
    /// Fire rounds from a fixed range, committing the target state after every shot.
    Impact {
        #[arg(long)]
        ammo: String,
        #[arg(long)]
        target: String,
        #[arg(long, default_value_t = 0.0)]
        distance: f64,
        #[arg(long, default_value_t = 1)]
        shots: u32,
        #[arg(long, help = "Print the engagement as JSON")]
        json: bool,
    },
    /// First-shot damage as a function of range.
    Sweep {
        #[arg(long)]
        ammo: String,
        #[arg(long)]
        target: String,
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        #[arg(long, default_value_t = 3000.0)]
        to: f64,
        #[arg(long, default_value_t = 250.0)]
        step: f64,
        #[arg(long)]
        json: bool,
    },
    /// Fire from random ranges until the target dies or the rounds run out.
    Volley {
        #[arg(long)]
        ammo: String,
        #[arg(long)]
        target: String,
        #[arg(long, default_value_t = 200.0)]
        min_distance: f64,
        #[arg(long, default_value_t = 2500.0)]
        max_distance: f64,
        #[arg(long, default_value_t = 10)]
        shots: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        json: bool,
    },
}

fn load_catalogs(cli: &Cli) -> Result<(AmmoCatalog, TargetCatalog), SimError> {
    let ammo = match &cli.ammo_file {
        Some(path) => load_ammo_catalog(path)?,
        None => default_ammo(),
    };
    let targets = match &cli.target_file {
        Some(path) => load_target_catalog(path)?,
        None => default_targets(),
    };
    tracing::debug!(rounds = ammo.len(), targets = targets.len(), "catalogs loaded");
    Ok((ammo, targets))
}

fn lookup<'a>(
    ammo: &'a AmmoCatalog,
    targets: &TargetCatalog,
    ammo_id: &str,
    target_id: &str,
) -> Result<(&'a AmmoRound, TargetState), SimError> {
    let round = ammo
        .get(ammo_id)
        .ok_or_else(|| SimError::UnknownAmmo(ammo_id.to_string()))?;
    let target = targets
        .spawn(target_id)
        .ok_or_else(|| SimError::UnknownTarget(target_id.to_string()))?;
    Ok((round, target))
}

fn print_state(label: &str, state: &TargetState) {
    println!(
        "  {:<8} armor {:>8.2}  health {:>8.2}  era {:>8.2}",
        label, state.armor, state.health, state.era_charge
    );
}

fn print_engagement(sim: &EngagementSimulation) {
    print_state("start", &sim.initial_state);
    for record in &sim.shots {
        println!("  #{:<3} {}", record.shot, record.report.summary());
        print_state("", &record.state);
    }
    print_state("end", &sim.final_state);
    println!(
        "  {} shot(s), {:.1} total damage, {:.1} avg, {:.1} armor lost",
        sim.shots.len(),
        sim.total_damage(),
        sim.avg_damage(),
        sim.total_armor_lost()
    );
    match sim.shots_to_kill {
        Some(n) => println!("  destroyed after {} shot(s)", n),
        None => println!("  target survived"),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (ammo, targets) = load_catalogs(&cli)?;
    let registry = DamageRegistry::with_defaults();

    match &cli.command {
        Commands::List => {
            println!("Rounds:");
            for id in ammo.ids() {
                if let Some(round) = ammo.get(id) {
                    let ke = &round.kinetic;
                    println!(
                        "  {:<14} {:<20} power {:>7.1}  friction {:.5}  degradation {:>5.1}",
                        id, round.name, ke.power, ke.friction, ke.degradation
                    );
                }
            }
            println!("Targets:");
            for id in targets.ids() {
                if let Some(profile) = targets.get(id) {
                    let s = &profile.state;
                    println!(
                        "  {:<14} {:<26} armor {:>6.1}  health {:>6.1}  era {:>6.1} x{:.2}",
                        id, profile.name, s.armor, s.health, s.era_charge, s.era_ke_fraction_multiplier
                    );
                }
            }
        }
        Commands::Impact {
            ammo: ammo_id,
            target: target_id,
            distance,
            shots,
            json,
        } => {
            let (round, target) = lookup(&ammo, &targets, ammo_id, target_id)?;
            let sim = EngagementSimulation::fixed_range(&registry, target, round, *distance, *shots)?;
            tracing::info!(round = %round.id, target = %target_id, shots = sim.shots.len(), "engagement resolved");
            if *json {
                print_json(&sim)?;
            } else {
                print_engagement(&sim);
            }
        }
        Commands::Sweep {
            ammo: ammo_id,
            target: target_id,
            from,
            to,
            step,
            json,
        } => {
            let (round, target) = lookup(&ammo, &targets, ammo_id, target_id)?;
            let points = distance_sweep(&registry, target, round, *from, *to, *step)?;
            if *json {
                print_json(&points)?;
            } else {
                println!("  {:>8} {:>10} {:>10} {:>10} {:>10}", "range", "power", "damage", "armor", "health");
                for p in &points {
                    println!(
                        "  {:>8.0} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                        p.distance, p.attenuated_power, p.final_damage, p.armor_after, p.health_after
                    );
                }
            }
        }
        Commands::Volley {
            ammo: ammo_id,
            target: target_id,
            min_distance,
            max_distance,
            shots,
            seed,
            json,
        } => {
            let (round, target) = lookup(&ammo, &targets, ammo_id, target_id)?;
            let mut rng = rand::rngs::StdRng::seed_from_u64(*seed);
            let sim = EngagementSimulation::random_ranges(
                &registry,
                target,
                round,
                *min_distance,
                *max_distance,
                *shots,
                &mut rng,
            )?;
            tracing::info!(seed = *seed, shots_to_kill = ?sim.shots_to_kill, "volley resolved");
            if *json {
                print_json(&sim)?;
            } else {
                print_engagement(&sim);
            }
        }
    }

    Ok(())
}
