// Disable warning for the crate name, not a really good way to do this but..
// (https://github.com/rust-lang/rust/issues/45127)
#![allow(non_snake_case)]

#[macro_use]
extern crate clap;

use std::ops::RangeInclusive;
use std::str::FromStr;

mod skirmish;

use crate::skirmish::Skirmish;
use clap::ArgEnum;
use itertools::Itertools;
use log::info;
use warband_core::config::{AiConfig, ConfigError};
use warband_core::Preset;
use warband_presets::standard::balanced::Balanced;
use warband_presets::standard::rush::Rush;
use warband_presets::standard::turtle::Turtle;

use crate::clap::Parser;

const PLAYER_RANGE: RangeInclusive<usize> = 2..=8;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Number of computer players
    #[clap(long, short, default_value_t = 2, validator = players_in_range)]
    players: usize,

    /// Match length in seconds
    #[clap(long, short, default_value_t = 600f32, validator = positive_seconds)]
    duration: f32,

    /// Simulation step in seconds
    #[clap(short = 's', long = "step", default_value_t = 0.1f32, validator = positive_seconds)]
    step: f32,

    /// Seed for reproducible matches
    #[clap(long)]
    seed: Option<u64>,

    #[clap(long, arg_enum)]
    preset: Option<PresetKind>,

    /// Give each player the next preset in turn instead of the same one
    #[clap(long)]
    mixed: bool,

    /// Seconds between planning passes
    #[clap(long, validator = positive_seconds)]
    think_interval: Option<f32>,

    #[clap(long)]
    squad_size: Option<usize>,

    /// Chance per second that an attacking unit destroys its target
    #[clap(long, default_value_t = 0.05f32)]
    attrition: f32,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub enum PresetKind {
    Rush,
    Balanced,
    Turtle,
}

impl PresetKind {
    const ALL: [PresetKind; 3] = [PresetKind::Rush, PresetKind::Balanced, PresetKind::Turtle];

    fn preset(self) -> Box<dyn Preset> {
        match self {
            PresetKind::Rush => Box::new(Rush::default()),
            PresetKind::Balanced => Box::new(Balanced::default()),
            PresetKind::Turtle => Box::new(Turtle::default()),
        }
    }
}

fn players_in_range(s: &str) -> Result<(), String> {
    usize::from_str(s)
        .map(|players| PLAYER_RANGE.contains(&players))
        .map_err(|e| e.to_string())
        .and_then(|result| match result {
            true => Ok(()),
            false => Err(format!(
                "Players not in range {}-{}",
                PLAYER_RANGE.start(),
                PLAYER_RANGE.end()
            )),
        })
}

fn positive_seconds(s: &str) -> Result<(), String> {
    f32::from_str(s)
        .map_err(|e| e.to_string())
        .and_then(|seconds| match seconds.is_finite() && seconds > 0f32 {
            true => Ok(()),
            false => Err(format!("{} is not a positive number of seconds", s)),
        })
}

fn player_config(app: &Cli, kind: PresetKind) -> (&'static str, AiConfig) {
    let preset = kind.preset();
    let mut config = preset.config();
    if let Some(think_interval) = app.think_interval {
        config.think_interval = think_interval;
    }
    if let Some(squad_size) = app.squad_size {
        config.squad_size = squad_size;
    }
    (preset.name(), config)
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();
    let app = Cli::parse();
    info!("{} v{}", crate_name!(), crate_version!());
    let first = app.preset.unwrap_or(PresetKind::Balanced);
    let setups = (0..app.players)
        .map(|index| {
            let kind = if app.mixed {
                let start = PresetKind::ALL.iter().position(|k| *k == first).unwrap_or(0);
                PresetKind::ALL[(start + index) % PresetKind::ALL.len()]
            } else {
                first
            };
            player_config(&app, kind)
        })
        .collect_vec();

    let mut skirmish = Skirmish::new(setups, app.seed, app.attrition.max(0f32))?;
    while skirmish.time() < app.duration && !skirmish.is_decided() {
        skirmish.step(app.step);
    }
    info!(
        "Match over at {:.1}s with {} kills",
        skirmish.time(),
        skirmish.kills()
    );

    for player in skirmish.summary() {
        println!(
            "{:?} [{}] {} | units {} squads {} | {}",
            player.player,
            player.preset,
            if player.eliminated { "eliminated" } else { "standing" },
            player.units,
            player.squads,
            [
                ("passes", player.stats.planning_passes),
                ("buildings", player.stats.buildings_placed),
                ("placement misses", player.stats.placement_failures),
                ("units", player.stats.units_enqueued),
                ("attacks", player.stats.attacks_issued),
            ]
            .iter()
            .map(|(name, value)| format!("{} {}", name, value))
            .join(", ")
        );
    }
    Ok(())
}
