use std::f32::consts::TAU;

use itertools::Itertools;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use warband_core::config::{AiConfig, ConfigError};
use warband_core::director::AIDirector;
use warband_core::sandbox::Sandbox;
use warband_core::world::*;
use warband_core::DirectorStats;
use warband_presets::standard::{catalog, HARVESTER, HEADQUARTERS};

pub struct PlayerSummary {
    pub player: PlayerId,
    pub preset: &'static str,
    pub eliminated: bool,
    pub units: usize,
    pub squads: usize,
    pub stats: DirectorStats,
}

pub struct Skirmish {
    sandbox: Sandbox,
    directors: Vec<AIDirector>,
    presets: Vec<&'static str>,
    rng: StdRng,
    attrition: f32,
    kills: usize,
}

impl Skirmish {
    const MAP_SIZE: f32 = 256f32;
    const START_RADIUS: f32 = 90f32;
    const START_HARVESTERS: usize = 2;

    pub fn new(
        setups: Vec<(&'static str, AiConfig)>,
        seed: Option<u64>,
        attrition: f32,
    ) -> Result<Self, ConfigError> {
        let mut sandbox = Sandbox::new(catalog(), Self::MAP_SIZE);
        let mut directors = vec![];
        let mut presets = vec![];
        let count = setups.len().max(1);
        for (index, (preset, config)) in setups.into_iter().enumerate() {
            let mut director = AIDirector::new(&config)?;
            if let Some(seed) = seed {
                director = director.with_seed(seed.wrapping_add(index as u64 + 1));
            }
            let player = sandbox.add_player();
            let angle = TAU * index as f32 / count as f32;
            let home = Point2::new(
                Self::MAP_SIZE / 2f32 + angle.cos() * Self::START_RADIUS,
                Self::MAP_SIZE / 2f32 + angle.sin() * Self::START_RADIUS,
            );
            sandbox.spawn(HEADQUARTERS, player, home);
            for offset in 0..Self::START_HARVESTERS {
                sandbox.spawn(
                    HARVESTER,
                    player,
                    home + Point2::new(5f32 + offset as f32, 5f32),
                );
            }
            director.bind(&sandbox, player);
            info!("{:?} plays {} from {:?}", player, preset, home);
            directors.push(director);
            presets.push(preset);
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut skirmish = Self {
            sandbox,
            directors,
            presets,
            rng,
            attrition,
            kills: 0,
        };
        skirmish.forward_events();
        Ok(skirmish)
    }

    pub fn time(&self) -> f32 {
        self.sandbox.match_time()
    }

    pub fn kills(&self) -> usize {
        self.kills
    }

    pub fn is_decided(&self) -> bool {
        self.sandbox
            .players()
            .iter()
            .filter(|p| !self.sandbox.is_eliminated(**p))
            .count()
            <= 1
    }

    pub fn step(&mut self, delta: f32) {
        self.sandbox.step(delta);
        self.resolve_attacks(delta);
        self.forward_events();
        for director in self.directors.iter_mut() {
            director.tick(&mut self.sandbox, delta);
        }
    }

    fn forward_events(&mut self) {
        for event in self.sandbox.drain_events() {
            for director in self.directors.iter_mut() {
                director.on_event(&self.sandbox, &event);
            }
        }
    }

    /// Every attacker has a small chance per second to take out its target.
    fn resolve_attacks(&mut self, delta: f32) {
        let chance = (self.attrition * delta).clamp(0f32, 1f32);
        let mut doomed = vec![];
        for player in self.sandbox.players() {
            for unit in self.sandbox.units_of(player) {
                let target = self.sandbox.orders_of(unit).iter().find_map(|o| match o {
                    Order::Attack {
                        target: Some(target),
                        ..
                    } if self.sandbox.exists(*target) => Some(*target),
                    _ => None,
                });
                if let Some(target) = target {
                    if self.rng.gen_bool(chance as f64) {
                        doomed.push((unit, target));
                    }
                }
            }
        }
        for (attacker, target) in doomed.into_iter().unique_by(|(_, t)| *t) {
            if self.sandbox.destroy(target) {
                debug!("{:?} destroyed {:?}", attacker, target);
                self.kills += 1;
            }
        }
    }

    pub fn summary(&self) -> Vec<PlayerSummary> {
        self.directors
            .iter()
            .zip(self.presets.iter())
            .filter_map(|(director, preset)| {
                let player = director.player()?;
                Some(PlayerSummary {
                    player,
                    preset: *preset,
                    eliminated: self.sandbox.is_eliminated(player),
                    units: self.sandbox.units_of(player).len(),
                    squads: director.squads().map_or(0, |s| s.len()),
                    stats: director.stats(),
                })
            })
            .collect_vec()
    }
}
