//! Light Cycle headless runner
//!
//! Plays bot-driven rounds with the fixed-timestep loop and reports the
//! scoreboard.
//!
//! Usage: `lightcycle [config.json] [rounds] [seed]`

use lightcycle::ArenaConfig;
use lightcycle::consts::*;
use lightcycle::sim::{Autopilot, GameEvent, GameState, RoundPhase, TickInput, tick};

/// Frame rate the host loop pretends to render at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Simulated seconds before a stalemate round is abandoned
const MAX_ROUND_SECS: f32 = 300.0;

/// Game instance holding all state
struct Game {
    state: GameState,
    autopilot: Autopilot,
    input: TickInput,
    accumulator: f32,
}

impl Game {
    fn new(config: ArenaConfig, seed: u64) -> Self {
        let ids = config.players.iter().map(|p| p.id).collect();
        let count = config.player_count();
        Self {
            state: GameState::new(config),
            autopilot: Autopilot::new(seed, ids),
            input: TickInput::new(count),
            accumulator: 0.0,
        }
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.autopilot.fill_input(&self.state, &mut self.input);
            for event in tick(&mut self.state, &self.input, SIM_DT) {
                report(&event);
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Play until the arbiter decides the round
    fn play_round(&mut self) {
        while self.state.phase == RoundPhase::Active {
            if self.state.sim_time > MAX_ROUND_SECS {
                log::warn!("Round {} timed out", self.state.round);
                return;
            }
            self.update(FRAME_DT);
        }
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::PlayerEliminated { .. } | GameEvent::RoundEnded { .. } => {
            log::info!("{:?}", event)
        }
        _ => log::trace!("{:?}", event),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) => match ArenaConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => ArenaConfig::default(),
    };
    let rounds: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0x5eed);

    log::info!("Light Cycle starting ({} rounds, seed {})", rounds, seed);
    let mut game = Game::new(config, seed);
    if let Err(e) = game.state.start_round() {
        log::error!("Cannot start: {}", e);
        std::process::exit(1);
    }

    for round in 1..=rounds {
        game.play_round();
        if round < rounds {
            game.state.reset_round();
        }
    }

    match serde_json::to_string_pretty(&game.state.scoreboard) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize scoreboard: {}", e),
    }
}
