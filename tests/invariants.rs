use std::collections::HashSet;

use astro_dodge::Settings;
use astro_dodge::sim::{self, GameEvent, GameState, PlayerId, ShipInput, Steer, TickInput};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const FRAME_MS: f64 = 16.0;

/// Crowded field so collisions actually happen within a short run
fn busy_settings() -> Settings {
    let mut settings = Settings::default();
    settings.asteroid_spawn_frames = 10;
    settings.heart_spawn_frames = 50;
    settings.heart_spawn_chance = 0.5;
    settings
}

fn ship_input() -> impl Strategy<Value = ShipInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(up, down, fire)| ShipInput {
        steer: Steer { up, down },
        fire,
    })
}

fn tick_inputs() -> impl Strategy<Value = Vec<TickInput>> {
    prop::collection::vec(
        (ship_input(), ship_input()).prop_map(|(a, b)| TickInput { ships: [a, b] }),
        200..600,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_ships_stay_on_the_field(seed in any::<u64>(), inputs in tick_inputs(), two_player in any::<bool>()) {
        let settings = busy_settings();
        let mut state = GameState::new(&settings, two_player);
        let mut rng = Pcg32::seed_from_u64(seed);

        for (frame, input) in inputs.iter().enumerate() {
            sim::tick(&mut state, input, frame as f64 * FRAME_MS, &settings, &mut rng);
            for ship in &state.ships {
                prop_assert!(ship.pos.y >= 0.0);
                prop_assert!(ship.pos.y + ship.height <= settings.field_height);
            }
        }
    }

    #[test]
    fn test_dead_ships_never_move(seed in any::<u64>(), inputs in tick_inputs()) {
        let settings = busy_settings();
        let mut state = GameState::new(&settings, true);
        state.ship_mut(PlayerId::Two).lives = 0;
        let mut rng = Pcg32::seed_from_u64(seed);
        let parked = state.ship(PlayerId::Two).pos;

        for (frame, input) in inputs.iter().enumerate() {
            let before: Vec<_> = state.ships.iter().map(|s| (s.is_alive(), s.pos)).collect();
            sim::tick(&mut state, input, frame as f64 * FRAME_MS, &settings, &mut rng);
            for (ship, (alive, pos)) in state.ships.iter().zip(before) {
                if !alive {
                    prop_assert_eq!(ship.pos, pos);
                    prop_assert!(!ship.is_alive());
                }
            }
            prop_assert_eq!(state.ship(PlayerId::Two).lives, 0);
        }
        prop_assert_eq!(state.ship(PlayerId::Two).pos, parked);
        prop_assert!(state.ship(PlayerId::Two).bullets.is_empty());
    }

    #[test]
    fn test_kills_score_once_per_asteroid(seed in any::<u64>(), inputs in tick_inputs()) {
        let settings = busy_settings();
        let mut state = GameState::new(&settings, true);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut kills = 0u64;

        for (frame, input) in inputs.iter().enumerate() {
            let before: HashSet<u32> = state.asteroids.iter().map(|a| a.id).collect();
            sim::tick(&mut state, input, frame as f64 * FRAME_MS, &settings, &mut rng);
            let after: HashSet<u32> = state.asteroids.iter().map(|a| a.id).collect();
            prop_assert_eq!(after.len(), state.asteroids.len(), "asteroid ids must be unique");

            let removed = before.difference(&after).count();
            let killed = state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::AsteroidDestroyed { .. }))
                .count();
            prop_assert!(killed <= removed);
            kills += killed as u64;
        }
        prop_assert_eq!(state.score, kills * settings.asteroid_points);
    }

    #[test]
    fn test_hits_respect_invincibility(seed in any::<u64>(), inputs in tick_inputs()) {
        let settings = busy_settings();
        let mut state = GameState::new(&settings, true);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut last_hit: [Option<f64>; 2] = [None, None];

        for (frame, input) in inputs.iter().enumerate() {
            let now = frame as f64 * FRAME_MS;
            sim::tick(&mut state, input, now, &settings, &mut rng);
            for event in state.drain_events() {
                if let GameEvent::ShipHit { player, .. } = event {
                    if let Some(previous) = last_hit[player.index()] {
                        prop_assert!(now - previous >= settings.invincibility_ms);
                    }
                    last_hit[player.index()] = Some(now);
                }
            }
        }
    }
}
