//! Property tests for simulation invariants over random input streams

use std::collections::HashSet;

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use siege_survivor::Tuning;
use siege_survivor::sim::{
    DamageOutcome, Difficulty, GamePhase, GameState, Player, TickInput, UpgradeKind, Weapon,
    WeaponKind, draw_choices, tick,
};

fn arb_input() -> impl Strategy<Value = (TickInput, f32)> {
    (
        -2.0f32..2.0,
        -2.0f32..2.0,
        any::<bool>(),
        any::<bool>(),
        0.001f32..0.1,
    )
        .prop_map(|(x, y, dash, shield, dt)| {
            (
                TickInput {
                    movement: Vec2::new(x, y),
                    dash,
                    shield,
                    pause: false,
                },
                dt,
            )
        })
}

fn assert_player_ranges(state: &GameState) {
    let Some(p) = state.player.as_ref() else {
        return;
    };
    assert!(p.health >= 0.0 && p.health <= p.max_health, "health {}", p.health);
    assert!((0.0..=1.0).contains(&p.dash_fuel), "dash {}", p.dash_fuel);
    assert!((0.0..=1.0).contains(&p.shield_charge), "shield {}", p.shield_charge);
    assert!(p.damage_multiplier >= 1.0);
    assert!(p.level >= 1);
    assert!(state.play_area().contains(p.pos));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn resources_stay_in_range(
        seed in any::<u64>(),
        easy in any::<bool>(),
        frames in prop::collection::vec(arb_input(), 1..400),
    ) {
        let mut state = GameState::new(seed);
        let difficulty = if easy { Difficulty::Easy } else { Difficulty::Normal };
        state.start_game(difficulty);

        for (i, (input, dt)) in frames.iter().enumerate() {
            tick(&mut state, input, *dt);
            assert_player_ranges(&state);
            if state.phase == GamePhase::LevelUp {
                prop_assert!(!state.offered_upgrades.is_empty());
                prop_assert!(state.offered_upgrades.len() <= 3);
                match state.offered_upgrades.first().copied() {
                    Some(pick) if i % 2 == 0 => prop_assert!(state.apply_upgrade(pick)),
                    _ => prop_assert!(state.skip_upgrade()),
                }
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn shield_blocks_any_damage(amount in 0.0f32..1000.0) {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default().player);
        prop_assert!(player.try_shield());
        prop_assert_eq!(player.take_damage(amount), DamageOutcome::Shielded);
        prop_assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn dash_without_fuel_changes_nothing(fuel in 0.0f32..0.35) {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default().player);
        player.dash_fuel = fuel;
        prop_assert!(!player.try_dash());
        prop_assert_eq!(player.dash_fuel, fuel);
        prop_assert!(!player.dashing);
    }

    #[test]
    fn upgrade_draw_is_distinct_and_eligible(
        seed in any::<u64>(),
        level in 1u32..20,
        owned in prop::collection::vec(any::<bool>(), 3),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut player = Player::new(Vec2::ZERO, &Tuning::default().player);
        player.level = level;
        for (kind, own) in [WeaponKind::Railgun, WeaponKind::Shotgun, WeaponKind::Laser]
            .into_iter()
            .zip(owned)
        {
            if own {
                player.add_weapon(Weapon::new(kind));
            }
        }

        let eligible = UpgradeKind::POOL
            .into_iter()
            .filter(|u| u.is_eligible(&player))
            .count();
        let choices = draw_choices(&mut rng, &player, 3);
        prop_assert_eq!(choices.len(), eligible.min(3));
        let unique: HashSet<_> = choices.iter().collect();
        prop_assert_eq!(unique.len(), choices.len());
        prop_assert!(choices.iter().all(|u| u.is_eligible(&player)));
    }

    #[test]
    fn restart_always_resets_run(seed in any::<u64>(), seconds in 1u32..30) {
        let mut state = GameState::new(seed);
        state.start_game(Difficulty::Normal);
        for _ in 0..seconds * 10 {
            tick(&mut state, &TickInput::default(), 0.1);
            if state.phase == GamePhase::LevelUp {
                state.skip_upgrade();
            }
        }
        prop_assert!(state.restart_game());
        prop_assert!(state.enemies.is_empty());
        prop_assert!(state.projectiles.is_empty());
        prop_assert!(state.orbs.is_empty());
        prop_assert_eq!((state.score, state.money, state.flags, state.waves.wave), (0, 0, 0, 0));
        prop_assert!(state.ledger.is_empty());
    }
}
