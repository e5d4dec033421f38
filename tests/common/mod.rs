//! Shared fixtures: a synthetic card set shaped like the tabletop one.

#![allow(dead_code)]

use splendor_engine::cards::{CardRecord, DevelopmentCard, PatronRecord, Tier};
use splendor_engine::core::{Color, GameConfig, TokenPool};
use splendor_engine::rules::{GameBuilder, TurnController};

fn record(costs: [u8; 5], points: u8, bonus: Color) -> CardRecord {
    CardRecord {
        red: costs[0],
        green: costs[1],
        blue: costs[2],
        white: costs[3],
        black: costs[4],
        points,
        bonus: Some(bonus),
    }
}

/// 40 / 30 / 20 cards for tiers one to three. Costs never include the
/// card's own bonus color and grow with the tier.
pub fn tier_records(tier: Tier) -> Vec<CardRecord> {
    let (count, colors, base, spread) = match tier {
        Tier::One => (40, 2, 1, 2),
        Tier::Two => (30, 3, 1, 2),
        Tier::Three => (20, 3, 2, 3),
    };
    (0..count)
        .map(|i: usize| {
            let mut costs = [0u8; 5];
            for j in 0..colors {
                costs[(i + j + 1) % 5] += base + ((i / 5 + j) % spread) as u8;
            }
            let points = match tier {
                Tier::One => u8::from(i % 8 == 7),
                Tier::Two => 1 + (i % 3) as u8,
                Tier::Three => 3 + (i % 3) as u8,
            };
            record(costs, points, Color::ALL[i % 5])
        })
        .collect()
}

/// Ten patrons: even ones need three in three colors, odd ones four in two.
pub fn patron_records() -> Vec<PatronRecord> {
    (0..10)
        .map(|i: usize| {
            let mut req = [0u8; 5];
            if i % 2 == 0 {
                for j in 0..3 {
                    req[(i + j) % 5] = 3;
                }
            } else {
                for j in 0..2 {
                    req[(i + j) % 5] = 4;
                }
            }
            PatronRecord {
                red: req[0],
                green: req[1],
                blue: req[2],
                white: req[3],
                black: req[4],
                points: None,
            }
        })
        .collect()
}

/// Builder loaded with the full synthetic set.
pub fn full_builder(config: GameConfig) -> GameBuilder {
    Tier::ALL
        .into_iter()
        .fold(GameBuilder::new(config), |builder, tier| {
            builder.tier_records(tier, tier_records(tier))
        })
        .patron_records(patron_records())
}

/// Shuffled game with the full synthetic set.
pub fn standard_game(players: usize, seed: u64) -> TurnController {
    full_builder(GameConfig::new(players).with_seed(seed))
        .build()
        .expect("standard setup is valid")
}

pub fn card(tier: Tier, bonus: Color, points: u8, cost: TokenPool) -> DevelopmentCard {
    DevelopmentCard::new(tier, bonus, points, cost)
}

/// Zero-cost card granting `bonus`.
pub fn bonus_card(bonus: Color) -> DevelopmentCard {
    DevelopmentCard::new(Tier::One, bonus, 0, TokenPool::new())
}
