//! Derived stat computation.
//!
//! These are the formulas the server applies when it reports
//! `calculated_stats`. The local copy exists so a species can be previewed
//! before a team member exists server-side, and it must agree with the server
//! to the integer. Arithmetic is done in `f64` in the server's operation order
//! and truncated toward zero at the end.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{BaseStats, EffortValues, IndividualValues, Level};

/// Largest individual-variation value for any stat.
pub const MAX_IV: u8 = 15;

/// Largest effort value the server will accumulate for one stat.
pub const MAX_EV: u16 = u16::MAX;

/// The five stats every creature has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    /// Hit points.
    Hp,
    /// Physical attack.
    Attack,
    /// Physical defense.
    Defense,
    /// Turn order.
    Speed,
    /// Combined special attack/defense.
    Special,
}

impl Stat {
    /// All stats in display order.
    pub const ALL: [Stat; 5] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::Speed,
        Stat::Special,
    ];

    /// Short label used in tables.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "ATK",
            Stat::Defense => "DEF",
            Stat::Speed => "SPD",
            Stat::Special => "SPC",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Final stat values as displayed for a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculatedStats {
    /// Hit points.
    pub hp: u16,
    /// Attack.
    pub attack: u16,
    /// Defense.
    pub defense: u16,
    /// Speed.
    pub speed: u16,
    /// Special.
    pub special: u16,
}

impl CalculatedStats {
    /// Value for one stat.
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
            Stat::Special => self.special,
        }
    }
}

/// Lowest and highest stats a fresh member of a species can roll at a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatRange {
    /// Every IV at zero.
    pub min: CalculatedStats,
    /// Every IV at [`MAX_IV`].
    pub max: CalculatedStats,
}

/// HP has no IV of its own; it is assembled from the low bit of the other four.
pub fn hp_iv(ivs: &IndividualValues) -> u8 {
    (ivs.attack % 2) * 8 + (ivs.defense % 2) * 4 + (ivs.speed % 2) * 2 + (ivs.special % 2)
}

/// HP formula. Unlike the other stats it carries a flat `+50` inside the
/// scaled term and adds `10` rather than `5`.
pub fn hp_stat(base: u16, level: Level, iv: u8, ev: u16) -> u16 {
    let inner = f64::from(u32::from(base) + u32::from(iv)) + ev_bonus(ev) + 50.0;
    (inner * f64::from(level.get()) / 50.0 + 10.0) as u16
}

/// Attack, Defense, Speed and Special formula.
pub fn other_stat(base: u16, level: Level, iv: u8, ev: u16) -> u16 {
    let inner = f64::from(u32::from(base) + u32::from(iv)) + ev_bonus(ev);
    (inner * f64::from(level.get()) / 50.0 + 5.0) as u16
}

fn ev_bonus(ev: u16) -> f64 {
    f64::from(ev).sqrt() / 8.0
}

/// Compute all five stats from base stats, level, IVs and EVs.
pub fn calculate_all(
    base: &BaseStats,
    level: Level,
    ivs: &IndividualValues,
    evs: &EffortValues,
) -> CalculatedStats {
    CalculatedStats {
        hp: hp_stat(base.hp, level, hp_iv(ivs), evs.hp),
        attack: other_stat(base.attack, level, ivs.attack, evs.attack),
        defense: other_stat(base.defense, level, ivs.defense, evs.defense),
        speed: other_stat(base.speed, level, ivs.speed, evs.speed),
        special: other_stat(base.special, level, ivs.special, evs.special),
    }
}

/// Preview the possible stats of a not-yet-created member with zero EVs.
pub fn preview_range(base: &BaseStats, level: Level) -> StatRange {
    let evs = EffortValues::default();
    StatRange {
        min: calculate_all(base, level, &IndividualValues::uniform(0), &evs),
        max: calculate_all(base, level, &IndividualValues::uniform(MAX_IV), &evs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn level(value: i64) -> Level {
        Level::new(value).unwrap()
    }

    fn bulbasaur() -> BaseStats {
        BaseStats {
            hp: 45,
            attack: 49,
            defense: 49,
            speed: 45,
            special: 65,
        }
    }

    #[test]
    fn hp_iv_combines_low_bits() {
        let ivs = IndividualValues {
            attack: 7,
            defense: 7,
            speed: 7,
            special: 7,
        };
        assert_eq!(hp_iv(&ivs), 15);

        let ivs = IndividualValues {
            attack: 1,
            defense: 2,
            speed: 3,
            special: 4,
        };
        assert_eq!(hp_iv(&ivs), 8 + 2);
        assert_eq!(hp_iv(&IndividualValues::uniform(0)), 0);
    }

    #[test]
    fn reference_values_at_level_fifty() {
        let base = BaseStats {
            hp: 50,
            attack: 50,
            defense: 50,
            speed: 50,
            special: 50,
        };
        let stats = calculate_all(
            &base,
            level(50),
            &IndividualValues::uniform(7),
            &EffortValues::default(),
        );
        assert_eq!(
            stats,
            CalculatedStats {
                hp: 125,
                attack: 62,
                defense: 62,
                speed: 62,
                special: 62,
            }
        );
    }

    #[test]
    fn effort_values_add_square_root_bonus() {
        // sqrt(65535) / 8 = 31.99..., so max EVs add just under 32 to the inner term.
        assert_eq!(other_stat(100, level(100), 15, MAX_EV), 298);
        assert_eq!(other_stat(100, level(100), 15, 0), 235);
        assert_eq!(hp_stat(100, level(100), 15, MAX_EV), 403);
    }

    #[test]
    fn hp_carries_its_extra_term_at_level_one() {
        let base = 45;
        let non_hp_floor = (base * 2) / 50 + 5;
        let hp = hp_stat(base, level(1), 0, 0);
        assert_ne!(hp, non_hp_floor);
        assert_eq!(hp, 11);
        assert_eq!(other_stat(base, level(1), 0, 0), 5);
    }

    #[test]
    fn preview_range_brackets_every_roll() {
        let range = preview_range(&bulbasaur(), level(5));
        assert_eq!(range.min.hp, 19);
        assert_eq!(range.min.attack, 9);
        assert!(range.max.attack >= range.min.attack);
        for stat in Stat::ALL {
            assert!(range.min.get(stat) <= range.max.get(stat), "{stat}");
        }
    }

    proptest! {
        #[test]
        fn other_stat_is_monotonic(
            base in 1u16..=255,
            lvl in 1i64..100,
            iv in 0u8..MAX_IV,
            ev in 0u16..MAX_EV,
        ) {
            let here = other_stat(base, level(lvl), iv, ev);
            prop_assert!(other_stat(base, level(lvl + 1), iv, ev) >= here);
            prop_assert!(other_stat(base, level(lvl), iv + 1, ev) >= here);
            prop_assert!(other_stat(base, level(lvl), iv, ev + 1) >= here);
        }

        #[test]
        fn hp_stat_is_monotonic(
            base in 1u16..=255,
            lvl in 1i64..100,
            iv in 0u8..MAX_IV,
            ev in 0u16..MAX_EV,
        ) {
            let here = hp_stat(base, level(lvl), iv, ev);
            prop_assert!(hp_stat(base, level(lvl + 1), iv, ev) >= here);
            prop_assert!(hp_stat(base, level(lvl), iv + 1, ev) >= here);
            prop_assert!(hp_stat(base, level(lvl), iv, ev + 1) >= here);
        }

        #[test]
        fn hp_always_exceeds_other_formula(
            base in 1u16..=255,
            lvl in 1i64..=100,
            iv in 0u8..=MAX_IV,
        ) {
            prop_assert!(hp_stat(base, level(lvl), iv, 0) > other_stat(base, level(lvl), iv, 0));
        }
    }
}
