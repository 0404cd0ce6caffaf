//! Plain stat values shared by species, enemies and computed results.

use strum::{Display, EnumIter, IntoStaticStr};

use super::bonus::StatBounds;

/// Enum representing individual combat stats.
///
/// Used by gear rolls, status effects and breakdowns to reference a stat
/// without carrying a closure or a field name around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    #[strum(serialize = "HP")]
    Hp,
    #[strum(serialize = "ATK")]
    Attack,
    #[strum(serialize = "DEF")]
    Defense,
    #[strum(serialize = "SPD")]
    Speed,
    #[strum(serialize = "CRIT")]
    CritRate,
    #[strum(serialize = "CRIT DMG")]
    CritDamage,
    #[strum(serialize = "ACC")]
    Accuracy,
    #[strum(serialize = "EVA")]
    Evasion,
}

impl StatKind {
    /// Clamp range of the resolved stat.
    pub const fn bounds(self) -> StatBounds {
        match self {
            StatKind::Hp => StatBounds::HP,
            StatKind::Attack | StatKind::Defense | StatKind::Speed => StatBounds::COMBAT,
            StatKind::CritRate | StatKind::Accuracy | StatKind::Evasion => StatBounds::PERCENT,
            StatKind::CritDamage => StatBounds::CRIT_DAMAGE,
        }
    }

    /// Whether the stat grows with unit level.
    pub const fn scales_with_level(self) -> bool {
        matches!(self, StatKind::Hp | StatKind::Attack | StatKind::Defense)
    }
}

/// A full set of combat stat values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub crit_rate: i32,
    /// Crit damage multiplier in percent (150 = ×1.5).
    pub crit_damage: i32,
    pub accuracy: i32,
    pub evasion: i32,
}

impl StatBlock {
    pub const DEFAULT_CRIT_DAMAGE: i32 = 150;
    pub const DEFAULT_ACCURACY: i32 = 100;

    /// Creates a block from the four headline stats, using default secondaries.
    pub const fn new(hp: i32, attack: i32, defense: i32, speed: i32) -> Self {
        Self {
            hp,
            attack,
            defense,
            speed,
            crit_rate: 0,
            crit_damage: Self::DEFAULT_CRIT_DAMAGE,
            accuracy: Self::DEFAULT_ACCURACY,
            evasion: 0,
        }
    }

    pub const fn with_crit_rate(mut self, crit_rate: i32) -> Self {
        self.crit_rate = crit_rate;
        self
    }

    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::CritRate => self.crit_rate,
            StatKind::CritDamage => self.crit_damage,
            StatKind::Accuracy => self.accuracy,
            StatKind::Evasion => self.evasion,
        }
    }

    pub fn set(&mut self, stat: StatKind, value: i32) {
        let slot = match stat {
            StatKind::Hp => &mut self.hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
            StatKind::CritRate => &mut self.crit_rate,
            StatKind::CritDamage => &mut self.crit_damage,
            StatKind::Accuracy => &mut self.accuracy,
            StatKind::Evasion => &mut self.evasion,
        };
        *slot = value;
    }

    /// Clamps every stat into its bounds.
    pub fn clamped(mut self) -> Self {
        use strum::IntoEnumIterator;

        for stat in StatKind::iter() {
            let bounds = stat.bounds();
            self.set(stat, self.get(stat).clamp(bounds.min, bounds.max));
        }
        self
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new(1, 0, 0, 0)
    }
}
