//! Gear pieces, set tags and the per-unit loadout.
//!
//! A loadout has three category slots (weapon, armor, charm) and three
//! generic relic slots that accept any category. Every piece carries one main
//! roll, up to four secondary rolls and a set tag.

use arrayvec::ArrayVec;
use strum::{Display, EnumIter};

use super::block::StatKind;
use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};

/// Stable identifier for a gear piece within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GearId(pub u64);

/// Category a piece was forged as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GearCategory {
    Weapon,
    Armor,
    Charm,
}

/// Loadout slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GearSlot {
    Weapon,
    Armor,
    Charm,
    #[strum(serialize = "Relic I")]
    RelicI,
    #[strum(serialize = "Relic II")]
    RelicII,
    #[strum(serialize = "Relic III")]
    RelicIII,
}

impl GearSlot {
    pub const COUNT: usize = 6;

    const fn index(self) -> usize {
        match self {
            GearSlot::Weapon => 0,
            GearSlot::Armor => 1,
            GearSlot::Charm => 2,
            GearSlot::RelicI => 3,
            GearSlot::RelicII => 4,
            GearSlot::RelicIII => 5,
        }
    }

    /// Whether a piece of `category` may occupy this slot.
    pub const fn accepts(self, category: GearCategory) -> bool {
        match self {
            GearSlot::Weapon => matches!(category, GearCategory::Weapon),
            GearSlot::Armor => matches!(category, GearCategory::Armor),
            GearSlot::Charm => matches!(category, GearCategory::Charm),
            GearSlot::RelicI | GearSlot::RelicII | GearSlot::RelicIII => true,
        }
    }
}

/// Whether a roll adds a flat amount or a percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollKind {
    Flat,
    Percent,
}

/// A single stat bonus on a piece or set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRoll {
    pub stat: StatKind,
    pub kind: RollKind,
    pub value: i32,
}

impl StatRoll {
    pub const fn flat(stat: StatKind, value: i32) -> Self {
        Self {
            stat,
            kind: RollKind::Flat,
            value,
        }
    }

    pub const fn percent(stat: StatKind, value: i32) -> Self {
        Self {
            stat,
            kind: RollKind::Percent,
            value,
        }
    }
}

/// Set tags. Sets activate when enough equipped pieces share the tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GearSet {
    Vigor,
    Fury,
    Guard,
    Focus,
    Shade,
    Blade,
    Swift,
    Carnage,
}

/// Requirement and payoff of a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetDefinition {
    pub required: usize,
    pub bonus: StatRoll,
}

impl GearSet {
    pub const fn definition(self) -> SetDefinition {
        let (required, bonus) = match self {
            GearSet::Vigor => (2, StatRoll::percent(StatKind::Hp, 15)),
            GearSet::Fury => (2, StatRoll::percent(StatKind::Attack, 15)),
            GearSet::Guard => (2, StatRoll::percent(StatKind::Defense, 15)),
            GearSet::Focus => (2, StatRoll::flat(StatKind::Accuracy, 20)),
            GearSet::Shade => (2, StatRoll::flat(StatKind::Evasion, 15)),
            GearSet::Blade => (2, StatRoll::flat(StatKind::CritRate, 12)),
            GearSet::Swift => (4, StatRoll::percent(StatKind::Speed, 25)),
            GearSet::Carnage => (4, StatRoll::flat(StatKind::CritDamage, 40)),
        };
        SetDefinition { required, bonus }
    }
}

/// An equippable piece of gear.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GearPiece {
    pub id: GearId,
    pub category: GearCategory,
    pub set: GearSet,
    /// Enhancement level of the piece itself (≥1), independent of unit level.
    pub level: u32,
    pub main: StatRoll,
    pub secondary: ArrayVec<StatRoll, { BattleConfig::MAX_SECONDARY_ROLLS }>,
}

impl GearPiece {
    pub const MAX_LEVEL: u32 = 15;

    pub fn new(id: GearId, category: GearCategory, set: GearSet, main: StatRoll) -> Self {
        Self {
            id,
            category,
            set,
            level: 1,
            main,
            secondary: ArrayVec::new(),
        }
    }

    /// Adds a secondary roll. Extra rolls beyond capacity are ignored.
    pub fn with_secondary(mut self, roll: StatRoll) -> Self {
        let _ = self.secondary.try_push(roll);
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.clamp(1, Self::MAX_LEVEL);
        self
    }

    /// Power multiplier in percent from the piece's own level.
    ///
    /// Formula: 100 + 10 × (level − 1)
    pub fn power_percent(&self) -> i32 {
        100 + 10 * (self.level.clamp(1, Self::MAX_LEVEL) as i32 - 1)
    }

    /// All rolls of the piece, scaled by its level.
    pub fn scaled_rolls(&self) -> impl Iterator<Item = StatRoll> + '_ {
        let power = self.power_percent();
        core::iter::once(self.main)
            .chain(self.secondary.iter().copied())
            .map(move |roll| StatRoll {
                value: roll.value * power / 100,
                ..roll
            })
    }
}

/// Errors raised by loadout operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadoutError {
    #[error("{category} gear cannot go into the {slot} slot")]
    SlotMismatch { slot: GearSlot, category: GearCategory },

    #[error("gear {0:?} is already equipped on this unit")]
    AlreadyEquipped(GearId),
}

impl GameError for LoadoutError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SlotMismatch { .. } => "LOADOUT_SLOT_MISMATCH",
            Self::AlreadyEquipped(_) => "LOADOUT_ALREADY_EQUIPPED",
        }
    }
}

/// Gear equipped on one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    slots: [Option<GearPiece>; GearSlot::COUNT],
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: GearSlot) -> Option<&GearPiece> {
        self.slots[slot.index()].as_ref()
    }

    /// Equips a piece, returning the evicted previous occupant.
    pub fn equip(
        &mut self,
        slot: GearSlot,
        piece: GearPiece,
    ) -> Result<Option<GearPiece>, LoadoutError> {
        if !slot.accepts(piece.category) {
            return Err(LoadoutError::SlotMismatch {
                slot,
                category: piece.category,
            });
        }
        let duplicate = self
            .slots
            .iter()
            .enumerate()
            .any(|(i, s)| i != slot.index() && s.as_ref().is_some_and(|p| p.id == piece.id));
        if duplicate {
            return Err(LoadoutError::AlreadyEquipped(piece.id));
        }

        Ok(self.slots[slot.index()].replace(piece))
    }

    pub fn unequip(&mut self, slot: GearSlot) -> Option<GearPiece> {
        self.slots[slot.index()].take()
    }

    /// Removes and returns every equipped piece.
    pub fn strip(&mut self) -> Vec<GearPiece> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &GearPiece> {
        self.slots.iter().flatten()
    }

    pub fn contains(&self, id: GearId) -> bool {
        self.pieces().any(|p| p.id == id)
    }

    /// Sets whose piece requirement is met, in declaration order.
    pub fn active_sets(&self) -> Vec<GearSet> {
        use strum::IntoEnumIterator;

        GearSet::iter()
            .filter(|set| {
                let count = self.pieces().filter(|p| p.set == *set).count();
                count >= set.definition().required
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(id: u64, category: GearCategory, set: GearSet) -> GearPiece {
        GearPiece::new(
            GearId(id),
            category,
            set,
            StatRoll::flat(StatKind::Attack, 10),
        )
    }

    #[test]
    fn equipping_occupied_slot_returns_previous_piece() {
        let mut loadout = Loadout::new();
        let first = piece(1, GearCategory::Weapon, GearSet::Fury);
        let second = piece(2, GearCategory::Weapon, GearSet::Fury);

        assert_eq!(loadout.equip(GearSlot::Weapon, first.clone()), Ok(None));
        assert_eq!(loadout.equip(GearSlot::Weapon, second), Ok(Some(first)));
        assert_eq!(loadout.get(GearSlot::Weapon).map(|p| p.id), Some(GearId(2)));
    }

    #[test]
    fn category_slots_reject_other_categories() {
        let mut loadout = Loadout::new();
        let err = loadout
            .equip(GearSlot::Weapon, piece(1, GearCategory::Armor, GearSet::Guard))
            .unwrap_err();
        assert_eq!(err.error_code(), "LOADOUT_SLOT_MISMATCH");
        assert!(loadout
            .equip(GearSlot::RelicII, piece(1, GearCategory::Armor, GearSet::Guard))
            .is_ok());
    }

    #[test]
    fn same_piece_cannot_fill_two_slots() {
        let mut loadout = Loadout::new();
        let charm = piece(7, GearCategory::Charm, GearSet::Shade);
        loadout.equip(GearSlot::RelicI, charm.clone()).unwrap();

        assert_eq!(
            loadout.equip(GearSlot::RelicII, charm),
            Err(LoadoutError::AlreadyEquipped(GearId(7)))
        );
    }

    #[test]
    fn four_piece_set_needs_four_pieces() {
        let mut loadout = Loadout::new();
        loadout.equip(GearSlot::Weapon, piece(1, GearCategory::Weapon, GearSet::Swift)).unwrap();
        loadout.equip(GearSlot::Armor, piece(2, GearCategory::Armor, GearSet::Swift)).unwrap();
        loadout.equip(GearSlot::Charm, piece(3, GearCategory::Charm, GearSet::Swift)).unwrap();
        assert!(loadout.active_sets().is_empty());

        loadout.equip(GearSlot::RelicI, piece(4, GearCategory::Charm, GearSet::Swift)).unwrap();
        assert_eq!(loadout.active_sets(), vec![GearSet::Swift]);
    }

    #[test]
    fn gear_level_scales_rolls() {
        let weapon = piece(1, GearCategory::Weapon, GearSet::Fury)
            .with_secondary(StatRoll::percent(StatKind::CritRate, 10))
            .with_level(6);
        let rolls: Vec<_> = weapon.scaled_rolls().map(|r| r.value).collect();
        assert_eq!(rolls, vec![15, 15]);
    }
}
