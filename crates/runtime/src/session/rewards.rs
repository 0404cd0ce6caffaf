//! Writes battle reports back into the player's state.

use tracing::{debug, info};

use dread_core::{BattleReport, EncounterMode, ItemDrop, RewardSink};

use super::player::PlayerState;

impl RewardSink for PlayerState {
    fn deliver(&mut self, report: &BattleReport) {
        let rewards = &report.rewards;

        for fought in &report.units {
            if let Some(unit) = self.unit_mut(fought.uid) {
                unit.level = fought.level;
                unit.exp = fought.exp;
            }
        }
        for (uid, progress) in &report.level_ups {
            if progress.levels_gained > 0 {
                info!(target: "runtime::session", %uid, level = progress.level, "unit leveled up");
            }
        }

        self.cash = self.cash.saturating_add(rewards.cash);
        self.gems = self.gems.saturating_add(rewards.gems);
        for drop in &rewards.drops {
            match drop {
                ItemDrop::Potion(size) => self.potions.add(*size, 1),
                ItemDrop::Gear(gear) => {
                    let id = self.add_gear(*gear);
                    debug!(target: "runtime::session", gear = ?id, "gear minted");
                }
            }
        }

        let account = self.grant_player_xp(rewards.experience);
        if account.levels > 0 {
            info!(
                target: "runtime::session",
                level = self.level,
                gems = account.gems,
                "player leveled up"
            );
        }

        match report.plan.mode {
            EncounterMode::Campaign { world, stage } => {
                if let Some((world, stage)) = self.progress.record_clear(world, stage) {
                    info!(target: "runtime::session", world, stage, "stage unlocked");
                }
            }
            EncounterMode::Dungeon { floor } => {
                self.best_floor = self.best_floor.max(floor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use dread_content::{WorldInfo, WorldMap};
    use dread_core::{
        BattleRewards, EncounterPlan, GearCategory, GearDrop, GearSet, PotionSize, Rarity, Species,
        StatBlock, StatKind, StatRoll,
    };

    fn player() -> PlayerState {
        let map = WorldMap {
            stages_per_world: 20,
            worlds: vec![WorldInfo {
                name: "Abandoned Hospital".into(),
            }],
        };
        PlayerState::new(&RuntimeConfig::default(), &map)
    }

    #[test]
    fn report_is_written_back() {
        let mut player = player();
        let uid = player.add_unit(Species::new("zombie", "Zombie", Rarity::Common, StatBlock::new(50, 5, 2, 10)));

        let mut fought = player.unit(uid).unwrap().clone();
        let progress = fought.gain_experience(150);
        let report = BattleReport {
            plan: EncounterPlan::campaign(1, 1).with_first_clear(true),
            rewards: BattleRewards {
                experience: 150,
                cash: 100,
                gems: 20,
                drops: vec![
                    ItemDrop::Potion(PotionSize::Small),
                    ItemDrop::Gear(GearDrop {
                        category: GearCategory::Charm,
                        set: GearSet::Blade,
                        level: 1,
                        main: StatRoll::flat(StatKind::CritRate, 5),
                    }),
                ],
            },
            units: vec![fought],
            level_ups: vec![(uid, progress)],
            rounds: 4,
        };

        player.deliver(&report);

        let unit = player.unit(uid).unwrap();
        assert_eq!((unit.level, unit.exp), (2, 50));
        assert_eq!(player.cash, 600);
        // 20 from the report, 20 from the account level-up
        assert_eq!(player.gems, 140);
        assert_eq!(player.potions.small, 1);
        assert_eq!(player.gear.len(), 1);
        assert_eq!((player.level, player.xp), (2, 50));
        assert!(player.progress.is_cleared(1, 1));
        assert!(player.progress.is_unlocked(1, 2));
    }

    #[test]
    fn dungeon_reports_track_best_floor() {
        let mut player = player();
        let report = |floor| BattleReport {
            plan: EncounterPlan::dungeon(floor),
            rewards: BattleRewards::default(),
            units: Vec::new(),
            level_ups: Vec::new(),
            rounds: 1,
        };

        player.deliver(&report(7));
        player.deliver(&report(3));
        assert_eq!(player.best_floor, 7);
    }
}
