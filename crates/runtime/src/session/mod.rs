//! Game session: static content plus the player's state.
//!
//! Nothing here is global. Clients own a [`GameSession`] and pass it by
//! reference; persistence is left to them through
//! [`PlayerState::to_json`] / [`PlayerState::from_json`].

mod player;
mod rewards;

pub use player::{CampaignProgress, FodderReport, PlayerLevelUp, PlayerState, PotionStock};

use tracing::info;

use dread_content::{Content, Roster, WorldMap};
use dread_core::{BattleController, BattleOutcome, EncounterPlan, UnitId};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError, SessionError};
use crate::runner::BattleRunner;
use crate::waves::RosterWaves;

/// Summary handed back once an encounter has been concluded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterSummary {
    pub outcome: BattleOutcome,
    pub player_levels: u32,
    /// Stage opened by this clear, if any.
    pub unlocked: Option<(u32, u32)>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: RuntimeConfig,
    roster: Roster,
    worlds: WorldMap,
    player: PlayerState,
}

impl GameSession {
    /// Starts a new player on the given content.
    pub fn new(config: RuntimeConfig, roster: Roster, worlds: WorldMap) -> Self {
        let player = PlayerState::new(&config, &worlds);
        Self {
            config,
            roster,
            worlds,
            player,
        }
    }

    /// Starts a new player with the battle tuning that came with the content.
    pub fn from_content(content: Content) -> Self {
        let config = RuntimeConfig::builder().battle(content.config).build();
        Self::new(config, content.roster, content.worlds)
    }

    /// Resumes an exported player.
    pub fn resume(mut self, player: PlayerState) -> Self {
        self.player = player;
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn worlds(&self) -> &WorldMap {
        &self.worlds
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// Adds a unit of the given species to the collection.
    pub fn summon(&mut self, species_id: &str) -> Result<UnitId> {
        let species = self
            .roster
            .get(species_id)
            .ok_or_else(|| SessionError::UnknownSpecies(species_id.to_owned()))?
            .clone();
        info!(target: "runtime::session", species = %species.name, "unit summoned");
        Ok(self.player.add_unit(species))
    }

    // ========================================================================
    // Encounters
    // ========================================================================

    /// Prepares a campaign stage. The stage must exist and be unlocked.
    pub fn start_campaign(&self, world: u32, stage: u32, team: &[UnitId]) -> Result<BattleRunner> {
        if !self.worlds.contains(world, stage) {
            return Err(SessionError::UnknownStage { world, stage }.into());
        }
        if !self.player.progress.is_unlocked(world, stage) {
            return Err(SessionError::StageLocked { world, stage }.into());
        }

        let first_clear = !self.player.progress.is_cleared(world, stage);
        let plan = EncounterPlan::campaign(world, stage).with_first_clear(first_clear);
        self.start(plan, team)
    }

    /// Prepares a dungeon floor.
    pub fn start_dungeon(&self, floor: u32, team: &[UnitId]) -> Result<BattleRunner> {
        let max = self.config.max_dungeon_floor;
        if !(1..=max).contains(&floor) {
            return Err(SessionError::InvalidFloor { floor, max }.into());
        }
        self.start(EncounterPlan::dungeon(floor), team)
    }

    fn start(&self, plan: EncounterPlan, team: &[UnitId]) -> Result<BattleRunner> {
        let units = self.player.team(team, self.config.max_team_size)?;
        let controller = BattleController::new(units, plan, self.config.battle.clone())?;
        Ok(BattleRunner::new(controller, RosterWaves::new(&self.roster)))
    }

    /// Applies the result of a finished encounter.
    ///
    /// Wins deliver rewards; losses and retreats leave the player untouched.
    pub fn conclude(&mut self, runner: BattleRunner) -> Result<EncounterSummary> {
        let outcome = runner.outcome().cloned().ok_or(RuntimeError::EncounterRunning)?;

        let level_before = self.player.level;
        let unlocked_before = self.player.progress.unlocked.clone();
        if outcome.deliver(&mut self.player) {
            info!(
                target: "runtime::session",
                cash = self.player.cash,
                gems = self.player.gems,
                "rewards delivered"
            );
        }

        let unlocked = self
            .player
            .progress
            .unlocked
            .iter()
            .zip(&unlocked_before)
            .enumerate()
            .find(|(_, (now, before))| now > before)
            .map(|(index, (stage, _))| (index as u32 + 1, *stage));

        Ok(EncounterSummary {
            outcome,
            player_levels: self.player.level - level_before,
            unlocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dread_content::ContentFactory;

    fn session() -> GameSession {
        let content = ContentFactory::builtin().load().unwrap();
        GameSession::from_content(content)
    }

    #[test]
    fn summon_uses_the_roster() {
        let mut session = session();
        let uid = session.summon("mothman").unwrap();
        assert_eq!(session.player().unit(uid).unwrap().name(), "Mothman");

        let err = session.summon("nessie").unwrap_err();
        assert!(matches!(err, RuntimeError::Session(SessionError::UnknownSpecies(_))));
    }

    #[test]
    fn locked_and_missing_stages_are_refused() {
        let mut session = session();
        let uid = session.summon("zombie").unwrap();

        assert!(matches!(
            session.start_campaign(1, 2, &[uid]),
            Err(RuntimeError::Session(SessionError::StageLocked { world: 1, stage: 2 }))
        ));
        assert!(matches!(
            session.start_campaign(6, 1, &[uid]),
            Err(RuntimeError::Session(SessionError::UnknownStage { .. }))
        ));
        assert!(matches!(
            session.start_dungeon(0, &[uid]),
            Err(RuntimeError::Session(SessionError::InvalidFloor { floor: 0, max: 100 }))
        ));
        assert!(session.start_campaign(1, 1, &[uid]).is_ok());
    }

    #[test]
    fn conclude_requires_a_finished_encounter() {
        let mut session = session();
        let uid = session.summon("zombie").unwrap();
        let runner = session.start_dungeon(1, &[uid]).unwrap();

        assert!(matches!(session.conclude(runner), Err(RuntimeError::EncounterRunning)));
    }

    #[test]
    fn retreat_leaves_the_player_untouched() {
        let mut session = session();
        let uid = session.summon("zombie").unwrap();
        let before = session.player().clone();

        let mut runner = session.start_campaign(1, 1, &[uid]).unwrap();
        runner.retreat().unwrap();
        let summary = session.conclude(runner).unwrap();

        assert_eq!(summary.outcome, BattleOutcome::Retreated { waves_cleared: 0 });
        assert_eq!(summary.player_levels, 0);
        assert_eq!(session.player(), &before);
    }
}
