//! Sessions on the built-in content: auto battles, progression and saves.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use dread_content::ContentFactory;
use dread_core::{
    Action, ActionPolicy, BattleEvent, BattleSnapshot, CombatantId, PotionSize, UnitId,
    lifetime_experience,
};
use dread_runtime::{AutoPolicy, GameSession, PlayerState};

fn session() -> GameSession {
    GameSession::from_content(ContentFactory::builtin().load().unwrap())
}

fn squad(session: &mut GameSession, species: &str) -> Vec<UnitId> {
    (0..4).map(|_| session.summon(species).unwrap()).collect()
}

#[test]
fn auto_campaign_clears_the_first_stage() {
    let mut session = session();
    let team = squad(&mut session, "scp_682");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut runner = session.start_campaign(1, 1, &team).unwrap();
    let mut log = Vec::new();
    let outcome = runner
        .run(&mut AutoPolicy::new(), &mut rng, &mut |event| log.push(event.clone()))
        .unwrap();
    assert!(outcome.is_victory());
    assert!(log.contains(&BattleEvent::Victory));

    let summary = session.conclude(runner).unwrap();
    let report = summary.outcome.report().unwrap();
    assert!(report.plan.first_clear);
    assert_eq!(summary.unlocked, Some((1, 2)));

    let player = session.player();
    assert_eq!(player.cash, 500 + report.rewards.cash);
    assert_eq!(player.gems, 100 + report.rewards.gems + 20 * summary.player_levels);
    assert!(player.progress.is_cleared(1, 1));
    assert!(player.progress.is_unlocked(1, 2));
    for uid in &team {
        assert_eq!(player.unit(*uid).unwrap().exp, report.rewards.experience);
    }

    // a replay is no longer a first clear
    let runner = session.start_campaign(1, 1, &team).unwrap();
    assert!(!runner.plan().first_clear);
}

/// Attacks itself on the first turn it is asked about, then plays normally.
struct FumbleOnce {
    fumbled: bool,
    auto: AutoPolicy,
}

impl ActionPolicy for FumbleOnce {
    fn choose(&mut self, view: &BattleSnapshot, actor: CombatantId, rng: &mut dyn RngCore) -> Action {
        if !self.fumbled {
            self.fumbled = true;
            return Action::attack(actor);
        }
        self.auto.choose(view, actor, rng)
    }
}

#[test]
fn observers_see_a_rejected_auto_action_replaced() {
    let mut session = session();
    let team = squad(&mut session, "scp_682");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut runner = session.start_campaign(1, 1, &team).unwrap();
    let mut log = Vec::new();
    let mut policy = FumbleOnce {
        fumbled: false,
        auto: AutoPolicy::new(),
    };
    runner.run(&mut policy, &mut rng, &mut |event| log.push(event.clone())).unwrap();

    let replaced: Vec<usize> = log
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, BattleEvent::ActionReplaced { .. }))
        .map(|(index, _)| index)
        .collect();
    assert_eq!(replaced.len(), 1);
    let (BattleEvent::ActionReplaced { actor, .. }, BattleEvent::Defended { actor: defender, .. }) =
        (&log[replaced[0]], &log[replaced[0] + 1])
    else {
        panic!("replacement must be followed by defending");
    };
    assert_eq!(actor, defender);
}

#[test]
fn dungeon_clears_track_the_best_floor() {
    let mut session = session();
    let team = squad(&mut session, "scp_682");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut runner = session.start_dungeon(3, &team).unwrap();
    let outcome = runner.run(&mut AutoPolicy::new(), &mut rng, &mut |_| {}).unwrap();
    assert!(outcome.is_victory());

    let summary = session.conclude(runner).unwrap();
    assert_eq!(summary.unlocked, None);
    assert_eq!(session.player().best_floor, 3);
}

#[test]
fn saved_state_resumes_after_a_battle() {
    let mut session = session();
    let team = squad(&mut session, "scp_682");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut runner = session.start_campaign(1, 1, &team).unwrap();
    runner.run(&mut AutoPolicy::new(), &mut rng, &mut |_| {}).unwrap();
    session.conclude(runner).unwrap();

    let saved = session.player().to_json().unwrap();
    let restored = PlayerState::from_json(&saved).unwrap();
    assert_eq!(&restored, session.player());

    let mut resumed = self::session().resume(restored);
    assert!(resumed.player().progress.is_unlocked(1, 2));
    let fresh = resumed.summon("zombie").unwrap();
    assert!(!team.contains(&fresh));
}

#[test]
fn leveling_does_not_depend_on_the_order_of_sources() {
    let mut session = session();
    let player = session.player_mut();
    player.potions.add(PotionSize::Small, 1);
    player.potions.add(PotionSize::Large, 4);

    let mut session_units = |species| session.summon(species).unwrap();
    let a = session_units("mothman");
    let b = session_units("mothman");
    let fodder = session_units("zombie");

    let player = session.player_mut();
    player.use_potions(a, PotionSize::Small, 1).unwrap();
    player.use_potions(a, PotionSize::Large, 2).unwrap();

    player.use_potions(b, PotionSize::Large, 2).unwrap();
    let report = player.fodder_upgrade(b, &[fodder]).unwrap();
    assert_eq!(report.experience, 10);

    let (a, b) = (player.unit(a).unwrap(), player.unit(b).unwrap());
    assert_eq!((a.level, a.exp), (2, 10));
    assert_eq!((a.level, a.exp), (b.level, b.exp));
    assert_eq!(lifetime_experience(a.level, a.exp), 110);
}
