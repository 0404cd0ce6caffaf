//! Battle rules observed through the public API, from a single strike up to
//! rewards landing in the player's state.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use dread_content::{WorldInfo, WorldMap};
use dread_core::{
    Action, ActionResolver, BattleConfig, BattleController, BattleEvent, BattleSnapshot,
    BattleState, CombatantId, EffectLedger, EncounterPlan, EnemyAi, EnemySpec, FixedWaves,
    PassiveId, Poll, Rarity, Species, StatBlock, StatusEffect, StrikeOutcome, TurnScheduler, Unit,
    UnitId,
};
use dread_runtime::{AutoPolicy, PlayerState, RuntimeConfig};

fn species(name: &str, rarity: Rarity, block: StatBlock) -> Species {
    Species::new(name.to_lowercase(), name, rarity, block)
}

fn foe(name: &str, block: StatBlock) -> EnemySpec {
    EnemySpec::from_species(&species(name, Rarity::Common, block), block)
}

fn hospital() -> WorldMap {
    WorldMap {
        stages_per_world: 20,
        worlds: vec![WorldInfo {
            name: "Abandoned Hospital".into(),
        }],
    }
}

fn poll_until_awaiting(
    battle: &mut BattleController,
    waves: &mut FixedWaves,
    rng: &mut dyn RngCore,
    actor: CombatantId,
) {
    for _ in 0..100 {
        if battle.poll(waves, rng).unwrap() == Poll::AwaitingAction(actor) {
            return;
        }
    }
    panic!("{actor} never got a turn");
}

// ============================================================================
// Full encounter
// ============================================================================

#[test]
fn one_on_one_rewards_reach_the_player() {
    let mut player = PlayerState::new(&RuntimeConfig::default(), &hospital());
    let uid = player.add_unit(species("Hero", Rarity::Rare, StatBlock::new(100, 25, 5, 20)));
    let team = player.team(&[uid], 4).unwrap();

    let mut battle = BattleController::new(team, EncounterPlan::dungeon(1), BattleConfig::default()).unwrap();
    let mut waves = FixedWaves::single(vec![foe("Zombie", StatBlock::new(40, 5, 5, 10))]);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let outcome = battle
        .run_with(&mut AutoPolicy::attacks_only(), &mut waves, &mut rng)
        .unwrap();

    let hits: Vec<u32> = battle
        .drain_events()
        .iter()
        .filter_map(|e| match e {
            BattleEvent::Attacked { attacker, outcome, .. } if attacker == "Hero" => Some(outcome.damage()),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![20, 20]);
    assert!(outcome.is_victory());

    let report = outcome.report().unwrap();
    assert_eq!(report.rewards.experience, 60);
    assert_eq!(report.rewards.cash, 120);
    let potions = report.rewards.drops.len() as u32;

    assert!(outcome.deliver(&mut player));
    let unit = player.unit(uid).unwrap();
    assert_eq!((unit.level, unit.exp), (1, 60));
    assert_eq!(player.cash, 620);
    assert_eq!((player.level, player.xp), (1, 60));
    assert_eq!(player.best_floor, 1);
    assert_eq!(
        player.potions.small + player.potions.medium + player.potions.large,
        potions
    );
}

// ============================================================================
// Single rules
// ============================================================================

#[test]
fn defending_halves_the_next_hit_and_restores_sp() {
    let hero = Unit::summon(UnitId(1), species("Hero", Rarity::Rare, StatBlock::new(100, 5, 5, 20)));
    let mut battle = BattleController::new(vec![hero], EncounterPlan::dungeon(1), BattleConfig::default()).unwrap();
    let mut waves = FixedWaves::single(vec![foe("Brute", StatBlock::new(400, 25, 5, 10))]);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let hero_id = CombatantId::ally(0);

    poll_until_awaiting(&mut battle, &mut waves, &mut rng, hero_id);
    battle.act(Action::Defend, &mut rng).unwrap();

    let view: BattleSnapshot = battle.snapshot();
    let me = view.unit(hero_id).unwrap();
    assert!(me.defending);
    // 100 start, +10 turn regen, +10 for defending
    assert_eq!(me.sp, 120);

    poll_until_awaiting(&mut battle, &mut waves, &mut rng, hero_id);
    let events = battle.drain_events();
    assert!(events.contains(&BattleEvent::Defended {
        actor: "Hero".into(),
        sp_gained: 10,
    }));
    let brute_hit = events
        .iter()
        .find_map(|e| match e {
            BattleEvent::Attacked { attacker, outcome, .. } if attacker == "Brute" => Some(*outcome),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        brute_hit,
        StrikeOutcome::Hit {
            damage: 10,
            critical: false,
            defended: true,
        }
    );
}

#[test]
fn enemies_never_pick_a_ghost_while_others_stand() {
    let config = BattleConfig::default();
    let team = (1..=3)
        .map(|n| Unit::summon(UnitId(n), species("Ghoul", Rarity::Common, StatBlock::new(60, 10, 5, 10))))
        .collect();
    let mut state = BattleState::new(team, &config).unwrap();
    state
        .load_wave(vec![foe("Wraith", StatBlock::new(60, 10, 5, 10))], &config)
        .unwrap();
    state.allies[1].effects.add(StatusEffect::ghost(3, "Jeff the Killer"));

    let resolver = ActionResolver::new(config);
    let ai = EnemyAi::new(0);
    let wraith = CombatantId::enemy(0);
    let ghost = CombatantId::ally(1);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..1_000 {
        assert_ne!(ai.choose(&resolver, &state, wraith, &mut rng), Action::attack(ghost));
    }

    state.allies[0].hp.current = 0;
    state.allies[2].hp.current = 0;
    assert_eq!(ai.choose(&resolver, &state, wraith, &mut rng), Action::attack(ghost));
}

#[test]
fn eight_pages_land_on_the_struck_enemy() {
    let slender = species("Slender", Rarity::Legendary, StatBlock::new(150, 20, 10, 25))
        .with_passive(PassiveId::EightPages);
    let hero = Unit::summon(UnitId(1), slender);
    let mut battle = BattleController::new(vec![hero], EncounterPlan::dungeon(1), BattleConfig::default()).unwrap();
    let mut waves = FixedWaves::single(vec![foe("Golem", StatBlock::new(1_000, 5, 40, 10))]);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let hero_id = CombatantId::ally(0);

    poll_until_awaiting(&mut battle, &mut waves, &mut rng, hero_id);
    battle.act(Action::attack(CombatantId::enemy(0)), &mut rng).unwrap();

    let golem = &battle.state().enemies[0];
    assert_eq!(golem.effects.page_stacks(), 1);
    assert_eq!(golem.effective_defense(), 38);
    assert_eq!(battle.state().allies[0].effects.page_stacks(), 0);
}

#[test]
fn eighth_page_stuns_frightens_and_resets() {
    let mut ledger = EffectLedger::new();
    for _ in 0..7 {
        ledger.add(StatusEffect::page("Slender"));
    }
    assert_eq!(ledger.page_stacks(), 7);
    assert!(!ledger.is_stunned());

    ledger.add(StatusEffect::page("Slender"));
    assert!(ledger.is_stunned());
    assert!(ledger.is_feared());
    assert_eq!(ledger.page_stacks(), 0);
}

#[test]
fn turns_go_fastest_first_and_skip_the_dead() {
    let (a, b, c) = (CombatantId::ally(0), CombatantId::ally(1), CombatantId::enemy(0));
    let mut turns = TurnScheduler::new();
    turns.build_order(&[(a, 30), (b, 10), (c, 20)]).unwrap();

    let mut order = Vec::new();
    while let Some(next) = turns.advance(|_| true) {
        order.push(next);
    }
    assert_eq!(order, vec![a, c, b]);

    turns.advance(|_| true);
    turns.build_order(&[(a, 30), (b, 10), (c, 20)]).unwrap();
    let mut order = Vec::new();
    while let Some(next) = turns.advance(|id| id != c) {
        order.push(next);
    }
    assert_eq!(order, vec![a, b]);
}
