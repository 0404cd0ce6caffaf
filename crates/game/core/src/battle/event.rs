//! Battle log.
//!
//! The core never prints. Every observable step is pushed as a
//! [`BattleEvent`]; `Display` renders the line a client shows.

use crate::effects::EffectEvent;

/// Why an encounter was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefeatReason {
    TeamWiped,
    RoundLimit,
}

/// Result of one basic strike against one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeOutcome {
    Missed,
    Hit {
        damage: u32,
        critical: bool,
        defended: bool,
    },
}

impl StrikeOutcome {
    pub fn damage(self) -> u32 {
        match self {
            StrikeOutcome::Missed => 0,
            StrikeOutcome::Hit { damage, .. } => damage,
        }
    }

    pub fn is_critical(self) -> bool {
        matches!(self, StrikeOutcome::Hit { critical: true, .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    WaveStarted {
        wave: u32,
        total: u32,
        enemies: Vec<String>,
    },
    RoundStarted {
        round: u32,
    },
    /// The order came back empty while combatants still lived; rebuilt.
    TurnOrderRebuilt,
    TurnStarted {
        actor: String,
        hp: u32,
        max_hp: u32,
        sp: u32,
    },
    /// Stunned units lose their action.
    TurnSkipped {
        actor: String,
    },
    /// The chosen action was rejected and the unit defends instead.
    ActionReplaced {
        actor: String,
        reason: String,
    },
    /// Even defending was rejected; the turn passes with no action.
    TurnLost {
        actor: String,
        reason: String,
    },
    Attacked {
        attacker: String,
        target: String,
        outcome: StrikeOutcome,
    },
    Reflected {
        reflector: String,
        attacker: String,
        amount: u32,
    },
    SkillUsed {
        actor: String,
        skill: String,
        level: u8,
        cost: u32,
    },
    SkillDamage {
        actor: String,
        target: String,
        amount: u32,
    },
    Healed {
        target: String,
        amount: u32,
        source: String,
    },
    SpChanged {
        target: String,
        delta: i32,
        current: u32,
    },
    Defended {
        actor: String,
        sp_gained: u32,
    },
    Effect {
        target: String,
        event: EffectEvent,
    },
    PassiveTriggered {
        owner: String,
        passive: String,
        detail: String,
    },
    Defeated {
        name: String,
    },
    WaveCleared {
        wave: u32,
    },
    Victory,
    Defeat {
        reason: DefeatReason,
    },
    Retreated,
}

impl BattleEvent {
    pub fn effect(target: impl Into<String>, event: EffectEvent) -> Self {
        BattleEvent::Effect {
            target: target.into(),
            event,
        }
    }

    /// Wraps a batch of ledger events for one bearer.
    pub fn effects(target: &str, events: Vec<EffectEvent>) -> impl Iterator<Item = BattleEvent> + '_ {
        events.into_iter().map(move |event| BattleEvent::effect(target, event))
    }
}

impl core::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BattleEvent::WaveStarted {
                wave,
                total,
                enemies,
            } => write!(f, "=== Wave {wave}/{total}: {} ===", enemies.join(", ")),
            BattleEvent::RoundStarted { round } => write!(f, "--- Round {round} ---"),
            BattleEvent::TurnOrderRebuilt => write!(f, "Turn order rebuilt"),
            BattleEvent::TurnStarted {
                actor,
                hp,
                max_hp,
                sp,
            } => write!(f, "{actor}'s turn (HP {hp}/{max_hp}, SP {sp})"),
            BattleEvent::TurnSkipped { actor } => write!(f, "{actor} is stunned and loses the turn"),
            BattleEvent::ActionReplaced { actor, reason } => {
                write!(f, "{actor} cannot do that ({reason}) and defends instead")
            }
            BattleEvent::TurnLost { actor, reason } => write!(f, "{actor} loses the turn ({reason})"),
            BattleEvent::Attacked {
                attacker,
                target,
                outcome: StrikeOutcome::Missed,
            } => write!(f, "{attacker} attacks {target} but misses"),
            BattleEvent::Attacked {
                attacker,
                target,
                outcome:
                    StrikeOutcome::Hit {
                        damage,
                        critical,
                        defended,
                    },
            } => {
                write!(f, "{attacker} attacks {target} for {damage} damage")?;
                if *critical {
                    write!(f, " (critical)")?;
                }
                if *defended {
                    write!(f, " (defended)")?;
                }
                Ok(())
            }
            BattleEvent::Reflected {
                reflector,
                attacker,
                amount,
            } => write!(f, "{reflector} reflects {amount} damage back at {attacker}"),
            BattleEvent::SkillUsed {
                actor,
                skill,
                level,
                cost,
            } => write!(f, "{actor} uses {skill} (Lv.{level}, {cost} SP)"),
            BattleEvent::SkillDamage {
                actor,
                target,
                amount,
            } => write!(f, "{actor}'s skill deals {amount} damage to {target}"),
            BattleEvent::Healed {
                target,
                amount,
                source,
            } => write!(f, "{target} recovers {amount} HP ({source})"),
            BattleEvent::SpChanged {
                target,
                delta,
                current,
            } if *delta < 0 => write!(f, "{target} loses {} SP ({current})", delta.unsigned_abs()),
            BattleEvent::SpChanged {
                target,
                delta,
                current,
            } => write!(f, "{target} gains {delta} SP ({current})"),
            BattleEvent::Defended { actor, sp_gained } => {
                write!(f, "{actor} takes a defensive stance (+{sp_gained} SP)")
            }
            BattleEvent::Effect { target, event } => write!(f, "{target} {event}"),
            BattleEvent::PassiveTriggered {
                owner,
                passive,
                detail,
            } => write!(f, "[{passive}] {owner}: {detail}"),
            BattleEvent::Defeated { name } => write!(f, "{name} has been defeated!"),
            BattleEvent::WaveCleared { wave } => write!(f, "Wave {wave} cleared"),
            BattleEvent::Victory => write!(f, "Victory!"),
            BattleEvent::Defeat {
                reason: DefeatReason::TeamWiped,
            } => write!(f, "Defeat... your team has fallen"),
            BattleEvent::Defeat {
                reason: DefeatReason::RoundLimit,
            } => write!(f, "Defeat... the battle dragged on too long"),
            BattleEvent::Retreated => write!(f, "Your team retreats"),
        }
    }
}
