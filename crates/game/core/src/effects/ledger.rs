//! Per-combatant effect ledger.
//!
//! # Stacking rules
//!
//! - Eight Pages counters merge by source; the defense and speed debuffs tied
//!   to the counter are re-derived from its stack count. Reaching
//!   [`PAGE_THRESHOLD`] stuns and frightens the bearer and clears the counter.
//! - Persistent stat modifiers from the same source on the same stat merge by
//!   incrementing `stacks` with no upper limit.
//! - Timed effects with the same kind, stat and source refresh: the larger
//!   magnitude and the longer duration win.
//! - Anything from a different source stacks independently.

use arrayvec::ArrayVec;

use super::effect::{Duration, EffectKind, Magnitude, StatusEffect};
use crate::config::BattleConfig;
use crate::stats::{ResourceMeter, StatKind};

/// Stacks at which Eight Pages triggers.
pub const PAGE_THRESHOLD: u32 = 8;
/// Defense and speed lost per page, in percent.
pub const PAGE_DEBUFF_PERCENT: i32 = 5;
/// Turns of stun and fear granted when the pages complete.
pub const PAGE_STUN_TURNS: u32 = 3;

/// Log entry produced by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectEvent {
    Applied {
        label: String,
        source: String,
        duration: Duration,
    },
    Refreshed {
        label: String,
    },
    Stacked {
        label: String,
        stacks: u32,
    },
    /// Eight Pages reached the threshold.
    PagesCompleted {
        source: String,
    },
    /// Ledger at capacity; the new effect was discarded.
    Dropped {
        label: String,
    },
    Bled {
        amount: u32,
        source: String,
    },
    Healed {
        amount: u32,
        label: String,
    },
    Expired {
        label: String,
    },
    Cleansed {
        count: usize,
    },
}

impl core::fmt::Display for EffectEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EffectEvent::Applied {
                label,
                source,
                duration: Duration::Turns(turns),
            } => write!(f, "gains {label} from {source} ({turns} turns)"),
            EffectEvent::Applied { label, source, .. } => write!(f, "gains {label} from {source}"),
            EffectEvent::Refreshed { label } => write!(f, "has {label} refreshed"),
            EffectEvent::Stacked { label, stacks } => write!(f, "stacks {label} (x{stacks})"),
            EffectEvent::PagesCompleted { source } => {
                write!(f, "collected all eight pages of {source} and is paralysed with fear")
            }
            EffectEvent::Dropped { label } => write!(f, "cannot hold {label}"),
            EffectEvent::Bled { amount, source } => {
                write!(f, "bleeds for {amount} damage ({source})")
            }
            EffectEvent::Healed { amount, label } => write!(f, "recovers {amount} HP ({label})"),
            EffectEvent::Expired { label } => write!(f, "is no longer affected by {label}"),
            EffectEvent::Cleansed { count } => write!(f, "is cleansed of {count} effect(s)"),
        }
    }
}

/// Active effects on one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectLedger {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl EffectLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Adds an effect following the stacking rules.
    pub fn add(&mut self, effect: StatusEffect) -> Vec<EffectEvent> {
        if effect.kind == EffectKind::PageCounter {
            return self.add_pages(&effect.source, effect.stacks);
        }

        let same = |e: &&mut StatusEffect| {
            e.kind == effect.kind
                && e.stat == effect.stat
                && e.source == effect.source
                && !e.from_counter
        };

        if let Some(existing) = self.effects.iter_mut().find(same) {
            if existing.duration.is_persistent() && effect.duration.is_persistent() {
                existing.stacks = existing.stacks.saturating_add(effect.stacks);
                return vec![EffectEvent::Stacked {
                    label: existing.label(),
                    stacks: existing.stacks,
                }];
            }
            existing.magnitude = stronger(existing.magnitude, effect.magnitude);
            existing.duration = existing.duration.max(effect.duration);
            return vec![EffectEvent::Refreshed {
                label: existing.label(),
            }];
        }

        self.push(effect)
    }

    fn push(&mut self, effect: StatusEffect) -> Vec<EffectEvent> {
        let label = effect.label();
        let source = effect.source.clone();
        let duration = effect.duration;
        match self.effects.try_push(effect) {
            Ok(()) => vec![EffectEvent::Applied {
                label,
                source,
                duration,
            }],
            Err(_) => vec![EffectEvent::Dropped { label }],
        }
    }

    fn add_pages(&mut self, source: &str, stacks: u32) -> Vec<EffectEvent> {
        let current = self.page_stacks_from(source);
        let total = current.saturating_add(stacks.max(1));

        self.effects
            .retain(|e| !(e.source == source && (e.kind == EffectKind::PageCounter || e.from_counter)));

        if total >= PAGE_THRESHOLD {
            let mut events = vec![EffectEvent::PagesCompleted {
                source: source.to_owned(),
            }];
            events.extend(self.add(StatusEffect::stun(PAGE_STUN_TURNS, source)));
            events.extend(self.add(StatusEffect::fear(PAGE_STUN_TURNS, source)));
            return events;
        }

        let counter = StatusEffect::page(source).with_stacks(total);
        let mut events = if current == 0 {
            self.push(counter)
        } else {
            let label = counter.label();
            let pushed = self.push(counter);
            if matches!(pushed.first(), Some(EffectEvent::Applied { .. })) {
                vec![EffectEvent::Stacked { label, stacks: total }]
            } else {
                pushed
            }
        };

        let percent = PAGE_DEBUFF_PERCENT * total as i32;
        for stat in [StatKind::Defense, StatKind::Speed] {
            let mut debuff = StatusEffect::debuff(stat, percent, 0, source).persistent();
            debuff.from_counter = true;
            if self.effects.try_push(debuff).is_err() {
                events.push(EffectEvent::Dropped {
                    label: format!("{stat} Debuff {percent}%"),
                });
            }
        }
        events
    }

    /// Resolves one turn: per-turn HP changes first, then durations.
    ///
    /// Healing is raised by the strongest active heal boost. HP stays within
    /// `[0, maximum]`.
    pub fn tick(&mut self, hp: &mut ResourceMeter) -> Vec<EffectEvent> {
        let mut events = Vec::new();
        let boost = self.heal_boost_percent();

        for effect in &self.effects {
            match effect.kind {
                EffectKind::Bleed => {
                    let amount = effect.magnitude.raw().max(0) as u32 * effect.stacks;
                    let dealt = hp.drain(amount);
                    events.push(EffectEvent::Bled {
                        amount: dealt,
                        source: effect.source.clone(),
                    });
                }
                EffectKind::HealOverTime | EffectKind::Regeneration => {
                    let base = match effect.magnitude {
                        Magnitude::Flat(v) => v.max(0) as u32,
                        Magnitude::Percent(p) => hp.percent_of_max(p.max(0) as u32),
                    };
                    let boosted = base * (100 + boost) / 100;
                    let healed = hp.fill(boosted);
                    events.push(EffectEvent::Healed {
                        amount: healed,
                        label: effect.label(),
                    });
                }
                _ => {}
            }
        }

        for effect in self.effects.iter_mut() {
            if let Duration::Turns(turns) = &mut effect.duration {
                *turns = turns.saturating_sub(1);
            }
        }
        for effect in self.effects.iter().filter(|e| e.is_expired()) {
            events.push(EffectEvent::Expired {
                label: effect.label(),
            });
        }
        self.effects.retain(|e| !e.is_expired());

        events
    }

    /// Removes every effect of `kind` applied by `source`.
    pub fn remove(&mut self, kind: EffectKind, source: &str) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !(e.kind == kind && e.source == source));
        before - self.effects.len()
    }

    /// Removes every harmful effect, including counters and their debuffs.
    pub fn remove_debuffs(&mut self) -> Vec<EffectEvent> {
        let before = self.effects.len();
        self.effects.retain(|e| !e.kind.is_harmful());
        let count = before - self.effects.len();
        if count == 0 {
            Vec::new()
        } else {
            vec![EffectEvent::Cleansed { count }]
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Net buff/debuff delta for `stat` resolved against `base`.
    ///
    /// Only the strongest contribution per (source, stat) pair counts, so a
    /// source that somehow applied the same modifier twice is not doubled.
    pub fn query_stat(&self, stat: StatKind, base: i32) -> i32 {
        let mut best: Vec<(&str, i32)> = Vec::new();
        for effect in &self.effects {
            let contribution = effect.stat_contribution(stat, base);
            if contribution == 0 {
                continue;
            }
            match best.iter_mut().find(|(source, _)| *source == effect.source) {
                Some((_, value)) if contribution.abs() > value.abs() => *value = contribution,
                Some(_) => {}
                None => best.push((&effect.source, contribution)),
            }
        }
        best.iter().map(|(_, v)| *v).sum()
    }

    /// `base` adjusted by active effects, floored at zero.
    pub fn effective(&self, stat: StatKind, base: i32) -> i32 {
        base.saturating_add(self.query_stat(stat, base)).max(0)
    }

    fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn is_stunned(&self) -> bool {
        self.has(EffectKind::Stun)
    }

    pub fn is_feared(&self) -> bool {
        self.has(EffectKind::Fear)
    }

    pub fn is_untargetable(&self) -> bool {
        self.has(EffectKind::Ghost)
    }

    pub fn has_taunt(&self) -> bool {
        self.has(EffectKind::Taunt)
    }

    pub fn is_bleeding(&self) -> bool {
        self.has(EffectKind::Bleed)
    }

    /// Total Eight Pages stacks across sources.
    pub fn page_stacks(&self) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == EffectKind::PageCounter)
            .map(|e| e.stacks)
            .sum()
    }

    fn page_stacks_from(&self, source: &str) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == EffectKind::PageCounter && e.source == source)
            .map(|e| e.stacks)
            .sum()
    }

    /// Strongest active reflect, in percent.
    pub fn reflect_percent(&self) -> u32 {
        self.strongest(EffectKind::Reflect)
    }

    /// Strongest active heal boost, in percent.
    pub fn heal_boost_percent(&self) -> u32 {
        self.strongest(EffectKind::HealBoost)
    }

    fn strongest(&self, kind: EffectKind) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.magnitude.raw().max(0) as u32)
            .max()
            .unwrap_or(0)
    }
}

fn stronger(a: Magnitude, b: Magnitude) -> Magnitude {
    match (a, b) {
        (Magnitude::Flat(x), Magnitude::Flat(y)) => Magnitude::Flat(x.max(y)),
        (Magnitude::Percent(x), Magnitude::Percent(y)) => Magnitude::Percent(x.max(y)),
        (_, newer) => newer,
    }
}
