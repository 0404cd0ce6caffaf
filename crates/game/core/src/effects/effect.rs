//! Status effect values.

use strum::Display;

use crate::stats::StatKind;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    // ========================================================================
    // Stat modifiers (require `stat`)
    // ========================================================================
    Buff,
    Debuff,

    // ========================================================================
    // Per-turn HP changes
    // ========================================================================
    /// Flat damage each turn.
    Bleed,

    /// Flat healing each turn.
    #[strum(serialize = "Heal over time")]
    HealOverTime,

    /// Percent of max HP healed each turn.
    Regeneration,

    /// Raises all healing received by a percentage.
    #[strum(serialize = "Heal boost")]
    HealBoost,

    // ========================================================================
    // Crowd control and targeting
    // ========================================================================
    /// Skips turns.
    Stun,

    /// Cannot use skills.
    Fear,

    /// Not picked by default targeting unless last alive.
    Ghost,

    /// Forces enemy targeting onto the bearer.
    Taunt,

    /// Bounces a percentage of incoming attack damage back to the attacker.
    Reflect,

    // ========================================================================
    // Counters
    // ========================================================================
    /// Eight Pages counter. Stat debuffs are derived from its stack count.
    #[strum(serialize = "Eight Pages")]
    PageCounter,
}

impl EffectKind {
    /// Whether the effect is harmful to its bearer.
    pub const fn is_harmful(self) -> bool {
        matches!(
            self,
            EffectKind::Debuff
                | EffectKind::Bleed
                | EffectKind::Stun
                | EffectKind::Fear
                | EffectKind::PageCounter
        )
    }
}

/// Effect strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Magnitude {
    /// Absolute amount.
    Flat(i32),
    /// Percentage of a reference value (base stat or max HP).
    Percent(i32),
}

impl Magnitude {
    /// Resolves against a reference value, truncating toward zero.
    pub fn resolve(self, reference: i32) -> i32 {
        match self {
            Magnitude::Flat(v) => v,
            Magnitude::Percent(p) => (i64::from(reference) * i64::from(p) / 100) as i32,
        }
    }

    /// Raw number regardless of interpretation.
    pub const fn raw(self) -> i32 {
        match self {
            Magnitude::Flat(v) | Magnitude::Percent(v) => v,
        }
    }
}

impl core::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Magnitude::Flat(v) => write!(f, "{v}"),
            Magnitude::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Remaining lifetime of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Duration {
    /// Decrements once per completed turn of the bearer.
    Turns(u32),
    /// Ends only by explicit removal.
    Persistent,
}

impl Duration {
    pub const fn is_persistent(self) -> bool {
        matches!(self, Duration::Persistent)
    }

    /// Longer of two durations; persistent beats any timer.
    pub fn max(self, other: Duration) -> Duration {
        match (self, other) {
            (Duration::Turns(a), Duration::Turns(b)) => Duration::Turns(a.max(b)),
            _ => Duration::Persistent,
        }
    }
}

/// A single effect attached to a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: EffectKind,
    pub stat: Option<StatKind>,
    pub magnitude: Magnitude,
    pub duration: Duration,
    pub stacks: u32,
    /// Name of the unit (or passive) that applied it.
    pub source: String,
    /// Debuff re-derived from a counter's stack count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub from_counter: bool,
}

impl StatusEffect {
    pub fn new(kind: EffectKind, magnitude: Magnitude, turns: u32, source: impl Into<String>) -> Self {
        Self {
            kind,
            stat: None,
            magnitude,
            duration: Duration::Turns(turns),
            stacks: 1,
            source: source.into(),
            from_counter: false,
        }
    }

    pub fn buff(stat: StatKind, percent: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Buff, Magnitude::Percent(percent), turns, source).on_stat(stat)
    }

    /// Additive buff for percentage stats (crit rate, accuracy, evasion).
    pub fn flat_buff(stat: StatKind, amount: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Buff, Magnitude::Flat(amount), turns, source).on_stat(stat)
    }

    pub fn debuff(stat: StatKind, percent: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Debuff, Magnitude::Percent(percent), turns, source).on_stat(stat)
    }

    pub fn flat_debuff(stat: StatKind, amount: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Debuff, Magnitude::Flat(amount), turns, source).on_stat(stat)
    }

    pub fn bleed(per_turn: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Bleed, Magnitude::Flat(per_turn.max(1)), turns, source)
    }

    pub fn heal_over_time(per_turn: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::HealOverTime, Magnitude::Flat(per_turn.max(0)), turns, source)
    }

    pub fn regeneration(percent: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Regeneration, Magnitude::Percent(percent), turns, source)
    }

    pub fn heal_boost(percent: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::HealBoost, Magnitude::Percent(percent), turns, source)
    }

    pub fn stun(turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Stun, Magnitude::Flat(0), turns, source)
    }

    pub fn fear(turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Fear, Magnitude::Flat(0), turns, source)
    }

    pub fn ghost(turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Ghost, Magnitude::Flat(0), turns, source)
    }

    pub fn taunt(turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Taunt, Magnitude::Flat(0), turns, source)
    }

    pub fn reflect(percent: i32, turns: u32, source: impl Into<String>) -> Self {
        Self::new(EffectKind::Reflect, Magnitude::Percent(percent), turns, source)
    }

    /// One Eight Pages stack.
    pub fn page(source: impl Into<String>) -> Self {
        Self::new(EffectKind::PageCounter, Magnitude::Flat(0), 0, source).persistent()
    }

    pub fn on_stat(mut self, stat: StatKind) -> Self {
        self.stat = Some(stat);
        self
    }

    pub fn persistent(mut self) -> Self {
        self.duration = Duration::Persistent;
        self
    }

    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks.max(1);
        self
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.duration, Duration::Turns(0))
    }

    /// Signed contribution to `stat` resolved against `base`.
    ///
    /// Zero for effects that are not stat modifiers of that stat.
    pub fn stat_contribution(&self, stat: StatKind, base: i32) -> i32 {
        if self.stat != Some(stat) {
            return 0;
        }
        let per_stack = self.magnitude.resolve(base);
        let total = per_stack.saturating_mul(self.stacks as i32);
        match self.kind {
            EffectKind::Buff => total,
            EffectKind::Debuff => -total,
            _ => 0,
        }
    }

    /// Label used in logs and snapshots, e.g. `"ATK Debuff 30%"`.
    pub fn label(&self) -> String {
        match (self.kind, self.stat) {
            (EffectKind::Buff | EffectKind::Debuff, Some(stat)) => {
                format!("{stat} {} {}", self.kind, self.magnitude)
            }
            (EffectKind::PageCounter, _) => format!("{} x{}", self.kind, self.stacks),
            (EffectKind::Bleed | EffectKind::HealOverTime, _) => {
                format!("{} {}/turn", self.kind, self.magnitude)
            }
            (EffectKind::Regeneration | EffectKind::Reflect | EffectKind::HealBoost, _) => {
                format!("{} {}", self.kind, self.magnitude)
            }
            _ => self.kind.to_string(),
        }
    }
}
