//! Bounded resource pools (HP, SP).
//!
//! Every mutation clamps into `[0, maximum]`; callers never need to check
//! bounds themselves.

/// A current/maximum pair that can never leave its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Removes up to `amount`, returning what was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current);
        self.current -= applied;
        applied
    }

    /// Adds up to `amount` without passing the maximum, returning what was added.
    pub fn fill(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.maximum - self.current);
        self.current += applied;
        applied
    }

    /// `percent` of the maximum, truncating.
    ///
    /// A zero maximum yields zero instead of dividing by it.
    pub fn percent_of_max(&self, percent: u32) -> u32 {
        (u64::from(self.maximum) * u64::from(percent) / 100) as u32
    }

    /// Whether current is strictly below `percent` of the maximum.
    pub fn below_percent(&self, percent: u32) -> bool {
        u64::from(self.current) * 100 < u64::from(self.maximum) * u64::from(percent)
    }
}
