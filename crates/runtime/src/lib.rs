//! Session layer between the combat core and clients.
//!
//! The core resolves one encounter at a time and knows nothing about the
//! player's collection. This crate owns everything around it:
//! - [`session`] holds the player's units, gear, currencies and progress
//! - [`waves`] turns the species roster into scaled enemy waves
//! - [`runner`] drives one encounter with tracing around every step
//! - [`policy`] plays the player side automatically
//!
//! A typical flow: [`GameSession::start_campaign`] → [`BattleRunner::poll`] /
//! [`BattleRunner::act`] (or [`BattleRunner::run`]) → [`GameSession::conclude`].
pub mod config;
pub mod error;
pub mod policy;
pub mod runner;
pub mod session;
pub mod waves;

pub use config::{RuntimeConfig, RuntimeConfigBuilder};
pub use error::{Result, RuntimeError, SessionError};
pub use policy::AutoPolicy;
pub use runner::BattleRunner;
pub use session::{
    CampaignProgress, EncounterSummary, FodderReport, GameSession, PlayerLevelUp, PlayerState,
    PotionStock,
};
pub use waves::{RosterWaves, campaign_stats, dungeon_stats};
