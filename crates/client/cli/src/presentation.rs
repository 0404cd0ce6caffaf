//! Plain-text rendering of battle state and results.

use dread_core::{BattleOutcome, BattleSnapshot, DefeatReason, UnitSnapshot};
use dread_runtime::{EncounterSummary, PlayerState};

/// Both sides of the field. Enemies are numbered the way commands expect.
pub fn field(view: &BattleSnapshot) -> String {
    let mut lines = vec![format!(
        "── Wave {}/{} · Round {} ──",
        view.wave, view.total_waves, view.round
    )];
    lines.push("Your team:".to_owned());
    lines.extend(view.allies.iter().map(|unit| unit_line("  ", unit)));
    lines.push("Enemies:".to_owned());
    lines.extend(
        view.enemies
            .iter()
            .enumerate()
            .map(|(index, unit)| unit_line(&format!("{:>2}. ", index + 1), unit)),
    );
    lines.join("\n")
}

fn unit_line(prefix: &str, unit: &UnitSnapshot) -> String {
    if !unit.is_alive() {
        return format!("{prefix}{:<16} down", unit.name);
    }

    let mut line = format!(
        "{prefix}{:<16} HP {:>4}/{:<4} SP {:>3}/{:<3}",
        unit.name, unit.hp, unit.max_hp, unit.sp, unit.max_sp
    );
    if unit.boss {
        line.push_str(" [BOSS]");
    }
    if let (Some(skill), Some(cost)) = (unit.skill, unit.skill_cost) {
        let ready = if unit.skill_ready { "ready" } else { "not ready" };
        line.push_str(&format!(" · {skill} Lv.{} ({cost} SP, {ready})", unit.skill_level));
    }
    if !unit.effects.is_empty() {
        line.push_str(&format!(" · {}", unit.effects.join(", ")));
    }
    line
}

/// What an encounter did to the player.
pub fn summary(summary: &EncounterSummary, player: &PlayerState) -> String {
    let mut lines = Vec::new();
    match &summary.outcome {
        BattleOutcome::Won(report) => {
            let rewards = &report.rewards;
            lines.push(format!(
                "Victory in {} rounds: +{} EXP, +{} cash, +{} gems",
                report.rounds, rewards.experience, rewards.cash, rewards.gems
            ));
            for drop in &rewards.drops {
                lines.push(format!("  found {drop}"));
            }
            for (uid, progress) in &report.level_ups {
                if progress.levels_gained == 0 {
                    continue;
                }
                let name = report
                    .units
                    .iter()
                    .find(|unit| unit.uid == *uid)
                    .map_or("?", |unit| unit.name());
                lines.push(format!("  {name} reached level {}", progress.level));
            }
            if summary.player_levels > 0 {
                lines.push(format!("Player level {}!", player.level));
            }
            if let Some((world, stage)) = summary.unlocked {
                lines.push(format!("Stage {world}-{stage} unlocked"));
            }
        }
        BattleOutcome::Lost {
            reason,
            waves_cleared,
            rounds,
        } => {
            let why = match reason {
                DefeatReason::TeamWiped => "your team has fallen",
                DefeatReason::RoundLimit => "the night never ends",
            };
            lines.push(format!(
                "Defeat after {rounds} rounds ({why}), {waves_cleared} waves cleared"
            ));
        }
        BattleOutcome::Retreated { waves_cleared } => {
            lines.push(format!("Retreated after {waves_cleared} waves. No rewards."));
        }
    }
    lines.push(format!(
        "Cash {} · Gems {} · Player Lv.{} ({} XP)",
        player.cash, player.gems, player.level, player.xp
    ));
    lines.join("\n")
}
