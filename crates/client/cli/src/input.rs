//! Line input for interactive battles.
//!
//! A typed line first becomes a [`Choice`] without looking at the battle.
//! Enemy numbers are then resolved against the current snapshot with
//! [`pick_target`] and [`skill_action`]. Every failure is a [`ParseError`]
//! and the caller simply prompts again.

use std::str::FromStr;

use thiserror::Error;

use dread_core::{Action, BattleSnapshot, CombatantId, TargetRule};
use dread_runtime::AutoPolicy;

/// What the player typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Basic attack. Enemy numbers are 1-based as listed; none picks the weakest.
    Attack(Option<usize>),
    Skill(Option<usize>),
    Defend,
    Retreat,
    Status,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("type a command, or `help`")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{0}` is not an enemy number")]
    BadNumber(String),

    #[error("`{0}` takes no target")]
    UnexpectedTarget(&'static str),

    #[error("too many arguments")]
    TrailingInput,

    #[error("there is no enemy #{0}")]
    NoSuchEnemy(usize),

    #[error("enemy #{0} is already down")]
    EnemyDown(usize),

    #[error("nothing to target")]
    NoTarget,

    #[error("{0} has no skill")]
    NoSkill(String),

    #[error("this skill picks its own targets")]
    SkillTargetsItself,
}

impl FromStr for Choice {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();
        let target = words.next().map(parse_number).transpose()?;
        if words.next().is_some() {
            return Err(ParseError::TrailingInput);
        }

        let bare = |choice: Choice, name: &'static str| match target {
            Some(_) => Err(ParseError::UnexpectedTarget(name)),
            None => Ok(choice),
        };

        match command.as_str() {
            "a" | "attack" => Ok(Choice::Attack(target)),
            "s" | "skill" => Ok(Choice::Skill(target)),
            "d" | "defend" => bare(Choice::Defend, "defend"),
            "r" | "retreat" => bare(Choice::Retreat, "retreat"),
            "st" | "status" => bare(Choice::Status, "status"),
            "h" | "help" | "?" => bare(Choice::Help, "help"),
            _ => Err(ParseError::UnknownCommand(command)),
        }
    }
}

fn parse_number(word: &str) -> Result<usize, ParseError> {
    word.parse().map_err(|_| ParseError::BadNumber(word.to_owned()))
}

/// Resolves an enemy number from the listing, or the weakest selectable
/// enemy when none was given.
pub fn pick_target(
    view: &BattleSnapshot,
    actor: CombatantId,
    number: Option<usize>,
) -> Result<CombatantId, ParseError> {
    let Some(number) = number else {
        return AutoPolicy::weakest_target(view, actor).ok_or(ParseError::NoTarget);
    };

    let enemy = number
        .checked_sub(1)
        .and_then(|index| view.enemies.get(index))
        .ok_or(ParseError::NoSuchEnemy(number))?;
    if !enemy.is_alive() {
        return Err(ParseError::EnemyDown(number));
    }
    Ok(enemy.id)
}

/// Builds the skill action for `actor`, naming a target only when the skill
/// takes one.
pub fn skill_action(
    view: &BattleSnapshot,
    actor: CombatantId,
    number: Option<usize>,
) -> Result<Action, ParseError> {
    let me = view.unit(actor).ok_or(ParseError::NoTarget)?;
    let rule = me.skill_target.ok_or_else(|| ParseError::NoSkill(me.name.clone()))?;

    match rule {
        TargetRule::ChosenEnemy => Ok(Action::skill_on(pick_target(view, actor, number)?)),
        _ if number.is_some() => Err(ParseError::SkillTargetsItself),
        _ => Ok(Action::skill()),
    }
}

pub const HELP: &str = "\
commands:
  a, attack [n]   basic attack on enemy n (default: weakest)
  s, skill [n]    use the skill, on enemy n if it needs a target
  d, defend       halve incoming damage until your next turn, +SP
  st, status      show the field again
  r, retreat      abandon the encounter (no rewards)
  h, help         this list";
