//! Glue code tying content, the game session and the terminal together.
use std::io::{self, Write};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use dread_content::ContentFactory;
use dread_core::{Action, GameError, Poll, UnitId};
use dread_runtime::{AutoPolicy, BattleRunner, EncounterSummary, GameSession};

use crate::config::CliConfig;
use crate::input::{self, Choice, HELP};
use crate::presentation;

pub struct CliApp {
    config: CliConfig,
    session: GameSession,
    rng: ChaCha8Rng,
}

impl CliApp {
    pub fn new(config: CliConfig) -> Result<Self> {
        let factory = match &config.content_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::builtin(),
        };
        let content = factory.load().context("loading game content")?;

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(seed, auto = config.auto, "CLI session starting");

        Ok(Self {
            config,
            session: GameSession::from_content(content),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// One line per summonable species.
    pub fn roster(&self) -> String {
        self.session
            .roster()
            .species
            .iter()
            .map(|species| {
                let base = &species.base;
                let skill = species.skill.map(|s| s.to_string()).unwrap_or_default();
                format!(
                    "{:<16} {:<18} {:<9} HP {:>3} ATK {:>2} DEF {:>2} SPD {:>2}  {skill}",
                    species.id,
                    species.name,
                    species.rarity.to_string(),
                    base.hp,
                    base.attack,
                    base.defense,
                    base.speed,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plays campaign stages in order from 1-1, stopping at the first loss.
    pub fn campaign(&mut self, stages: u32, team: &[String]) -> Result<()> {
        let team = self.recruit(team)?;
        let (mut world, mut stage) = (1, 1);

        for _ in 0..stages {
            let runner = self.session.start_campaign(world, stage, &team)?;
            let title = self.session.worlds().name(world).unwrap_or("Unknown");
            println!("\n=== {title} · Stage {world}-{stage} ===");

            let summary = self.play(runner)?;
            if !summary.outcome.is_victory() {
                break;
            }
            match summary.unlocked {
                Some(next) => (world, stage) = next,
                None => break,
            }
        }
        Ok(())
    }

    /// Descends to a single dungeon floor.
    pub fn dungeon(&mut self, floor: u32, team: &[String]) -> Result<()> {
        let team = self.recruit(team)?;
        let runner = self.session.start_dungeon(floor, &team)?;
        println!("\n=== Endless Dungeon · Floor {floor} ===");
        self.play(runner)?;
        Ok(())
    }

    fn recruit(&mut self, team: &[String]) -> Result<Vec<UnitId>> {
        team.iter()
            .map(|species| {
                self.session
                    .summon(species)
                    .with_context(|| format!("summoning `{species}`"))
            })
            .collect()
    }

    fn play(&mut self, mut runner: BattleRunner) -> Result<EncounterSummary> {
        if self.config.auto {
            runner.run(&mut AutoPolicy::new(), &mut self.rng, &mut |event| println!("{event}"))?;
        } else {
            self.interactive(&mut runner)?;
        }

        let summary = self.session.conclude(runner)?;
        println!("{}", presentation::summary(&summary, self.session.player()));
        Ok(summary)
    }

    fn interactive(&mut self, runner: &mut BattleRunner) -> Result<()> {
        let mut lines = io::stdin().lines();
        println!("{HELP}");

        loop {
            let poll = runner.poll(&mut self.rng)?;
            print_events(runner);
            let actor = match poll {
                Poll::Finished(_) => return Ok(()),
                Poll::Progressed => continue,
                Poll::AwaitingAction(actor) => actor,
            };

            let view = runner.snapshot();
            println!("{}", presentation::field(&view));
            let name = view.unit(actor).map_or("?", |unit| unit.name.as_str());

            loop {
                print!("{name}> ");
                io::stdout().flush()?;

                let Some(line) = lines.next().transpose()? else {
                    // stdin closed
                    runner.retreat()?;
                    print_events(runner);
                    return Ok(());
                };

                let action = match line.parse::<Choice>() {
                    Ok(Choice::Help) => {
                        println!("{HELP}");
                        continue;
                    }
                    Ok(Choice::Status) => {
                        println!("{}", presentation::field(&view));
                        continue;
                    }
                    Ok(Choice::Retreat) => {
                        runner.retreat()?;
                        print_events(runner);
                        return Ok(());
                    }
                    Ok(Choice::Defend) => Ok(Action::Defend),
                    Ok(Choice::Attack(number)) => {
                        input::pick_target(&view, actor, number).map(Action::attack)
                    }
                    Ok(Choice::Skill(number)) => input::skill_action(&view, actor, number),
                    Err(err) => Err(err),
                };

                let outcome = match action {
                    Ok(action) => match runner.act(action, &mut self.rng) {
                        Err(err) if err.severity().is_internal() => return Err(err.into()),
                        other => other.map_err(|err| err.to_string()),
                    },
                    Err(err) => Err(err.to_string()),
                };
                match outcome {
                    Ok(()) => break,
                    Err(message) => println!("{message}"),
                }
            }
        }
    }
}

fn print_events(runner: &mut BattleRunner) {
    for event in runner.drain_events() {
        println!("{event}");
    }
}
