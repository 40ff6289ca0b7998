use crate::io::Console;
use anyhow::{anyhow, bail, Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Color, Geometry, Placement, Sides, Tint};
use lib::variant::{Catalog, Directory, Draft, EndCondition, Registry, Store};
use std::error::Error;
use std::io::{stdin, stdout, Read, Write};
use std::str::{FromStr, SplitWhitespace};
use tracing::{debug, instrument, warn};

/// Edits a variant, one command per line.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Edit {
    /// The name of a saved variant to resume editing.
    name: Option<String>,
}

impl Edit {
    #[instrument(level = "trace", skip(self, catalog), err)]
    pub fn execute(self, store: Directory, catalog: Catalog) -> Result<(), Anyhow> {
        let draft = match &self.name {
            None => Draft::new(catalog),
            Some(name) => {
                let record = store
                    .load(name)
                    .with_context(|| format!("failed to load variant `{}`", name))?;

                Draft::load(catalog, record)
            }
        };

        let console = Console::new(stdout(), stdin());
        Session::new(draft, store, console).run()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Place {
        name: String,
        color: Color,
        at: Placement,
    },
    Remove {
        at: Placement,
    },
    Move {
        from: Placement,
        to: Placement,
    },
    Square {
        at: Placement,
        habitable: bool,
        tint: Option<Tint>,
    },
    Promote {
        name: String,
        sides: Sides,
        targets: Vec<String>,
    },
    Objective {
        sides: Sides,
        name: String,
    },
    Condition {
        sides: Sides,
        condition: EndCondition,
    },
    ClearConditions {
        sides: Sides,
    },
    Boards {
        geometries: Vec<Geometry>,
    },
    Pieces,
    Show,
    Save {
        name: Option<String>,
    },
    Quit,
}

fn arg<T>(args: &mut SplitWhitespace, what: &str) -> Result<T, Anyhow>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    let arg = args.next().ok_or_else(|| anyhow!("missing {}", what))?;
    arg.parse::<T>()
        .with_context(|| format!("invalid {} `{}`", what, arg))
}

fn end(mut args: SplitWhitespace) -> Result<(), Anyhow> {
    match args.next() {
        None => Ok(()),
        Some(extra) => bail!("unexpected argument `{}`", extra),
    }
}

impl FromStr for Command {
    type Err = Anyhow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, tail) = s.trim().split_once(char::is_whitespace).unwrap_or((s.trim(), ""));
        let tail = tail.trim();
        let mut args = tail.split_whitespace();

        let cmd = match head {
            "place" => Command::Place {
                name: arg(&mut args, "piece type")?,
                color: arg(&mut args, "color")?,
                at: arg(&mut args, "square")?,
            },

            "remove" => Command::Remove {
                at: arg(&mut args, "square")?,
            },

            "move" => Command::Move {
                from: arg(&mut args, "square")?,
                to: arg(&mut args, "square")?,
            },

            "square" => Command::Square {
                at: arg(&mut args, "square")?,
                habitable: match args.next() {
                    Some("habitable") => true,
                    Some("uninhabitable") => false,
                    Some(s) => bail!("expected `habitable` or `uninhabitable`, got `{}`", s),
                    None => bail!("missing habitability"),
                },
                tint: args
                    .next()
                    .map(|t| t.parse::<Tint>().with_context(|| format!("invalid color `{}`", t)))
                    .transpose()?,
            },

            "promote" => Command::Promote {
                name: arg(&mut args, "piece type")?,
                sides: arg(&mut args, "sides")?,
                targets: args
                    .next()
                    .into_iter()
                    .flat_map(|ts| ts.split(','))
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect(),
            },

            "objective" => Command::Objective {
                sides: arg(&mut args, "sides")?,
                name: args.next().unwrap_or_default().to_string(),
            },

            "condition" => {
                let (sides, condition) = tail
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("missing condition"))?;

                return Ok(Command::Condition {
                    sides: sides
                        .parse::<Sides>()
                        .with_context(|| format!("invalid sides `{}`", sides))?,
                    condition: condition
                        .trim()
                        .parse::<EndCondition>()
                        .with_context(|| format!("invalid condition `{}`", condition.trim()))?,
                });
            }

            "clear-conditions" => Command::ClearConditions {
                sides: arg(&mut args, "sides")?,
            },

            "boards" => {
                let geometries = args
                    .map(|g| g.parse::<Geometry>().with_context(|| format!("invalid board size `{}`", g)))
                    .collect::<Result<Vec<_>, _>>()?;

                return Ok(Command::Boards { geometries });
            }

            "pieces" => Command::Pieces,
            "show" => Command::Show,

            "save" if tail.is_empty() => return Ok(Command::Save { name: None }),
            "save" => {
                return Ok(Command::Save {
                    name: Some(tail.to_string()),
                })
            }

            "quit" => Command::Quit,

            cmd => bail!("unknown command `{}`", cmd),
        };

        end(args)?;
        Ok(cmd)
    }
}

struct Session<S: Store, W: Write, R: Read> {
    draft: Draft,
    store: S,
    console: Console<W, R>,
}

impl<S, W, R> Session<S, W, R>
where
    S: Store,
    S::Error: Error + Send + Sync + 'static,
    W: Write,
    R: Read,
{
    fn new(draft: Draft, store: S, console: Console<W, R>) -> Self {
        Session {
            draft,
            store,
            console,
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn apply(&mut self, cmd: Command) -> Result<String, Anyhow> {
        match cmd {
            Command::Place { name, color, at } => {
                self.draft.place(&name, color, at)?;
            }

            Command::Remove { at } => {
                self.draft.remove(at)?;
            }

            Command::Move { from, to } => {
                self.draft.relocate(from, to)?;
            }

            Command::Square {
                at,
                habitable,
                tint,
            } => self.draft.set_square(at, habitable, tint)?,

            Command::Promote {
                name,
                sides,
                targets,
            } => self.draft.set_promotions(&name, targets, sides),

            Command::Objective { sides, name } => self.draft.set_objective(&name, sides),
            Command::Condition { sides, condition } => self.draft.add_condition(condition, sides),
            Command::ClearConditions { sides } => self.draft.clear_conditions(sides),

            Command::Boards { geometries } => {
                for (at, piece) in self.draft.reshape(geometries)? {
                    warn!(%piece, %at, "piece no longer fits on the boards");
                }
            }

            Command::Pieces => return Ok(self.draft.registry().names().join("\n")),
            Command::Show => return Ok(self.draft.to_string()),

            Command::Save { name } => {
                let name = name.unwrap_or_else(|| self.draft.name().to_string());
                let record = self.draft.validate(&name)?;
                self.store.save(&record).context("failed to save variant")?;
                self.draft.rename(record.name());
                return Ok(format!("saved {}", record.name()));
            }

            Command::Quit => {}
        }

        Ok("ok".to_string())
    }

    #[instrument(level = "trace", skip(self), err)]
    fn run(&mut self) -> Result<(), Anyhow> {
        while let Some(line) = self.console.recv()? {
            if line.trim().is_empty() {
                continue;
            }

            let reply = match line.parse() {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.apply(cmd),
                Err(e) => Err(e),
            };

            match reply {
                Ok(msg) => self.console.send(msg)?,
                Err(e) => {
                    debug!(line = %line.trim(), "{:#}", e);
                    self.console.send(format!("error: {:#}", e))?;
                }
            }

            self.console.flush()?;
        }

        Ok(())
    }
}
