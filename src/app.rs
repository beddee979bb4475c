//! Interactive loop: turns key presses into session steps, runs the
//! save/load menu and asks for a replay when a game ends.

use std::io;
use std::path::PathBuf;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::input::{Action, Key, KeyInput};
use crate::level::LevelGenerator;
use crate::render::Screen;
use crate::save::{load_from_file, save_to_file};
use crate::session::{Session, Status};

const PRESS_ANY_KEY: &str = "Press any key to continue...";
const MENU_PROMPT: &str = "Enter command (save/load): ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App<I, S, R> {
    input: I,
    screen: S,
    rng: R,
    generator: LevelGenerator,
    save_path: PathBuf,
}

impl<I: KeyInput, S: Screen, R: Rng> App<I, S, R> {
    pub fn new(
        input: I,
        screen: S,
        rng: R,
        generator: LevelGenerator,
        save_path: PathBuf,
    ) -> Self {
        Self {
            input,
            screen,
            rng,
            generator,
            save_path,
        }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Plays sessions until the player declines a replay or quits.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if self.play_session()? == Flow::Quit {
                info!("player quit");
                return Ok(());
            }
        }
    }

    /// One session from level 1 to a win or loss. `Continue` means the player
    /// asked to play again.
    fn play_session(&mut self) -> io::Result<Flow> {
        let mut session = Session::new(self.generator, &mut self.rng);

        loop {
            if session.status().is_terminal() {
                return self.finish(&session);
            }
            if session.status() == Status::LevelComplete {
                let level = session.state().level;
                let lines = vec![
                    format!("Level {level} Complete! Proceeding to Level {}...", level + 1),
                    PRESS_ANY_KEY.to_string(),
                ];
                if self.pause(&session, &lines)? == Flow::Quit {
                    return Ok(Flow::Quit);
                }
                session.next_level(&mut self.rng);
                continue;
            }

            self.screen.draw(session.state(), &[])?;

            let Some(action) = self.input.read_key()?.action() else {
                continue;
            };
            match action {
                Action::Quit => return Ok(Flow::Quit),
                Action::Menu => {
                    if self.menu(&mut session)? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                Action::Move(dir) => {
                    let report = session.step(dir);
                    debug!(
                        ?dir,
                        moved = report.moved,
                        enemies_moved = report.enemies_moved,
                        status = ?report.status,
                        "turn resolved"
                    );
                    // The enemy turn has already run, so this frame shows
                    // enemies in their new cells.
                    if report.powerup.is_some() && report.status == Status::InProgress {
                        let lines = vec![
                            "Powerup collected! Score increased.".to_string(),
                            PRESS_ANY_KEY.to_string(),
                        ];
                        if self.pause(&session, &lines)? == Flow::Quit {
                            return Ok(Flow::Quit);
                        }
                    }
                }
            }
        }
    }

    /// Shows the ending and asks for a replay.
    fn finish(&mut self, session: &Session) -> io::Result<Flow> {
        let state = session.state();
        let headline = if session.status() == Status::GameWon {
            format!("Congratulations! You completed Level {} and won the game!", state.level)
        } else {
            "An enemy has caught you! Game Over.".to_string()
        };
        let lines = vec![
            headline,
            format!("Final Score: {}", state.score),
            format!("Total Moves Made: {}", state.total_moves),
            "Play Again? (Y/N): ".to_string(),
        ];
        self.screen.draw(state, &lines)?;
        match self.input.read_key()? {
            Key::Char('y') | Key::Char('Y') => Ok(Flow::Continue),
            _ => Ok(Flow::Quit),
        }
    }

    fn menu(&mut self, session: &mut Session) -> io::Result<Flow> {
        let Some(command) = self.read_command(session)? else {
            return Ok(Flow::Quit);
        };
        let result = match command.trim() {
            "save" => match save_to_file(session.state(), &self.save_path) {
                Ok(()) => format!("Game saved to {}", self.save_path.display()),
                Err(e) => {
                    warn!(error = %e, "save failed");
                    format!("Error saving game: {e}")
                }
            },
            "load" => match load_from_file(&self.save_path) {
                Ok(state) => {
                    session.restore(state);
                    format!("Game loaded from {}", self.save_path.display())
                }
                Err(e) => {
                    warn!(error = %e, "load failed");
                    format!("Error loading game: {e}")
                }
            },
            _ => return Ok(Flow::Continue),
        };
        self.pause(session, &[result, PRESS_ANY_KEY.to_string()])
    }

    /// Collects typed characters until Enter. `None` means the player hit
    /// Ctrl-C; Escape abandons the command.
    fn read_command(&mut self, session: &Session) -> io::Result<Option<String>> {
        let mut command = String::new();
        loop {
            let prompt = format!("{MENU_PROMPT}{command}");
            self.screen.draw(session.state(), &[prompt])?;
            match self.input.read_key()? {
                Key::Enter => return Ok(Some(command)),
                Key::Escape => return Ok(Some(String::new())),
                Key::Interrupt => return Ok(None),
                Key::Backspace => {
                    command.pop();
                }
                Key::Char(c) => command.push(c),
            }
        }
    }

    fn pause(&mut self, session: &Session, lines: &[String]) -> io::Result<Flow> {
        self.screen.draw(session.state(), lines)?;
        match self.input.read_key()? {
            Key::Interrupt => Ok(Flow::Quit),
            _ => Ok(Flow::Continue),
        }
    }
}
