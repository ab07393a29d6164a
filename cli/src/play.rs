use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;
use tilematch_core::*;
use tilematch_protocol::{ClientMessage, ServerMessage, decode_client, dispatch, encode_server};

use crate::render;

/// Parse failures are reported back to the player as plain messages.
type ParseResult<T> = std::result::Result<T, String>;

/// Everything that may mutate the session arrives through one channel, in order.
enum Event {
    Line(String),
    Tick(Generation),
    Closed,
}

/// Sends one tick per second for a single session generation until dropped.
struct Ticker {
    stop: Arc<AtomicBool>,
}

impl Ticker {
    fn spawn(generation: Generation, events: Sender<Event>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stopped = Arc::clone(&stop);
        thread::spawn(move || {
            loop {
                thread::sleep(Duration::from_secs(1));
                if stopped.load(Ordering::Relaxed) || events.send(Event::Tick(generation)).is_err() {
                    break;
                }
            }
            log::trace!("Ticker for {:?} stopped", generation);
        });
        Self { stop }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Frontend {
    /// Human readable commands and board.
    Text,
    /// One JSON message per line each way.
    Json,
}

pub(crate) struct Driver {
    session: GameSession,
    frontend: Frontend,
    clock: bool,
}

impl Driver {
    pub(crate) fn new(session: GameSession, frontend: Frontend, clock: bool) -> Self {
        Self {
            session,
            frontend,
            clock,
        }
    }

    /// Runs until stdin closes or the player quits. `start` is applied before reading any input.
    pub(crate) fn run(mut self, start: Option<Difficulty>) -> anyhow::Result<()> {
        let (events, inbox) = mpsc::channel();
        spawn_reader(events.clone());

        let mut stdout = io::stdout().lock();
        let mut ticker = None;

        if self.frontend == Frontend::Text {
            writeln!(stdout, "{}", HELP)?;
        }
        if let Some(difficulty) = start {
            let reply = dispatch(&mut self.session, ClientMessage::Start { difficulty });
            self.follow_clock(&reply, &mut ticker, &events);
            self.emit(&mut stdout, &reply)?;
        }

        for event in inbox {
            let message = match event {
                Event::Closed => break,
                Event::Tick(generation) => ClientMessage::Tick { generation },
                Event::Line(line) => match self.parse(&line) {
                    Ok(Some(message)) => message,
                    Ok(None) if line.trim() == "q" || line.trim() == "quit" => break,
                    Ok(None) => continue,
                    Err(message) => {
                        self.emit(&mut stdout, &ServerMessage::Error { message })?;
                        continue;
                    }
                },
            };

            let reply = dispatch(&mut self.session, message);
            self.follow_clock(&reply, &mut ticker, &events);
            self.emit(&mut stdout, &reply)?;
        }

        log::info!(
            "Leaving with score {} ({:?})",
            self.session.score(),
            self.session.state()
        );
        Ok(())
    }

    fn parse(&self, line: &str) -> ParseResult<Option<ClientMessage>> {
        match self.frontend {
            Frontend::Json if line.trim().is_empty() => Ok(None),
            Frontend::Json => decode_client(line).map(Some).map_err(|err| err.to_string()),
            Frontend::Text => parse_text_command(line),
        }
    }

    /// Replaces the ticker whenever a new generation starts and stops it once the run ends.
    fn follow_clock(&self, reply: &ServerMessage, ticker: &mut Option<Ticker>, events: &Sender<Event>) {
        if !self.clock {
            return;
        }
        match reply {
            ServerMessage::Started { generation, .. } => {
                *ticker = Some(Ticker::spawn(*generation, events.clone()));
            }
            ServerMessage::Tick {
                outcome: TickOutcome::Ended,
                ..
            } => {
                *ticker = None;
            }
            _ => {}
        }
    }

    fn emit(&self, out: &mut impl Write, reply: &ServerMessage) -> anyhow::Result<()> {
        match self.frontend {
            Frontend::Json => writeln!(out, "{}", encode_server(reply)?)?,
            Frontend::Text => match reply {
                ServerMessage::Snapshot { snapshot } | ServerMessage::Started { snapshot, .. } => {
                    write!(out, "{}", render::board(snapshot))?;
                }
                ServerMessage::Turn { outcome, snapshot } => {
                    if let Some(line) = render::outcome(outcome) {
                        writeln!(out, "{line}")?;
                        write!(out, "{}", render::board(snapshot))?;
                    }
                }
                ServerMessage::Tick {
                    outcome: TickOutcome::Ended,
                    ..
                } => {
                    writeln!(
                        out,
                        "Time is up! Final score {}. Type r to play again.",
                        self.session.score()
                    )?;
                }
                ServerMessage::Tick { .. } => {}
                ServerMessage::Error { message } => writeln!(out, "error: {message}")?,
            },
        }
        out.flush()?;
        Ok(())
    }
}

const HELP: &str = "commands: <x> <y> activate | r restart | d <difficulty> change difficulty | s show | q quit";

fn spawn_reader(events: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if events.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = events.send(Event::Closed);
    });
}

/// Parses the text frontend's commands. `Ok(None)` means there is nothing to send.
pub(crate) fn parse_text_command(line: &str) -> ParseResult<Option<ClientMessage>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let message = match words.as_slice() {
        [] | ["q" | "quit"] => return Ok(None),
        ["r" | "restart"] => ClientMessage::Restart,
        ["s" | "show"] => ClientMessage::Snapshot,
        ["d" | "difficulty", name] => ClientMessage::ChangeDifficulty {
            difficulty: name.parse().map_err(|err: GameError| err.to_string())?,
        },
        ["a" | "activate", x, y] | [x, y] => ClientMessage::Activate {
            x: parse_coord(x)?,
            y: parse_coord(y)?,
        },
        _ => return Err(format!("unknown command `{}`", line.trim())),
    };
    Ok(Some(message))
}

fn parse_coord(word: &str) -> ParseResult<Coord> {
    word.parse()
        .map_err(|_| format!("`{word}` is not a coordinate"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_activation_with_and_without_verb() {
        assert_eq!(
            parse_text_command("4 7"),
            Ok(Some(ClientMessage::Activate { x: 4, y: 7 }))
        );
        assert_eq!(
            parse_text_command("  a 10 2 "),
            Ok(Some(ClientMessage::Activate { x: 10, y: 2 }))
        );
    }

    #[test]
    fn parses_difficulty_change() {
        assert_eq!(
            parse_text_command("d time-attack"),
            Ok(Some(ClientMessage::ChangeDifficulty {
                difficulty: Difficulty::TimeAttack
            }))
        );
        assert!(parse_text_command("d nightmare").is_err());
    }

    #[test]
    fn quit_and_blank_lines_send_nothing() {
        assert_eq!(parse_text_command(""), Ok(None));
        assert_eq!(parse_text_command("q"), Ok(None));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_text_command("jump").is_err());
        assert!(parse_text_command("a x 3").is_err());
        assert!(parse_text_command("300 1").is_err());
    }
}
