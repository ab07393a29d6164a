use super::*;

/// Applies one client command to `session` and builds the reply.
///
/// This is the single place commands mutate a session, so feeding every command (ticks included) through it in
/// arrival order keeps one evaluation from interleaving with another.
pub fn dispatch(session: &mut GameSession, message: ClientMessage) -> ServerMessage {
    log::trace!("Dispatching {:?}", message);
    let reply = match message {
        ClientMessage::Start { difficulty } => session.start(difficulty).map(|generation| {
            ServerMessage::Started {
                generation,
                snapshot: session.snapshot(),
            }
        }),
        ClientMessage::Restart => session.restart().map(|generation| ServerMessage::Started {
            generation,
            snapshot: session.snapshot(),
        }),
        ClientMessage::ChangeDifficulty { difficulty } => {
            session
                .change_difficulty(difficulty)
                .map(|restarted| match restarted {
                    Some(generation) => ServerMessage::Started {
                        generation,
                        snapshot: session.snapshot(),
                    },
                    None => ServerMessage::Snapshot {
                        snapshot: session.snapshot(),
                    },
                })
        }
        ClientMessage::Activate { x, y } => {
            session
                .activate((x, y))
                .map(|outcome| ServerMessage::Turn {
                    outcome,
                    snapshot: session.snapshot(),
                })
        }
        ClientMessage::Tick { generation } => {
            let outcome = session.tick(generation);
            Ok(ServerMessage::Tick {
                outcome,
                time_remaining: session.time_remaining(),
                state: session.state(),
            })
        }
        ClientMessage::Snapshot => Ok(ServerMessage::Snapshot {
            snapshot: session.snapshot(),
        }),
    };

    reply.unwrap_or_else(|err| {
        log::debug!("Command rejected: {}", err);
        ServerMessage::Error {
            message: err.to_string(),
        }
    })
}
