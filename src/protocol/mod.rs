//! Line protocol spoken with the game manager
//!
//! The manager writes one command per line on stdin and reads one reply
//! per line from stdout:
//!
//! ```text
//! START 20      -> OK
//! BEGIN         -> 10,10
//! TURN 11,10    -> 9,10
//! BOARD
//! 10,10,1
//! 11,10,2
//! DONE          -> x,y
//! INFO key val  -> (no reply)
//! ABOUT         -> name="...", version="...", ...
//! RESTART       -> OK
//! END           -> (loop exits)
//! ```
//!
//! Malformed input is answered with `ERROR <message>` and the session
//! continues. Only a failing channel stops the loop with an error.

pub mod command;
pub mod error;
pub mod session;

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::board::Pos;

pub use command::{parse_board_line, parse_coords, Command, Owner};
pub use error::ProtocolError;
pub use session::Session;

/// Read commands from `reader` until `END` or end of input, replying on
/// `writer`.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    session: &mut Session,
) -> Result<(), ProtocolError> {
    let mut lines = reader.lines();

    while let Some(line) = lines.next() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(line, "received");

        let reply = match Command::parse(line) {
            Ok(Command::End) => {
                info!("END received");
                return Ok(());
            }
            Ok(Command::Board) => read_board(&mut lines)
                .and_then(|entries| session.load_board(&entries))
                .map(|mov| Some(mov.to_string())),
            Ok(command) => dispatch(command, session),
            Err(err) => Err(err),
        };

        match reply {
            Ok(Some(text)) => respond(writer, &text)?,
            Ok(None) => {}
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                warn!(%err, line, "command rejected");
                respond(writer, &format!("ERROR {err}"))?;
            }
        }
    }

    info!("input closed");
    Ok(())
}

/// Handle every command that fits on a single line.
fn dispatch(command: Command, session: &mut Session) -> Result<Option<String>, ProtocolError> {
    let reply = match command {
        Command::Start(size) => {
            session.start(size)?;
            Some("OK".to_string())
        }
        Command::Restart => {
            session.restart();
            Some("OK".to_string())
        }
        Command::Begin => Some(session.begin()?.to_string()),
        Command::Turn(pos) => Some(session.turn(pos)?.to_string()),
        Command::Info { key, value } => {
            session.set_info(&key, &value)?;
            None
        }
        Command::About => Some(session.about()),
        Command::Unknown(line) => Some(format!("UNKNOWN {line}")),
        // Handled by the loop itself
        Command::Board | Command::End => None,
    };
    Ok(reply)
}

/// Collect the position lines of a `BOARD` block.
///
/// The whole block up to `DONE` is always consumed, so a bad entry
/// cannot leak into the command stream. The first bad entry is returned.
fn read_board<I>(lines: &mut I) -> Result<Vec<(Pos, Owner)>, ProtocolError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let mut entries = Vec::new();
    let mut first_error = None;

    for line in lines.by_ref() {
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("DONE") {
            return match first_error {
                Some(err) => Err(err),
                None => Ok(entries),
            };
        }
        if line.is_empty() {
            continue;
        }
        match parse_board_line(line) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    Err(ProtocolError::MalformedCommand(
        "BOARD block not terminated by DONE".to_string(),
    ))
}

fn respond<W: Write>(writer: &mut W, text: &str) -> Result<(), ProtocolError> {
    writeln!(writer, "{text}")?;
    writer.flush()?;
    debug!(reply = text, "sent");
    Ok(())
}
