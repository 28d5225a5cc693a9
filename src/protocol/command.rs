//! Parsing of protocol lines into commands

use crate::board::{Pos, BOARD_SIZE};

use super::error::ProtocolError;

/// One line of input from the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `START [n]`; a missing size means the default board
    Start(u32),
    Begin,
    /// `TURN x,y`: the opponent's move
    Turn(Pos),
    /// `BOARD`; the position lines up to `DONE` follow
    Board,
    Info { key: String, value: String },
    About,
    Restart,
    End,
    /// Anything else, kept verbatim for the `UNKNOWN` reply
    Unknown(String),
}

/// Who owns a stone in a `BOARD` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Own,
    Opponent,
    /// Winning-line marker some managers send; carries no stone
    Marker,
}

impl Command {
    /// Parse a trimmed, non-empty line.
    ///
    /// Keywords are case-insensitive.
    pub fn parse(line: &str) -> Result<Command, ProtocolError> {
        let mut parts = line.split_whitespace();
        let keyword = parts.next().unwrap_or_default().to_ascii_uppercase();
        let rest: Vec<&str> = parts.collect();

        let command = match keyword.as_str() {
            "START" => match rest.first() {
                None => Command::Start(BOARD_SIZE as u32),
                Some(size) => Command::Start(
                    size.parse()
                        .map_err(|_| ProtocolError::UnsupportedBoardSize((*size).to_string()))?,
                ),
            },
            "BEGIN" => Command::Begin,
            "TURN" => {
                let coords = rest
                    .first()
                    .ok_or_else(|| ProtocolError::MalformedCommand(line.to_string()))?;
                Command::Turn(parse_coords(coords)?)
            }
            "BOARD" => Command::Board,
            "INFO" => {
                let key = rest
                    .first()
                    .ok_or_else(|| ProtocolError::MalformedCommand(line.to_string()))?;
                Command::Info {
                    key: key.to_ascii_lowercase(),
                    value: rest[1..].join(" "),
                }
            }
            "ABOUT" => Command::About,
            "RESTART" => Command::Restart,
            "END" => Command::End,
            _ => Command::Unknown(line.to_string()),
        };
        Ok(command)
    }
}

fn parse_number(field: &str, line: &str) -> Result<i32, ProtocolError> {
    field
        .trim()
        .parse()
        .map_err(|_| ProtocolError::MalformedCommand(line.to_string()))
}

/// Parse `x,y` into an on-board position.
pub fn parse_coords(text: &str) -> Result<Pos, ProtocolError> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != 2 {
        return Err(ProtocolError::MalformedCommand(text.to_string()));
    }
    let x = parse_number(fields[0], text)?;
    let y = parse_number(fields[1], text)?;
    Pos::try_new(x, y).ok_or(ProtocolError::InvalidMove { x, y })
}

/// Parse one `x,y,p` line of a `BOARD` block.
pub fn parse_board_line(line: &str) -> Result<(Pos, Owner), ProtocolError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 3 {
        return Err(ProtocolError::MalformedCommand(line.to_string()));
    }
    let x = parse_number(fields[0], line)?;
    let y = parse_number(fields[1], line)?;
    let owner = match parse_number(fields[2], line)? {
        1 => Owner::Own,
        2 => Owner::Opponent,
        3 => Owner::Marker,
        _ => return Err(ProtocolError::MalformedCommand(line.to_string())),
    };
    let pos = Pos::try_new(x, y).ok_or(ProtocolError::InvalidMove { x, y })?;
    Ok((pos, owner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keywords() {
        assert_eq!(Command::parse("BEGIN").unwrap(), Command::Begin);
        assert_eq!(Command::parse("about").unwrap(), Command::About);
        assert_eq!(Command::parse("RESTART").unwrap(), Command::Restart);
        assert_eq!(Command::parse("END").unwrap(), Command::End);
        assert_eq!(Command::parse("BOARD").unwrap(), Command::Board);
    }

    #[test]
    fn test_parse_start() {
        assert_eq!(Command::parse("START 20").unwrap(), Command::Start(20));
        assert_eq!(Command::parse("START 15").unwrap(), Command::Start(15));
        assert_eq!(Command::parse("START").unwrap(), Command::Start(20));
        assert!(matches!(
            Command::parse("START big"),
            Err(ProtocolError::UnsupportedBoardSize(s)) if s == "big"
        ));
    }

    #[test]
    fn test_parse_turn() {
        assert_eq!(Command::parse("TURN 3,4").unwrap(), Command::Turn(Pos::new(3, 4)));
        assert_eq!(Command::parse("TURN 19,0").unwrap(), Command::Turn(Pos::new(19, 0)));
        assert!(matches!(
            Command::parse("TURN 20,4"),
            Err(ProtocolError::InvalidMove { x: 20, y: 4 })
        ));
        assert!(matches!(
            Command::parse("TURN -1,4"),
            Err(ProtocolError::InvalidMove { x: -1, y: 4 })
        ));
        assert!(matches!(
            Command::parse("TURN a,b"),
            Err(ProtocolError::MalformedCommand(_))
        ));
        assert!(matches!(
            Command::parse("TURN"),
            Err(ProtocolError::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_parse_info() {
        assert_eq!(
            Command::parse("INFO timeout_turn 5000").unwrap(),
            Command::Info {
                key: "timeout_turn".into(),
                value: "5000".into()
            }
        );
        assert_eq!(
            Command::parse("INFO folder C:\\tmp dir").unwrap(),
            Command::Info {
                key: "folder".into(),
                value: "C:\\tmp dir".into()
            }
        );
        assert!(Command::parse("INFO").is_err());
    }

    #[test]
    fn test_parse_unknown_kept_verbatim() {
        assert_eq!(
            Command::parse("TAKEBACK 1,1").unwrap(),
            Command::Unknown("TAKEBACK 1,1".into())
        );
    }

    #[test]
    fn test_parse_board_line() {
        assert_eq!(parse_board_line("10,10,1").unwrap(), (Pos::new(10, 10), Owner::Own));
        assert_eq!(parse_board_line("0, 19, 2").unwrap(), (Pos::new(0, 19), Owner::Opponent));
        assert_eq!(parse_board_line("5,5,3").unwrap(), (Pos::new(5, 5), Owner::Marker));
        assert!(parse_board_line("5,5,4").is_err());
        assert!(parse_board_line("5,5").is_err());
        assert!(matches!(
            parse_board_line("25,5,1"),
            Err(ProtocolError::InvalidMove { x: 25, y: 5 })
        ));
    }
}
