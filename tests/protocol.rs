//! Tests for the manager protocol loop
//!
//! Input is fed from memory and every reply line is checked.

use std::io::Cursor;

use gomoku::config::{AppConfig, EngineConfig};
use gomoku::protocol::{run, Session};
use gomoku::{Pos, Stone};

fn session() -> Session {
    Session::new(AppConfig {
        engine: EngineConfig {
            max_depth: 2,
            max_candidates: 8,
            ..EngineConfig::default()
        },
        ..AppConfig::default()
    })
}

/// Run a script and return the reply lines.
fn play(session: &mut Session, script: &str) -> Vec<String> {
    let mut out = Vec::new();
    run(Cursor::new(script.to_string()), &mut out, session).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn parse_move(reply: &str) -> Pos {
    let (x, y) = reply.split_once(',').unwrap();
    Pos::new(x.parse().unwrap(), y.parse().unwrap())
}

// =============================================================================
// Game Flow
// =============================================================================

#[test]
fn test_start_and_begin() {
    let mut s = session();
    let replies = play(&mut s, "START 20\nBEGIN\nEND\n");
    assert_eq!(replies, vec!["OK", "10,10"]);
    assert_eq!(s.board().get(Pos::CENTER), Stone::Black);
}

#[test]
fn test_turn_sequence() {
    let mut s = session();
    // The second opponent move is far from anything the brain considers
    let replies = play(&mut s, "START 20\nTURN 10,10\nTURN 3,3\nEND\n");
    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0], "OK");

    let first = parse_move(&replies[1]);
    let second = parse_move(&replies[2]);
    assert_ne!(first, Pos::new(10, 10));
    assert_ne!(second, first);
    assert_eq!(s.own_color(), Stone::White);
    assert_eq!(s.board().get(first), Stone::White);
    assert_eq!(s.board().get(second), Stone::White);
    assert_eq!(s.board().get(Pos::new(3, 3)), Stone::Black);
    assert_eq!(s.board().move_count(), 4);
}

#[test]
fn test_board_block_then_reply() {
    let mut s = session();
    let script = "START 20\nBOARD\n0,0,1\n1,0,1\n2,0,1\n3,0,1\n10,10,2\n11,10,2\n12,10,2\n15,15,2\nDONE\nEND\n";
    let replies = play(&mut s, script);
    assert_eq!(replies, vec!["OK", "4,0"]);
    assert_eq!(s.own_color(), Stone::Black);
    assert_eq!(s.board().get(Pos::new(4, 0)), Stone::Black);
}

#[test]
fn test_board_marker_lines_ignored() {
    let mut s = session();
    let replies = play(&mut s, "BOARD\n10,10,2\n5,5,3\nDONE\nEND\n");
    assert_eq!(replies.len(), 1);
    // One stone on the board: we move second
    assert_eq!(s.own_color(), Stone::White);
    assert_eq!(s.board().get(Pos::new(5, 5)), Stone::Empty);
}

#[test]
fn test_restart_clears_board() {
    let mut s = session();
    let replies = play(&mut s, "START 20\nBEGIN\nRESTART\nEND\n");
    assert_eq!(replies, vec!["OK", "10,10", "OK"]);
    assert_eq!(s.board().move_count(), 0);
}

#[test]
fn test_about_and_info() {
    let mut s = session();
    let replies = play(&mut s, "INFO timeout_turn 2000\nINFO rule 0\nABOUT\nEND\n");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("name=\"GomokuBrain\""));
    assert_eq!(s.engine().config().time_limit_ms, 1_900);
    assert_eq!(s.info("rule"), Some("0"));
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn test_unsupported_board_size() {
    let mut s = session();
    let replies = play(&mut s, "START 15\nSTART 20\nEND\n");
    assert_eq!(replies, vec!["ERROR unsupported board size 15", "OK"]);
}

#[test]
fn test_unknown_command_reported() {
    let mut s = session();
    let replies = play(&mut s, "SWAP2BOARD\nSTART 20\nEND\n");
    assert_eq!(replies, vec!["UNKNOWN SWAP2BOARD", "OK"]);
}

#[test]
fn test_invalid_turn_keeps_session() {
    let mut s = session();
    let replies = play(&mut s, "START 20\nBEGIN\nTURN 10,10\nTURN 30,1\nTURN x\nTURN 9,9\nEND\n");
    assert_eq!(replies.len(), 6);
    assert_eq!(replies[1], "10,10");
    assert_eq!(replies[2], "ERROR invalid move 10,10");
    assert_eq!(replies[3], "ERROR invalid move 30,1");
    assert!(replies[4].starts_with("ERROR malformed command"));
    let reply = parse_move(&replies[5]);
    assert_eq!(s.board().get(reply), Stone::Black);
    assert_eq!(s.board().move_count(), 3);
}

#[test]
fn test_malformed_board_line_keeps_position() {
    let mut s = session();
    let replies = play(&mut s, "START 20\nBEGIN\nBOARD\n1,1,1\nbogus\n2,2,2\nDONE\nABOUT\nEND\n");
    assert_eq!(replies.len(), 4);
    assert!(replies[2].starts_with("ERROR malformed command: bogus"));
    assert!(replies[3].starts_with("name="));
    // The position from BEGIN is untouched
    assert_eq!(s.board().move_count(), 1);
    assert_eq!(s.board().get(Pos::CENTER), Stone::Black);
}

#[test]
fn test_end_stops_reading() {
    let mut s = session();
    let replies = play(&mut s, "START 20\nEND\nBEGIN\n");
    assert_eq!(replies, vec!["OK"]);
    assert_eq!(s.board().move_count(), 0);
}

#[test]
fn test_eof_without_end_is_clean() {
    let mut s = session();
    let replies = play(&mut s, "\n  \nSTART 20\n");
    assert_eq!(replies, vec!["OK"]);
}

#[test]
fn test_unterminated_board_block() {
    let mut s = session();
    let replies = play(&mut s, "BOARD\n10,10,1\n");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("ERROR malformed command"));
}
