//! Interactive game session.
//!
//! Owns the game root and the ponder root and drives the whole exchange:
//! setup lines, player moves, engine replies, GEXF exports, and the splice
//! of a pondered subtree when the opponent plays a move the engine already
//! searched. The caller (the binary's main loop) feeds it one line at a time
//! and decides when to ponder, so the session itself stays single-threaded
//! and directly testable.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};

use crate::board::geometry::Variant;
use crate::board::state::State;
use crate::board::types::{Color, PieceKind};
use crate::protocol::format::{format_move_ep, format_move_long};
use crate::protocol::parse::{parse_board, parse_move, BOARD_DUMP_LINES};
use crate::search::alpha_beta::iterative_deepen;
use crate::search::board_scoring::MaterialScorer;
use crate::search::node::Node;

pub const DEFAULT_SEARCH_NODES: u64 = 1000;
pub const DEFAULT_PONDER_NODES: u64 = 100_000;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Node budget for a normal reply search.
    pub search_nodes: u64,
    /// Node budget while searching on the opponent's time.
    pub ponder_nodes: u64,
    /// Directory for GEXF tree exports; `None` disables exporting.
    pub export_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_nodes: DEFAULT_SEARCH_NODES,
            ponder_nodes: DEFAULT_PONDER_NODES,
            export_dir: None,
        }
    }
}

pub struct Session {
    config: SessionConfig,
    board_lines: Vec<String>,
    engine_plays_white: bool,
    engine_response_count: u32,
    /// Epoch seconds at first setup; names this game's export files.
    game_tag: u64,
    root: Option<Node>,
    ponder_root: Option<Node>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            board_lines: Vec::new(),
            engine_plays_white: false,
            engine_response_count: 0,
            game_tag: 0,
            root: None,
            ponder_root: None,
        }
    }

    /// True once a game is set up and it is the opponent's turn.
    pub fn opponent_to_play(&self) -> bool {
        let Some(root) = &self.root else {
            return false;
        };
        root.state.side_to_move != self.engine_color()
    }

    /// True when idle pondering would be useful right now.
    pub fn can_ponder(&self) -> bool {
        self.opponent_to_play() && self.ponder_root.is_some()
    }

    /// Search the expected-reply tree on the opponent's time. `stop` is
    /// polled at every deepening boundary; pass a predicate that turns true
    /// when input arrives.
    pub fn ponder(&mut self, stop: impl FnMut() -> bool) {
        let budget = self.config.ponder_nodes;
        if let Some(ponder_root) = self.ponder_root.as_mut() {
            iterative_deepen(ponder_root, &MaterialScorer, budget, stop);
        }
    }

    /// Process one input line (already stripped of line endings). `quit` is
    /// the caller's business; everything else lands here.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        if self.root.is_none() {
            return self.handle_setup_line(line, out);
        }
        self.handle_move_line(line, out)
    }

    fn engine_color(&self) -> Color {
        if self.engine_plays_white {
            Color::White
        } else {
            Color::Black
        }
    }

    fn handle_setup_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let lower = line.to_ascii_lowercase();
        let setup = match lower.as_str() {
            "glinski" => Some((Variant::Glinski, false)),
            "glinski white" => Some((Variant::Glinski, true)),
            "mccooey" => Some((Variant::McCooey, false)),
            "mccooey white" => Some((Variant::McCooey, true)),
            "hexofen" => Some((Variant::Hexofen, false)),
            "hexofen white" => Some((Variant::Hexofen, true)),
            _ => None,
        };

        if let Some((variant, engine_white)) = setup {
            self.board_lines.clear();
            return self.start_game(variant, engine_white, out);
        }

        // Anything else is (part of) a twelve-line board dump.
        self.board_lines.push(line.to_string());
        if self.board_lines.len() < BOARD_DUMP_LINES {
            return Ok(());
        }
        let lines = std::mem::take(&mut self.board_lines);
        match parse_board(&lines) {
            Ok(state) => {
                self.stamp_game_start();
                self.engine_plays_white = false;
                self.ponder_root = Some(Node::new(state.clone()));
                self.root = Some(Node::new(state));
            }
            Err(err) => {
                warn!("board dump rejected: {err}");
                eprintln!("invalid board");
            }
        }
        Ok(())
    }

    fn start_game(
        &mut self,
        variant: Variant,
        engine_white: bool,
        out: &mut impl Write,
    ) -> io::Result<()> {
        self.stamp_game_start();
        self.engine_plays_white = engine_white;
        self.root = Some(Node::new(State::starting_position(variant)));
        writeln!(out, "position {} (white to move)", variant.name())?;

        if engine_white {
            writeln!(out, "thinking.....")?;
            self.search_root();
            self.respond_with_engine_move(out)?;
        } else if let Some(root) = &self.root {
            self.ponder_root = Some(Node::new(root.state.clone()));
        }
        Ok(())
    }

    fn handle_move_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        // Input while it is the engine's own turn is silently ignored.
        if !self.opponent_to_play() {
            return Ok(());
        }

        let move_text = if let Some(rest) = line.strip_prefix("move ") {
            rest
        } else if line.len() >= 4 {
            line
        } else {
            return Ok(());
        };

        let mv = match parse_move(move_text) {
            Ok(mv) => mv,
            Err(err) => {
                warn!("move rejected: {err}");
                eprintln!("invalid move");
                return Ok(());
            }
        };

        let Some(root) = self.root.as_mut() else {
            return Ok(());
        };

        // make_move needs an occupied source and an on-board destination;
        // the wire gives no such guarantee.
        let Some(piece) = root.state.at(mv.from_col, mv.from_row) else {
            warn!("move from empty square {}", move_text);
            eprintln!("invalid move");
            return Ok(());
        };
        if !root.state.on_board(mv.to_col, mv.to_row) {
            warn!("move to off-board square {}", move_text);
            eprintln!("invalid move");
            return Ok(());
        }

        let player_color = root.state.side_to_move;
        let captured = root.state.at(mv.to_col, mv.to_row).map(|p| p.kind);
        let notation = if mv.en_passant {
            format_move_ep(&mv, player_color)
        } else {
            format_move_long(&mv, piece.kind, captured)
        };
        writeln!(out, "Player Move ({}): {}", player_color.label(), notation)?;

        root.state.make_move(&mv);
        root.children.clear();
        root.best_move = None;

        // Reuse the pondered subtree when the opponent played into it.
        let mut reused_ponder = false;
        if let Some(child) = self.ponder_root.as_mut().and_then(|p| p.detach_child(&mv)) {
            let child = *child;
            root.state = child.state;
            root.children = child.children;
            root.best_move = child.best_move;
            root.best_score = child.best_score;
            reused_ponder = root.best_move.is_some();
            if reused_ponder {
                debug!("ponder hit: replying from the pondered subtree");
            }
        }
        self.ponder_root = None;

        if !reused_ponder {
            writeln!(out, "thinking.....")?;
            self.search_root();
        }
        self.respond_with_engine_move(out)
    }

    fn search_root(&mut self) {
        let budget = self.config.search_nodes;
        if let Some(root) = self.root.as_mut() {
            iterative_deepen(root, &MaterialScorer, budget, || false);
        }
    }

    fn respond_with_engine_move(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.export_current_tree();

        let engine_color = self.engine_color();
        let Some(root) = self.root.as_mut() else {
            return Ok(());
        };
        if let Some(mv) = root.best_move {
            let kind = root
                .state
                .at(mv.from_col, mv.from_row)
                .map_or(PieceKind::Pawn, |p| p.kind);
            let captured = root.state.at(mv.to_col, mv.to_row).map(|p| p.kind);
            let notation = if mv.en_passant {
                format_move_ep(&mv, engine_color)
            } else {
                format_move_long(&mv, kind, captured)
            };
            writeln!(out, "Engine Move ({}): {}", engine_color.label(), notation)?;

            root.state.make_move(&mv);
            root.best_move = None;
            root.children.clear();
            self.ponder_root = Some(Node::new(root.state.clone()));
        } else {
            writeln!(out, "Engine Move ({}): (none)", engine_color.label())?;
        }
        Ok(())
    }

    fn export_current_tree(&mut self) {
        self.engine_response_count += 1;
        let Some(dir) = &self.config.export_dir else {
            return;
        };
        let Some(root) = &self.root else {
            return;
        };
        let path = dir.join(format!(
            "game_{} - Move {}.gexf",
            self.game_tag, self.engine_response_count
        ));
        if let Err(err) = crate::export::gexf::export_tree(root, &path) {
            warn!("gexf export failed: {err}");
        }
    }

    fn stamp_game_start(&mut self) {
        if self.game_tag == 0 {
            self.game_tag = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session(search_nodes: u64, ponder_nodes: u64) -> Session {
        Session::new(SessionConfig {
            search_nodes,
            ponder_nodes,
            export_dir: None,
        })
    }

    fn run_line(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        session
            .handle_line(line, &mut out)
            .expect("writing to a Vec should not fail");
        String::from_utf8(out).expect("protocol output should be UTF-8")
    }

    #[test]
    fn engine_as_white_opens_with_position_thinking_and_a_move() {
        let mut session = test_session(300, 1000);
        let text = run_line(&mut session, "glinski white");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "position glinski (white to move)");
        assert_eq!(lines[1], "thinking.....");
        assert!(
            lines[2].starts_with("Engine Move (White): "),
            "unexpected engine line: {}",
            lines[2]
        );
        // Engine moved, so Black (the opponent) is now to play.
        assert!(session.opponent_to_play());
        assert!(session.can_ponder());
    }

    #[test]
    fn setup_tokens_are_case_insensitive() {
        let mut session = test_session(300, 1000);
        let text = run_line(&mut session, "HEXOFEN");
        assert_eq!(text.lines().next(), Some("position hexofen (white to move)"));
        assert!(session.opponent_to_play());
    }

    #[test]
    fn player_move_is_echoed_and_answered() {
        let mut session = test_session(300, 1000);
        run_line(&mut session, "hexofen");
        let text = run_line(&mut session, "b1b2");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Player Move (White): P B1 B2");
        assert_eq!(lines[1], "thinking.....");
        assert!(lines[2].starts_with("Engine Move (Black): "));
    }

    #[test]
    fn move_prefix_is_accepted() {
        let mut session = test_session(300, 1000);
        run_line(&mut session, "hexofen");
        let text = run_line(&mut session, "move b1b2");
        assert!(text.starts_with("Player Move (White): P B1 B2"));
    }

    #[test]
    fn unparseable_moves_produce_no_output_and_no_state_change() {
        let mut session = test_session(300, 1000);
        run_line(&mut session, "hexofen");
        assert!(run_line(&mut session, "xyzzy").is_empty());
        assert!(run_line(&mut session, "a9a9").is_empty());
        // Still White (the opponent) to move.
        assert!(session.opponent_to_play());
    }

    #[test]
    fn off_turn_input_is_silently_ignored() {
        // After the engine answers (none), Black stays on turn forever, so
        // any further opponent input arrives off-turn.
        let mut session = test_session(300, 1000);
        for line in board_dump_with_lone_white_rook() {
            run_line(&mut session, &line);
        }
        let first = run_line(&mut session, "a1a2");
        assert!(first.contains("Engine Move (Black): (none)"));
        assert!(run_line(&mut session, "a2a3").is_empty());
    }

    fn board_dump_with_lone_white_rook() -> Vec<String> {
        let mut lines: Vec<String> = vec!["R".into()];
        lines.extend((0..10).map(|_| String::new()));
        lines.push("white".into());
        lines
    }

    #[test]
    fn engine_without_pieces_answers_none() {
        let mut session = test_session(300, 1000);
        for line in board_dump_with_lone_white_rook() {
            run_line(&mut session, &line);
        }
        let text = run_line(&mut session, "a1a2");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Player Move (White): R A1 A2");
        assert_eq!(lines[1], "thinking.....");
        assert_eq!(lines[2], "Engine Move (Black): (none)");
    }

    #[test]
    fn invalid_board_dump_resets_the_line_buffer() {
        let mut session = test_session(300, 1000);
        let mut lines: Vec<String> = (0..11).map(|_| String::new()).collect();
        lines.push("grey".into());
        for line in lines {
            run_line(&mut session, &line);
        }
        // The buffer was discarded: a named setup still works.
        let text = run_line(&mut session, "glinski");
        assert_eq!(text.lines().next(), Some("position glinski (white to move)"));
    }

    #[test]
    fn pondered_reply_is_spliced_in_without_thinking() {
        let mut session = test_session(300, 20_000);
        run_line(&mut session, "mccooey");
        assert!(session.can_ponder());

        // Search the opponent's options on their time, to at least depth two
        // so every reply child carries its own best move.
        session.ponder(|| false);

        let text = run_line(&mut session, "c1c2");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Player Move (White): P C1 C2");
        assert!(
            lines[1].starts_with("Engine Move (Black): "),
            "expected an immediate engine reply, got: {}",
            lines[1]
        );
        assert!(!text.contains("thinking"));
    }

    #[test]
    fn ponder_miss_falls_back_to_a_fresh_search() {
        let mut session = test_session(300, 1000);
        run_line(&mut session, "hexofen");
        // No ponder call happened, so the splice cannot hit.
        let text = run_line(&mut session, "a1a2");
        assert!(text.contains("thinking....."));
        assert!(text.contains("Engine Move (Black): "));
    }

    #[test]
    fn en_passant_player_move_removes_the_passed_pawn() {
        // White pawn on B5 beside a Black pawn on C5 that notionally just
        // double-stepped; the Black king gives the engine a reply.
        let mut dump: Vec<String> = (0..11).map(|_| String::new()).collect();
        dump[1] = "    P".into();
        dump[2] = "    p".into();
        dump[10] = "k".into();
        dump.push("white".into());

        let mut session = test_session(300, 1000);
        for line in dump {
            run_line(&mut session, &line);
        }
        let text = run_line(&mut session, "PeP b5 c6 c5");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Player Move (White): PeP B5 C6 C5");
        assert!(lines[2].starts_with("Engine Move (Black): K "));

        // The passed pawn is gone and the capturing pawn sits on C6.
        let root = session.root.as_ref().expect("game should be set up");
        assert_eq!(root.state.at(2, 4), None);
        assert_eq!(
            root.state.at(2, 5),
            Some(crate::board::types::Piece::new(PieceKind::Pawn, Color::White))
        );
    }
}
