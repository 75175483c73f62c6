//! Mutable board position with incremental make/undo.
//!
//! `State` is the single position model used by the generator, the searcher,
//! and the protocol session. Moves are applied in place and reversed exactly
//! through the `UndoInfo` returned by `make_move`, which is what lets the
//! search walk the tree on one allocation-free position.

use crate::board::geometry::{self, Variant, NUM_COLS};
use crate::board::types::{Color, Move, Piece, PieceKind, Square};
use crate::board::zobrist;

/// Everything `undo_move` needs to reverse one `make_move`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndoInfo {
    pub captured: Option<Piece>,
    pub was_en_passant: bool,
    pub prev_move: Option<Move>,
}

/// A hex-chess position: cells, side to move, and the previous move (kept
/// only to detect en-passant eligibility after a pawn double-step).
#[derive(Debug, Clone)]
pub struct State {
    pub variant: Variant,
    pub cells: Vec<Vec<Square>>,
    pub side_to_move: Color,
    pub prev_move: Option<Move>,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant
            && self.cells == other.cells
            && self.side_to_move == other.side_to_move
            && self.prev_move == other.prev_move
    }
}

// Starting layouts, one string per column, storage row 0 first.
// Uppercase = White, lowercase = Black, space = empty; short strings pad
// with empties.
const GLINSKI_LAYOUT: [&str; 11] = [
    "      ",
    "P     p",
    "RP    pr",
    "N P   p n",
    "Q  P  p  q",
    "BBB P p bbb",
    "K  P  p  k",
    "N P   p n",
    "RP    pr",
    "P     p",
    "      ",
];

const MCCOOEY_LAYOUT: [&str; 11] = [
    "      ",
    "       ",
    "P      p",
    "RP     pr",
    "QN P   pnq",
    "BBB P  pbbb",
    "K NP   pnk",
    "RP     pr",
    "P      p",
    "       ",
    "      ",
];

const HEXOFEN_LAYOUT: [&str; 11] = [
    "P    p",
    "P     p",
    "NP    pb",
    "RP     pr",
    "BNP   pnq",
    "KBP     pbk",
    "QNP   pnb",
    "RP     pr",
    "BP    pn",
    "P     p",
    "P    p",
];

impl State {
    /// Empty board of the given variant's shape, White to play.
    pub fn empty(variant: Variant) -> Self {
        let cells = (0..NUM_COLS)
            .map(|col| vec![None; geometry::column_height(variant, col) as usize])
            .collect();
        Self {
            variant,
            cells,
            side_to_move: Color::White,
            prev_move: None,
        }
    }

    pub fn glinski() -> Self {
        Self::from_layout(Variant::Glinski, &GLINSKI_LAYOUT)
    }

    pub fn mccooey() -> Self {
        Self::from_layout(Variant::McCooey, &MCCOOEY_LAYOUT)
    }

    pub fn hexofen() -> Self {
        Self::from_layout(Variant::Hexofen, &HEXOFEN_LAYOUT)
    }

    pub fn starting_position(variant: Variant) -> Self {
        match variant {
            Variant::Glinski => Self::glinski(),
            Variant::McCooey => Self::mccooey(),
            Variant::Hexofen => Self::hexofen(),
        }
    }

    fn from_layout(variant: Variant, layout: &[&str; 11]) -> Self {
        let mut state = Self::empty(variant);
        for (col, column_str) in layout.iter().enumerate() {
            let mut chars = column_str.chars();
            for row in 0..geometry::column_height(variant, col as i32) {
                let ch = chars.next().unwrap_or(' ');
                state.cells[col][row as usize] = piece_from_layout_char(ch);
            }
        }
        state
    }

    #[inline]
    pub fn on_board(&self, col: i32, storage_row: i32) -> bool {
        geometry::on_board(self.variant, col, storage_row)
    }

    /// Piece at `(col, storage_row)`, or `None` when empty or off-board.
    #[inline]
    pub fn at(&self, col: i32, storage_row: i32) -> Option<Piece> {
        if !self.on_board(col, storage_row) {
            return None;
        }
        self.cells[col as usize][storage_row as usize]
    }

    /// The en-passant target square, if the previous move was a pawn
    /// double-step: the transit square the capturing pawn would land on.
    pub fn en_passant_target(&self) -> Option<(i32, i32)> {
        let prev = self.prev_move?;
        if (prev.to_row - prev.from_row).abs() != 2 {
            return None;
        }
        // The double-stepping side is whoever moved last.
        let row = if self.side_to_move.opposite() == Color::White {
            prev.to_row - 1
        } else {
            prev.to_row + 1
        };
        Some((prev.to_col, row))
    }

    /// Apply a pseudo-legal move. The source square must hold a piece; the
    /// protocol session validates that before calling, and the generator
    /// only produces such moves.
    ///
    /// A pawn capture arriving in compact notation (flags all false) is
    /// recognized as en passant here, from the previous double-step.
    pub fn make_move(&mut self, mv: &Move) -> UndoInfo {
        let mut undo = UndoInfo {
            captured: None,
            was_en_passant: false,
            prev_move: self.prev_move,
        };

        let mut piece = self.cells[mv.from_col as usize][mv.from_row as usize]
            .take()
            .expect("move source must hold a piece");

        let mut is_en_passant = mv.en_passant;
        if !is_en_passant
            && piece.kind == PieceKind::Pawn
            && mv.from_col != mv.to_col
            && self.at(mv.to_col, mv.to_row).is_none()
        {
            is_en_passant = self.en_passant_target() == Some((mv.to_col, mv.to_row));
        }

        if is_en_passant {
            // The captured pawn sits one step behind the landing square.
            let captured_row = if piece.color == Color::White {
                mv.to_row - 1
            } else {
                mv.to_row + 1
            };
            if self.on_board(mv.to_col, captured_row) {
                undo.captured = self.cells[mv.to_col as usize][captured_row as usize].take();
                undo.was_en_passant = true;
            }
        } else {
            undo.captured = self.cells[mv.to_col as usize][mv.to_row as usize];
        }

        if mv.promotion {
            piece.kind = PieceKind::Queen;
        }
        self.cells[mv.to_col as usize][mv.to_row as usize] = Some(piece);

        self.prev_move = if piece.kind == PieceKind::Pawn && (mv.to_row - mv.from_row).abs() == 2 {
            Some(*mv)
        } else {
            None
        };
        self.side_to_move = self.side_to_move.opposite();

        undo
    }

    /// Exact inverse of `make_move` for the same move and its `UndoInfo`.
    pub fn undo_move(&mut self, mv: &Move, undo: &UndoInfo) {
        self.side_to_move = self.side_to_move.opposite();
        self.prev_move = undo.prev_move;

        let mut piece = self.cells[mv.to_col as usize][mv.to_row as usize]
            .take()
            .expect("move destination must hold the moved piece");
        if mv.promotion {
            piece.kind = PieceKind::Pawn;
        }
        self.cells[mv.from_col as usize][mv.from_row as usize] = Some(piece);

        let captured_row = if piece.color == Color::White {
            mv.to_row - 1
        } else {
            mv.to_row + 1
        };
        if undo.was_en_passant
            && undo.captured.is_some()
            && self.on_board(mv.to_col, captured_row)
        {
            self.cells[mv.to_col as usize][captured_row as usize] = undo.captured;
        } else if undo.captured.is_some() {
            self.cells[mv.to_col as usize][mv.to_row as usize] = undo.captured;
        }
    }

    /// Zobrist hash of `(cells, side to move, en-passant target)`.
    #[inline]
    pub fn hash(&self) -> u64 {
        zobrist::position_hash(self)
    }
}

fn piece_from_layout_char(ch: char) -> Square {
    if ch == ' ' {
        return None;
    }
    let kind = PieceKind::from_letter(ch)?;
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some(Piece::new(kind, color))
}
