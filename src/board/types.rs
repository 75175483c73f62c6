//! Core piece and move types shared by the board, generator, and search.

/// Side to move / piece color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Display name used by the protocol output (`White` / `Black`).
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

/// Piece kind. The declaration order fixes the Zobrist index layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    King,
    Queen,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Rook => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::King => 4,
            PieceKind::Queen => 5,
        }
    }

    /// Uppercase notation letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
        }
    }

    /// Parse a notation letter, case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

/// A square holds at most one piece.
pub type Square = Option<Piece>;

/// A move between two squares, in storage-row coordinates.
///
/// The three flags are filled in by the move generator; moves arriving from
/// the protocol in compact notation carry `false` flags and are classified by
/// `State::make_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from_col: i32,
    pub from_row: i32,
    pub to_col: i32,
    pub to_row: i32,
    pub capture: bool,
    pub en_passant: bool,
    pub promotion: bool,
}

impl Move {
    pub const fn quiet(from_col: i32, from_row: i32, to_col: i32, to_row: i32) -> Self {
        Self {
            from_col,
            from_row,
            to_col,
            to_row,
            capture: false,
            en_passant: false,
            promotion: false,
        }
    }

    /// Coordinate-only equality, ignoring flags. Hash moves, killer moves,
    /// and ponder children are matched this way.
    #[inline]
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from_col == other.from_col
            && self.from_row == other.from_row
            && self.to_col == other.to_col
            && self.to_row == other.to_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_letters_round_trip() {
        for kind in [
            PieceKind::Pawn,
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::King,
            PieceKind::Queen,
        ] {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
            assert_eq!(
                PieceKind::from_letter(kind.letter().to_ascii_lowercase()),
                Some(kind)
            );
        }
        assert_eq!(PieceKind::from_letter('X'), None);
    }

    #[test]
    fn same_squares_ignores_flags() {
        let quiet = Move::quiet(1, 2, 3, 4);
        let mut capture = quiet;
        capture.capture = true;
        capture.promotion = true;
        assert!(quiet.same_squares(&capture));
        assert!(!quiet.same_squares(&Move::quiet(1, 2, 3, 5)));
    }
}
