//! Hexagonal board geometry.
//!
//! The board has 11 columns (A..K) of variable height. Move arithmetic runs
//! in *logical* rows so that the same direction deltas work on both halves of
//! the hexagon; cell storage uses *storage* rows indexing each column's array
//! from 0. Every crossing between the two systems is an explicit conversion.

pub const NUM_COLS: i32 = 11;

/// Hexagonal chess variant. The three variants share the board shape and
/// differ in starting layout and pawn starting ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Glinski,
    McCooey,
    Hexofen,
}

impl Variant {
    /// Lowercase protocol name, as accepted on setup lines.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Glinski => "glinski",
            Variant::McCooey => "mccooey",
            Variant::Hexofen => "hexofen",
        }
    }
}

const MCCOOEY_HEIGHTS: [i32; 11] = [6, 7, 8, 9, 10, 11, 10, 9, 8, 7, 6];

/// Number of cells in `col` for the given variant.
#[inline]
pub fn column_height(variant: Variant, col: i32) -> i32 {
    match variant {
        Variant::McCooey => {
            if (0..NUM_COLS).contains(&col) {
                MCCOOEY_HEIGHTS[col as usize]
            } else {
                0
            }
        }
        // Glinski and Hexofen share the 6..11..6 profile.
        Variant::Glinski | Variant::Hexofen => {
            if col <= 5 {
                6 + col
            } else {
                16 - col
            }
        }
    }
}

#[inline]
pub fn on_board(variant: Variant, col: i32, storage_row: i32) -> bool {
    (0..NUM_COLS).contains(&col) && (0..column_height(variant, col)).contains(&storage_row)
}

/// Storage row -> logical row. Identity on the left half; shifted up by
/// `col - 5` on the right half so straight lines keep constant deltas.
#[inline]
pub fn logical_row(col: i32, storage_row: i32) -> i32 {
    if col <= 5 {
        storage_row
    } else {
        storage_row + col - 5
    }
}

/// Logical row -> storage row. Inverse of [`logical_row`].
#[inline]
pub fn storage_row(col: i32, logical_row: i32) -> i32 {
    if col <= 5 {
        logical_row
    } else {
        logical_row + 5 - col
    }
}

/// Human-readable square name: column letter `A..K`, 1-based storage row.
pub fn square_name(col: i32, row: i32) -> String {
    format!("{}{}", (b'A' + col as u8) as char, row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_heights_match_hex_profile() {
        let expected = [6, 7, 8, 9, 10, 11, 10, 9, 8, 7, 6];
        for variant in [Variant::Glinski, Variant::McCooey, Variant::Hexofen] {
            for (col, height) in expected.iter().enumerate() {
                assert_eq!(column_height(variant, col as i32), *height);
            }
        }
    }

    #[test]
    fn logical_storage_round_trip() {
        for col in 0..NUM_COLS {
            for row in 0..column_height(Variant::Glinski, col) {
                let logical = logical_row(col, row);
                assert_eq!(storage_row(col, logical), row);
            }
        }
    }

    #[test]
    fn logical_rows_shift_on_right_half() {
        assert_eq!(logical_row(5, 3), 3);
        assert_eq!(logical_row(6, 3), 4);
        assert_eq!(logical_row(10, 0), 5);
    }

    #[test]
    fn on_board_rejects_out_of_range() {
        assert!(on_board(Variant::Glinski, 0, 5));
        assert!(!on_board(Variant::Glinski, 0, 6));
        assert!(on_board(Variant::Glinski, 5, 10));
        assert!(!on_board(Variant::Glinski, 5, 11));
        assert!(!on_board(Variant::Glinski, -1, 0));
        assert!(!on_board(Variant::Glinski, 11, 0));
        assert!(!on_board(Variant::Glinski, 3, -1));
    }

    #[test]
    fn square_names_use_letter_and_one_based_row() {
        assert_eq!(square_name(0, 0), "A1");
        assert_eq!(square_name(1, 1), "B2");
        assert_eq!(square_name(10, 5), "K6");
    }
}
