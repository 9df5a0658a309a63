//! Keystroke-driven focus advancement for the grid editor.

use crate::board::CELLS;

/// Compute the next focus target after a keystroke lands on cell `index`.
///
/// Only the ten digit keys move focus: entering a digit advances to the
/// following cell so a whole board can be typed in one pass. The wrap is
/// flat, `80 -> 0`, with no special casing at row or box boundaries. Any
/// other key returns `None` and focus stays where it is.
///
/// The caller owns the side of the contract this function cannot see: move
/// focus to the returned cell and select its content so the next digit
/// overwrites it, and silently drop the move if that cell is not currently
/// mounted in the view.
pub fn next_focus(key: char, index: usize) -> Option<usize> {
    if index >= CELLS {
        return None;
    }
    key.is_ascii_digit().then(|| (index + 1) % CELLS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_keys_advance_by_one() {
        for key in '0'..='9' {
            for index in 0..CELLS {
                assert_eq!(next_focus(key, index), Some((index + 1) % CELLS));
            }
        }
    }

    #[test]
    fn last_cell_wraps_to_first() {
        assert_eq!(next_focus('7', 80), Some(0));
    }

    #[test]
    fn wrap_ignores_row_boundaries() {
        // End of the first row flows straight into the second.
        assert_eq!(next_focus('1', 8), Some(9));
        // End of a box row is nothing special either.
        assert_eq!(next_focus('1', 26), Some(27));
    }

    #[test]
    fn non_digit_keys_do_not_move() {
        for key in ['a', 'z', ' ', '\n', '\t', '-', '.', '\u{8}'] {
            for index in [0, 40, 80] {
                assert_eq!(next_focus(key, index), None);
            }
        }
    }

    #[test]
    fn non_ascii_digits_do_not_move() {
        // Arabic-Indic three is a digit to Unicode but not a digit key.
        assert_eq!(next_focus('\u{0663}', 0), None);
    }

    #[test]
    fn out_of_range_index_does_not_move() {
        assert_eq!(next_focus('5', CELLS), None);
        assert_eq!(next_focus('5', usize::MAX), None);
    }
}
