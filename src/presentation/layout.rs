//! Window and icon grid geometry
//!
//! Pure functions: the window is sized to fit the icon grid exactly, so the
//! same shortcut count always yields the same pixel dimensions.

use crate::constants::layout::*;
use crate::constants::nav::MENU_HEIGHT;

use super::Content;

/// Grid columns and icons per row for `count` shortcuts
pub fn columns_and_per_row(count: usize) -> (u32, u32) {
    match count {
        0 => (DEFAULT_ICON_COLUMNS, MIN_ICONS_PER_ROW),
        c if c < MIN_ICONS_PER_ROW as usize => (c as u32, MIN_ICONS_PER_ROW),
        c if c > MAX_ICONS_PER_ROW as usize => (MAX_ICONS_PER_ROW, MAX_ICONS_PER_ROW),
        c => (c as u32, c as u32),
    }
}

/// Window width in pixels
pub fn width(content: &Content) -> u32 {
    let spacing = content.margin * SPACING_SCALE;
    2 * BORDER
        + 2 * spacing
        + content.icon_size * content.icons_per_row
        + spacing * content.icons_per_row.saturating_sub(1)
}

/// Window height in pixels, menu bar included
pub fn height(content: &Content, count: usize) -> u32 {
    let rows = rows(content.icons_per_row, count);
    let spacing = content.margin * SPACING_SCALE;
    BORDER
        .saturating_add(spacing.saturating_mul(rows.saturating_add(1)))
        .saturating_add(content.icon_size.saturating_mul(rows))
        .saturating_add(MENU_HEIGHT * SPACING_SCALE)
}

fn rows(icons_per_row: u32, count: usize) -> u32 {
    // Short grids still reserve one full row
    let count = count.max(MIN_ICONS_PER_ROW as usize);
    let per_row = icons_per_row.max(1) as usize;
    u32::try_from(count.div_ceil(per_row)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_and_per_row() {
        assert_eq!(columns_and_per_row(0), (1, 5));
        assert_eq!(columns_and_per_row(1), (1, 5));
        assert_eq!(columns_and_per_row(3), (3, 5));
        assert_eq!(columns_and_per_row(4), (4, 5));
        assert_eq!(columns_and_per_row(5), (5, 5));
        assert_eq!(columns_and_per_row(15), (15, 15));
        assert_eq!(columns_and_per_row(20), (20, 20));
        assert_eq!(columns_and_per_row(21), (20, 20));
        assert_eq!(columns_and_per_row(100), (20, 20));
    }

    #[test]
    fn test_width() {
        for count in [0, 1, 3, 5] {
            assert_eq!(width(&Content::new(count)), 282, "count={count}");
        }
        assert_eq!(width(&Content::new(15)), 802);
        assert_eq!(width(&Content::new(20)), 1062);
        assert_eq!(width(&Content::new(100)), 1062);
    }

    #[test]
    fn test_height() {
        for count in [0, 1, 3, 5, 15] {
            assert_eq!(height(&Content::new(count), count), 105, "count={count}");
        }
        assert_eq!(height(&Content::new(100), 100), 313);
        // 21 shortcuts wrap onto a second row of 20
        assert_eq!(height(&Content::new(21), 21), 157);
    }
}
