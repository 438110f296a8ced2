//! Frame-level visual effects.

use ratatui::layout::Rect;

/// Translate content vertically by `rows` (negative is up) inside `base`.
///
/// Returns the area to render into and the number of leading content rows to
/// scroll past, so content moving up clips at the top edge instead of being
/// pushed outside the buffer.
#[must_use]
pub fn apply_drag_offset(base: Rect, rows: i32) -> (Rect, u16) {
    if rows >= 0 {
        let shift = rows.min(i32::from(base.height)) as u16;
        let area = Rect {
            y: base.y + shift,
            height: base.height - shift,
            ..base
        };
        (area, 0)
    } else {
        let scroll = rows.unsigned_abs().min(u32::from(u16::MAX)) as u16;
        (base, scroll)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::apply_drag_offset;

    #[test]
    fn downward_drag_shifts_area() {
        let base = Rect::new(0, 2, 10, 20);
        assert_eq!(apply_drag_offset(base, 3), (Rect::new(0, 5, 10, 17), 0));
        assert_eq!(apply_drag_offset(base, 50), (Rect::new(0, 22, 10, 0), 0));
    }

    #[test]
    fn upward_drag_scrolls_content() {
        let base = Rect::new(0, 2, 10, 20);
        assert_eq!(apply_drag_offset(base, -4), (base, 4));
        assert_eq!(apply_drag_offset(base, 0), (base, 0));
    }
}
