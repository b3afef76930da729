//! Layout helpers shared by the UI components.

use ratatui::layout::Rect;

/// Gap kept between a toast and the container edge.
const TOAST_MARGIN: u16 = 1;

/// Area for a toast of `width` x `height` anchored to the top-right corner of
/// `container`, starting no higher than `top`.
///
/// The result is clipped to the container; a zero-height rect means there is
/// no room left.
pub fn toast_rect(container: Rect, width: u16, height: u16, top: u16) -> Rect {
    let width = width.min(container.width.saturating_sub(TOAST_MARGIN * 2));
    let x = container.right().saturating_sub(width + TOAST_MARGIN).max(container.x);
    let y = top.max(container.y + TOAST_MARGIN);
    let height = height.min(container.bottom().saturating_sub(y));
    Rect::new(x, y, width, height)
}
