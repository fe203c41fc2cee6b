use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header, body, help bar.
pub struct Page {
    pub header: Rect,
    pub body: Rect,
    pub help: Rect,
}

pub fn page_layout(size: Rect, header_height: u16) -> Page {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(size);
    Page { header: chunks[0], body: chunks[1], help: chunks[2] }
}

/// Split `area` into a fixed-height top part and the rest.
pub fn split_top(area: Rect, top: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn centered_rect_abs(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width.saturating_sub(2));
    let h = height.min(r.height.saturating_sub(2));
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect { x, y, width: w, height: h }
}

/// Area anchored to the top-right corner of `r`, clipped to fit.
pub fn top_right_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    Rect { x: r.x + r.width - w, y: r.y, width: w, height: h }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlays_never_leave_the_frame() {
        let frame = Rect::new(0, 0, 40, 10);
        let c = centered_rect_abs(100, 100, frame);
        assert!(c.right() <= frame.right() && c.bottom() <= frame.bottom());
        let t = top_right_rect(60, 4, frame);
        assert_eq!((t.x, t.width), (0, 40));
        let t = top_right_rect(20, 4, frame);
        assert_eq!(t.right(), frame.right());
    }
}
