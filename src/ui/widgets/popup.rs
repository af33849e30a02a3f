//! Popup geometry for modal placements.

use crate::modal::{Placement, SizeHint};
use ratatui::layout::Rect;

const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 7;

/// Width and height percentages for a size hint.
///
pub fn percentages(size: SizeHint) -> (u16, u16) {
    match size {
        SizeHint::Small => (40, 30),
        SizeHint::Default | SizeHint::Medium => (60, 40),
        SizeHint::Large => (80, 70),
        SizeHint::Full => (100, 100),
    }
}

fn scaled(total: u16, percent: u16, min: u16) -> u16 {
    let value = (u32::from(total) * u32::from(percent) / 100) as u16;
    value.max(min).min(total)
}

fn centered(total_start: u16, total: u16, len: u16) -> u16 {
    total_start + (total - len) / 2
}

/// Return the area a modal occupies within `area`.
///
pub fn popup_area(placement: Placement, size: SizeHint, area: Rect) -> Rect {
    if placement == Placement::FullScreen || size == SizeHint::Full {
        return area;
    }
    let (percent_x, percent_y) = match placement {
        Placement::Popover => {
            let (x, y) = percentages(size);
            (x / 2, y / 2)
        }
        _ => percentages(size),
    };
    let width = scaled(area.width, percent_x, MIN_WIDTH);
    let height = scaled(area.height, percent_y, MIN_HEIGHT);

    match placement {
        Placement::Top => Rect::new(area.x, area.y, area.width, height),
        Placement::Bottom => Rect::new(area.x, area.bottom() - height, area.width, height),
        Placement::Left => Rect::new(
            area.x,
            centered(area.y, area.height, height),
            width,
            height,
        ),
        Placement::Right => Rect::new(
            area.right() - width,
            centered(area.y, area.height, height),
            width,
            height,
        ),
        Placement::SidePanel => Rect::new(area.right() - width, area.y, width, area.height),
        Placement::Default | Placement::Popover | Placement::FullScreen => Rect::new(
            centered(area.x, area.width, width),
            centered(area.y, area.height, height),
            width,
            height,
        ),
    }
}
