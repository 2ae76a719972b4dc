//! Rendering layer: grid units in, terminal cells out.
//!
//! [`UiFrame`] clamps every draw call to the visible buffer, so arrangements
//! taller or wider than the terminal clip instead of panicking. Panel
//! geometry arrives in grid units from the layout store; [`cell_rect`] is
//! the single place the column/row axes are converted to cells, using the
//! same unit width the interaction controller divides motion deltas by.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Widget};

use crate::constants::{PAD_LEFT, ROW_HEIGHT, STATUS_BAR_HEIGHT};
use crate::content;
use crate::interact::{HandleMap, grid_unit_width};
use crate::layout::{PanelId, PanelLayout};
use crate::store::LayoutState;
use crate::theme;

/// Wrapper around the frame buffer that clips all drawing to the visible
/// area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Build directly from an area and buffer, for offscreen rendering.
    pub(crate) fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        let clipped = area.intersection(self.area);
        if clipped.width > 0 && clipped.height > 0 {
            widget.render(clipped, self.buffer);
        }
    }
}

pub fn truncate_to_width(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

pub fn safe_set_string(buffer: &mut Buffer, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let text = truncate_to_width(text, usize::from(max_x - x));
    buffer.set_string(x, y, text, style);
}

/// The region panels are laid out in: everything above the status bar.
pub fn dashboard_viewport(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.saturating_sub(STATUS_BAR_HEIGHT),
    }
}

/// Convert one panel's grid placement to a cell rect.
///
/// Both edges are independently rounded against the unit width so panels in
/// adjacent columns stay flush instead of accumulating rounding drift.
pub fn cell_rect(layout: &PanelLayout, viewport: Rect) -> Rect {
    let unit = grid_unit_width(viewport.width);
    let x0 = (f64::from(layout.x) * unit).round() as u16;
    let x1 = (f64::from(layout.x + layout.w) * unit).round() as u16;
    Rect {
        x: viewport.x.saturating_add(PAD_LEFT).saturating_add(x0),
        y: viewport
            .y
            .saturating_add(layout.y.saturating_mul(ROW_HEIGHT)),
        width: x1.saturating_sub(x0).max(1),
        height: layout.h.saturating_mul(ROW_HEIGHT),
    }
}

/// Painting order: larger panels first so the full-width map never buries
/// the small panels the generator overlays on it; the panel under an active
/// gesture always paints last (topmost).
pub fn draw_order(state: &LayoutState, active: Option<PanelId>) -> Vec<PanelLayout> {
    let mut panels: Vec<PanelLayout> = state.panels().values().copied().collect();
    panels.sort_by(|a, b| {
        let area_a = u32::from(a.w) * u32::from(a.h);
        let area_b = u32::from(b.w) * u32::from(b.h);
        area_b.cmp(&area_a).then(a.id.cmp(&b.id))
    });
    if let Some(active) = active
        && let Some(position) = panels.iter().position(|panel| panel.id == active)
    {
        let panel = panels.remove(position);
        panels.push(panel);
    }
    panels
}

/// Rebuild the gesture handle table for this frame.
///
/// Registration order matches painting order; hit-testing walks the table
/// in reverse, so the topmost panel's handles win an overlap. The title row
/// is the drag handle, the bottom-right corner cell the resize handle.
pub fn register_handles(
    state: &LayoutState,
    viewport: Rect,
    active: Option<PanelId>,
    handles: &mut HandleMap,
) {
    handles.begin_frame();
    for panel in draw_order(state, active) {
        let rect = cell_rect(&panel, viewport);
        handles.register_drag(
            panel.id,
            Rect {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: 1,
            },
        );
        handles.register_resize(
            panel.id,
            Rect {
                x: rect.x.saturating_add(rect.width).saturating_sub(1),
                y: rect.y.saturating_add(rect.height).saturating_sub(1),
                width: 1,
                height: 1,
            },
        );
    }
}

pub fn render_dashboard(
    frame: &mut UiFrame<'_>,
    state: &LayoutState,
    handles: &mut HandleMap,
    active: Option<PanelId>,
) {
    let area = frame.area();
    let viewport = dashboard_viewport(area);
    register_handles(state, viewport, active, handles);
    for panel in draw_order(state, active) {
        let focused = active == Some(panel.id);
        render_panel(frame, &panel, cell_rect(&panel, viewport), focused);
    }
    render_status_bar(frame, area);
}

fn render_panel(frame: &mut UiFrame<'_>, panel: &PanelLayout, rect: Rect, focused: bool) {
    let border_fg = if focused {
        theme::border_active_fg()
    } else {
        theme::border_fg()
    };
    frame.render_widget(Clear, rect);
    let block = Block::bordered()
        .title(panel.id.label())
        .border_style(Style::default().fg(border_fg))
        .title_style(
            Style::default()
                .fg(theme::title_fg())
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, rect);

    let frame_area = frame.area();
    let buffer = frame.buffer_mut();
    let bounds = rect.intersection(frame_area);
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }

    // body lines inside the border
    let inner_x = rect.x.saturating_add(1);
    let inner_width = rect.width.saturating_sub(2);
    let bottom = rect.y.saturating_add(rect.height).saturating_sub(1);
    for (row, line) in content::body(panel.id).iter().enumerate() {
        let y = rect.y.saturating_add(1).saturating_add(row as u16);
        if y >= bottom {
            break;
        }
        let style = Style::default().fg(body_color(line));
        let text = truncate_to_width(line, usize::from(inner_width));
        safe_set_string(buffer, bounds, inner_x, y, &text, style);
    }

    // resize grip in the bottom-right corner
    let grip_x = rect.x.saturating_add(rect.width).saturating_sub(1);
    if crate::layout::rect_contains(bounds, grip_x, bottom)
        && let Some(cell) = buffer.cell_mut((grip_x, bottom))
    {
        cell.set_symbol("◢");
        cell.set_style(Style::default().fg(if focused {
            theme::border_active_fg()
        } else {
            theme::resize_grip_fg()
        }));
    }
}

fn body_color(line: &str) -> ratatui::style::Color {
    if line.contains('▲') {
        theme::up_fg()
    } else if line.contains('▼') {
        theme::down_fg()
    } else {
        theme::body_fg()
    }
}

fn render_status_bar(frame: &mut UiFrame<'_>, area: Rect) {
    if area.height < STATUS_BAR_HEIGHT {
        return;
    }
    let bar = Rect {
        x: area.x,
        y: area.y.saturating_add(area.height).saturating_sub(1),
        width: area.width,
        height: STATUS_BAR_HEIGHT,
    };
    let buffer = frame.buffer_mut();
    let style = Style::default()
        .bg(theme::status_bar_bg())
        .fg(theme::status_bar_fg());
    for x in bar.x..bar.x.saturating_add(bar.width) {
        if let Some(cell) = buffer.cell_mut((x, bar.y)) {
            cell.set_symbol(" ");
            cell.set_style(style);
        }
    }
    const PKG_NAME: &str = env!("CARGO_PKG_NAME");
    const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
    let label = format!(" {PKG_NAME} {PKG_VERSION}");
    safe_set_string(buffer, bar, bar.x, bar.y, &label, style);

    let hints = "drag title to move · drag ◢ to resize · r reset · q quit ";
    let hints_width = hints.chars().count() as u16;
    if hints_width < bar.width {
        let start = bar.x.saturating_add(bar.width).saturating_sub(hints_width);
        // keep the hints clear of the left label
        if start > bar.x.saturating_add(label.chars().count() as u16) {
            safe_set_string(buffer, bar, start, bar.y, hints, style);
        }
    }
}
