//! Pointer-driven drag and resize gestures.
//!
//! Two independent tracks, each `Idle -> Active -> Idle`. A gesture starts
//! on mouse-down over a registered handle, records the panel's geometry at
//! that instant, converts every subsequent motion delta from terminal cells
//! into grid units, clamps, and pushes the result into the store for live
//! feedback. Release commits the final state with an immediate save.
//!
//! All cell math lives here; the layout model never sees cells.

use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::prelude::Rect;

use crate::constants::{H_PADDING, MIN_PANEL_SPAN, ROW_HEIGHT};
use crate::layout::{GRID_COLS, PanelId, rect_contains};
use crate::persist::LayoutStorage;
use crate::store::LayoutStore;

/// Width of one grid column in terminal cells, for the given viewport.
pub fn grid_unit_width(viewport_width: u16) -> f64 {
    f64::from(viewport_width.saturating_sub(H_PADDING)) / f64::from(GRID_COLS)
}

/// Per-frame registration table mapping screen rects to panels.
///
/// The renderer rebuilds this every frame in draw order; hit-testing walks
/// it in reverse so the topmost panel's handle wins.
#[derive(Debug, Default)]
pub struct HandleMap {
    drag: Vec<(PanelId, Rect)>,
    resize: Vec<(PanelId, Rect)>,
}

impl HandleMap {
    pub fn begin_frame(&mut self) {
        self.drag.clear();
        self.resize.clear();
    }

    pub fn register_drag(&mut self, id: PanelId, rect: Rect) {
        self.drag.push((id, rect));
    }

    pub fn register_resize(&mut self, id: PanelId, rect: Rect) {
        self.resize.push((id, rect));
    }

    fn drag_at(&self, column: u16, row: u16) -> Option<PanelId> {
        self.drag
            .iter()
            .rev()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(id, _)| *id)
    }

    fn resize_at(&self, column: u16, row: u16) -> Option<PanelId> {
        self.resize
            .iter()
            .rev()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(id, _)| *id)
    }
}

#[derive(Debug, Clone, Copy)]
struct DragGesture {
    id: PanelId,
    start_col: u16,
    start_row: u16,
    start_x: u16,
    start_y: u16,
}

#[derive(Debug, Clone, Copy)]
struct ResizeGesture {
    id: PanelId,
    start_col: u16,
    start_row: u16,
    start_w: u16,
    start_h: u16,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    drag: Option<DragGesture>,
    resize: Option<ResizeGesture>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The panel under an active gesture, if any; the renderer draws it on
    /// top.
    pub fn active_panel(&self) -> Option<PanelId> {
        self.resize
            .map(|gesture| gesture.id)
            .or_else(|| self.drag.map(|gesture| gesture.id))
    }

    /// Route one mouse event. Returns true when the event belonged to a
    /// gesture.
    ///
    /// Down over a resize handle starts a resize and suppresses drag; Down
    /// over a drag handle starts a drag. Motion with no active gesture is a
    /// no-op. Release anywhere ends the gesture and force-flushes the
    /// committed state.
    pub fn handle_mouse_event<S: LayoutStorage>(
        &mut self,
        mouse: &MouseEvent,
        handles: &HandleMap,
        viewport_width: u16,
        store: &mut LayoutStore<S>,
    ) -> bool {
        match mouse.kind {
            MouseEventKind::Down(_) => self.gesture_down(mouse, handles, store),
            MouseEventKind::Drag(_) => self.gesture_move(mouse, viewport_width, store),
            MouseEventKind::Up(_) => self.gesture_up(store),
            _ => false,
        }
    }

    fn gesture_down<S: LayoutStorage>(
        &mut self,
        mouse: &MouseEvent,
        handles: &HandleMap,
        store: &mut LayoutStore<S>,
    ) -> bool {
        if let Some(id) = handles.resize_at(mouse.column, mouse.row)
            && let Some(layout) = store.panel_layout(id)
        {
            tracing::debug!(?id, "resize gesture start");
            self.resize = Some(ResizeGesture {
                id,
                start_col: mouse.column,
                start_row: mouse.row,
                start_w: layout.w,
                start_h: layout.h,
            });
            return true;
        }
        if let Some(id) = handles.drag_at(mouse.column, mouse.row)
            && let Some(layout) = store.panel_layout(id)
        {
            tracing::debug!(?id, "drag gesture start");
            self.drag = Some(DragGesture {
                id,
                start_col: mouse.column,
                start_row: mouse.row,
                start_x: layout.x,
                start_y: layout.y,
            });
            return true;
        }
        false
    }

    fn gesture_move<S: LayoutStorage>(
        &mut self,
        mouse: &MouseEvent,
        viewport_width: u16,
        store: &mut LayoutStore<S>,
    ) -> bool {
        if let Some(gesture) = self.resize {
            let (dc, dr) = grid_delta(mouse, gesture.start_col, gesture.start_row, viewport_width);
            let w = (i32::from(gesture.start_w) + dc)
                .clamp(i32::from(MIN_PANEL_SPAN), i32::from(GRID_COLS)) as u16;
            let h = (i32::from(gesture.start_h) + dr).max(i32::from(MIN_PANEL_SPAN)) as u16;
            store.update_panel_size(gesture.id, w, h);
            return true;
        }
        if let Some(gesture) = self.drag {
            let (dc, dr) = grid_delta(mouse, gesture.start_col, gesture.start_row, viewport_width);
            let x = (i32::from(gesture.start_x) + dc).clamp(0, i32::from(GRID_COLS) - 1) as u16;
            let y = (i32::from(gesture.start_y) + dr).max(0) as u16;
            store.update_panel_position(gesture.id, x, y);
            return true;
        }
        false
    }

    fn gesture_up<S: LayoutStorage>(&mut self, store: &mut LayoutStore<S>) -> bool {
        let drag = self.drag.take();
        let resize = self.resize.take();
        if drag.is_none() && resize.is_none() {
            return false;
        }
        if let Some(gesture) = drag {
            tracing::debug!(id = ?gesture.id, "drag gesture end");
        }
        if let Some(gesture) = resize {
            tracing::debug!(id = ?gesture.id, "resize gesture end");
        }
        store.save_now();
        true
    }
}

/// Convert a cell-space motion delta into grid units, rounding to the
/// nearest whole unit on each axis.
fn grid_delta(mouse: &MouseEvent, start_col: u16, start_row: u16, viewport_width: u16) -> (i32, i32) {
    let unit = grid_unit_width(viewport_width);
    let dx = f64::from(mouse.column) - f64::from(start_col);
    let dy = f64::from(mouse.row) - f64::from(start_row);
    let dc = if unit > 0.0 {
        (dx / unit).round() as i32
    } else {
        0
    };
    let dr = (dy / f64::from(ROW_HEIGHT)).round() as i32;
    (dc, dr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMap;
    use crate::store::LayoutStore;
    use crossterm::event::{KeyModifiers, MouseButton};

    struct NullStorage;

    impl LayoutStorage for NullStorage {
        fn load(&mut self) -> Option<LayoutMap> {
            None
        }
        fn save(&mut self, _panels: &LayoutMap) {}
        fn clear(&mut self) {}
    }

    // 86 columns puts one grid unit at exactly 7 cells.
    const WIDTH: u16 = 86;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn down(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn drag_to(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
    }

    fn up(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Up(MouseButton::Left), column, row)
    }

    fn handle_rect(x: u16, y: u16, width: u16) -> Rect {
        Rect {
            x,
            y,
            width,
            height: 1,
        }
    }

    fn fixture() -> (InteractionController, HandleMap, LayoutStore<NullStorage>) {
        let mut handles = HandleMap::default();
        // usdjpy drag handle along its title row, resize corner at its
        // bottom-right cell (grid 3x2 => 21x6 cells at unit width 7).
        handles.register_drag(PanelId::UsdJpy, handle_rect(1, 0, 21));
        handles.register_resize(PanelId::UsdJpy, handle_rect(21, 5, 1));
        (
            InteractionController::new(),
            handles,
            LayoutStore::new(NullStorage),
        )
    }

    #[test]
    fn motion_without_a_gesture_is_ignored() {
        let (mut controller, handles, mut store) = fixture();
        assert!(!controller.handle_mouse_event(&drag_to(40, 10), &handles, WIDTH, &mut store));
        assert!(!controller.handle_mouse_event(&up(40, 10), &handles, WIDTH, &mut store));
        assert_eq!(store.panel_layout(PanelId::UsdJpy).unwrap().x, 0);
    }

    #[test]
    fn down_off_any_handle_starts_nothing() {
        let (mut controller, handles, mut store) = fixture();
        assert!(!controller.handle_mouse_event(&down(50, 20), &handles, WIDTH, &mut store));
        assert!(controller.active_panel().is_none());
    }

    #[test]
    fn drag_moves_by_whole_grid_units() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(2, 0), &handles, WIDTH, &mut store);
        // 7 cells right and 3 cells down is exactly one unit each way
        controller.handle_mouse_event(&drag_to(9, 3), &handles, WIDTH, &mut store);
        let ticker = store.panel_layout(PanelId::UsdJpy).unwrap();
        assert_eq!((ticker.x, ticker.y), (1, 1));
        assert_eq!((ticker.w, ticker.h), (3, 2));
    }

    #[test]
    fn sub_unit_motion_rounds_to_nearest() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(2, 0), &handles, WIDTH, &mut store);
        // 3 cells of a 7-cell unit rounds down to zero columns
        controller.handle_mouse_event(&drag_to(5, 0), &handles, WIDTH, &mut store);
        assert_eq!(store.panel_layout(PanelId::UsdJpy).unwrap().x, 0);
        // 4 of 7 rounds up
        controller.handle_mouse_event(&drag_to(6, 0), &handles, WIDTH, &mut store);
        assert_eq!(store.panel_layout(PanelId::UsdJpy).unwrap().x, 1);
    }

    #[test]
    fn drag_left_clamps_at_column_zero() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(10, 0), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&drag_to(0, 0), &handles, WIDTH, &mut store);
        assert_eq!(store.panel_layout(PanelId::UsdJpy).unwrap().x, 0);
    }

    #[test]
    fn drag_right_clamps_at_the_last_column() {
        let (mut controller, mut handles, mut store) = fixture();
        store.update_panel_position(PanelId::UsdJpy, 11, 0);
        handles.begin_frame();
        handles.register_drag(PanelId::UsdJpy, handle_rect(60, 0, 21));
        controller.handle_mouse_event(&down(62, 0), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&drag_to(85, 0), &handles, WIDTH, &mut store);
        assert_eq!(
            store.panel_layout(PanelId::UsdJpy).unwrap().x,
            GRID_COLS - 1
        );
    }

    #[test]
    fn drag_up_clamps_at_row_zero() {
        let (mut controller, mut handles, mut store) = fixture();
        store.update_panel_position(PanelId::UsdJpy, 0, 2);
        handles.begin_frame();
        handles.register_drag(PanelId::UsdJpy, handle_rect(1, 6, 21));
        controller.handle_mouse_event(&down(2, 6), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&drag_to(2, 0), &handles, WIDTH, &mut store);
        let ticker = store.panel_layout(PanelId::UsdJpy).unwrap();
        assert_eq!(ticker.y, 0);
    }

    #[test]
    fn resize_floors_at_the_minimum_span() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(21, 5), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&drag_to(0, 0), &handles, WIDTH, &mut store);
        let ticker = store.panel_layout(PanelId::UsdJpy).unwrap();
        assert_eq!((ticker.w, ticker.h), (MIN_PANEL_SPAN, MIN_PANEL_SPAN));
    }

    #[test]
    fn resize_width_ceils_at_the_column_count() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(21, 5), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&drag_to(85, 5), &handles, WIDTH, &mut store);
        assert_eq!(store.panel_layout(PanelId::UsdJpy).unwrap().w, GRID_COLS);
    }

    #[test]
    fn resize_height_grows_unbounded() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(21, 5), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&drag_to(21, 65), &handles, WIDTH, &mut store);
        assert_eq!(store.panel_layout(PanelId::UsdJpy).unwrap().h, 2 + 20);
    }

    #[test]
    fn resize_handle_wins_over_an_overlapping_drag_handle() {
        let (mut controller, mut handles, mut store) = fixture();
        // force an overlap: both handles claim the same cell
        handles.begin_frame();
        handles.register_drag(PanelId::UsdJpy, handle_rect(0, 0, 22));
        handles.register_resize(PanelId::UsdJpy, handle_rect(21, 0, 1));
        controller.handle_mouse_event(&down(21, 0), &handles, WIDTH, &mut store);
        assert!(controller.resize.is_some());
        assert!(controller.drag.is_none());
    }

    #[test]
    fn topmost_registration_wins_an_overlap() {
        let (mut controller, mut handles, mut store) = fixture();
        handles.begin_frame();
        // map's full-width title row registered first (drawn underneath),
        // usdjpy's on top of it
        handles.register_drag(PanelId::Map, handle_rect(1, 0, 84));
        handles.register_drag(PanelId::UsdJpy, handle_rect(1, 0, 21));
        controller.handle_mouse_event(&down(5, 0), &handles, WIDTH, &mut store);
        assert_eq!(controller.active_panel(), Some(PanelId::UsdJpy));
        controller.handle_mouse_event(&up(5, 0), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&down(50, 0), &handles, WIDTH, &mut store);
        assert_eq!(controller.active_panel(), Some(PanelId::Map));
    }

    #[test]
    fn release_ends_the_gesture_and_commits() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(2, 0), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&drag_to(9, 3), &handles, WIDTH, &mut store);
        assert!(controller.handle_mouse_event(&up(9, 3), &handles, WIDTH, &mut store));
        assert!(controller.active_panel().is_none());
        // further motion no longer moves the panel
        controller.handle_mouse_event(&drag_to(30, 12), &handles, WIDTH, &mut store);
        assert_eq!(store.panel_layout(PanelId::UsdJpy).unwrap().x, 1);
    }

    #[test]
    fn zero_delta_release_is_harmless() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(2, 0), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&up(2, 0), &handles, WIDTH, &mut store);
        let ticker = store.panel_layout(PanelId::UsdJpy).unwrap();
        assert_eq!((ticker.x, ticker.y, ticker.w, ticker.h), (0, 0, 3, 2));
    }

    #[test]
    fn second_down_during_a_gesture_takes_over_without_panic() {
        let (mut controller, handles, mut store) = fixture();
        controller.handle_mouse_event(&down(2, 0), &handles, WIDTH, &mut store);
        controller.handle_mouse_event(&down(5, 0), &handles, WIDTH, &mut store);
        assert_eq!(controller.active_panel(), Some(PanelId::UsdJpy));
        controller.handle_mouse_event(&up(5, 0), &handles, WIDTH, &mut store);
        assert!(controller.active_panel().is_none());
    }
}
