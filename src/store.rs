//! Layout state container: the single source of truth for panel geometry.
//!
//! One `LayoutStore` exists per session. It is seeded from storage when a
//! saved arrangement exists and parses, otherwise from the default-layout
//! generator. All mutation flows through its update operations; each one
//! swaps in a freshly built mapping (old handles keep the old mapping, so
//! `Arc::ptr_eq` detects change), schedules a debounced save, and notifies
//! observers synchronously before returning.

use std::sync::Arc;
use std::time::Instant;

use crate::layout::{GRID_COLS, LayoutMap, PanelId, PanelLayout, defaults::default_layout};
use crate::persist::{DebouncedSave, LayoutStorage};

/// Observable snapshot of the current arrangement.
#[derive(Debug, Clone)]
pub struct LayoutState {
    panels: Arc<LayoutMap>,
    grid_cols: u16,
    initialized: bool,
}

impl LayoutState {
    pub fn panels(&self) -> &Arc<LayoutMap> {
        &self.panels
    }

    pub fn grid_cols(&self) -> u16 {
        self.grid_cols
    }

    /// True once the rendering surface exists. Consumers that query live
    /// viewport geometry must not act before this is set.
    pub fn initialized(&self) -> bool {
        self.initialized
    }
}

/// Partial geometry patch; the one merge primitive behind every update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutPatch {
    pub x: Option<u16>,
    pub y: Option<u16>,
    pub w: Option<u16>,
    pub h: Option<u16>,
}

impl LayoutPatch {
    pub fn position(x: u16, y: u16) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(w: u16, h: u16) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    fn apply(self, mut layout: PanelLayout) -> PanelLayout {
        if let Some(x) = self.x {
            layout.x = x;
        }
        if let Some(y) = self.y {
            layout.y = y;
        }
        if let Some(w) = self.w {
            layout.w = w;
        }
        if let Some(h) = self.h {
            layout.h = h;
        }
        layout
    }
}

type Observer = Box<dyn FnMut(&LayoutState)>;

pub struct LayoutStore<S: LayoutStorage> {
    state: LayoutState,
    storage: S,
    debounce: DebouncedSave,
    observers: Vec<Observer>,
}

impl<S: LayoutStorage> LayoutStore<S> {
    /// Seed from storage if a saved arrangement exists, else from defaults.
    pub fn new(mut storage: S) -> Self {
        let panels = match storage.load() {
            Some(saved) => {
                tracing::debug!(panels = saved.len(), "restored saved layout");
                saved
            }
            None => default_layout(&PanelId::ALL, GRID_COLS),
        };
        Self {
            state: LayoutState {
                panels: Arc::new(panels),
                grid_cols: GRID_COLS,
                initialized: false,
            },
            storage,
            debounce: DebouncedSave::default(),
            observers: Vec::new(),
        }
    }

    /// Mark the rendering surface ready. Idempotent; observers are told
    /// about the transition exactly once.
    pub fn init(&mut self) {
        if self.state.initialized {
            return;
        }
        self.state.initialized = true;
        self.notify();
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Current geometry of one panel; absent only for an identifier the
    /// mapping does not carry (e.g. restored from a blob that predates it).
    pub fn panel_layout(&self, id: PanelId) -> Option<PanelLayout> {
        self.state.panels.get(&id).copied()
    }

    /// Register an observer. Every successful mutation invokes all current
    /// observers with the new state before the mutating call returns.
    pub fn subscribe(&mut self, observer: impl FnMut(&LayoutState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn update_panel_position(&mut self, id: PanelId, x: u16, y: u16) {
        self.update_panel_layout(id, LayoutPatch::position(x, y));
    }

    pub fn update_panel_size(&mut self, id: PanelId, w: u16, h: u16) {
        self.update_panel_layout(id, LayoutPatch::size(w, h));
    }

    /// Merge `patch` into the panel's entry. Unknown identifiers are a
    /// silent no-op: no key is created, nothing is saved or published.
    pub fn update_panel_layout(&mut self, id: PanelId, patch: LayoutPatch) {
        let Some(current) = self.state.panels.get(&id).copied() else {
            tracing::debug!(?id, "update for panel absent from layout; ignoring");
            return;
        };
        let mut panels = (*self.state.panels).clone();
        panels.insert(id, patch.apply(current));
        self.state.panels = Arc::new(panels);
        self.debounce.schedule(Instant::now());
        self.notify();
    }

    /// Clear persisted storage and replace the arrangement with freshly
    /// generated defaults, immediately and without debounce. Storage stays
    /// empty until the next save.
    pub fn reset_layout(&mut self) {
        tracing::debug!("resetting layout to defaults");
        self.storage.clear();
        self.debounce.cancel();
        self.state.panels = Arc::new(default_layout(&PanelId::ALL, GRID_COLS));
        self.state.initialized = true;
        self.notify();
    }

    /// Write the current state immediately, cancelling any pending debounced
    /// save so a stale write cannot land after this one.
    pub fn save_now(&mut self) {
        self.debounce.cancel();
        self.storage.save(&self.state.panels);
    }

    /// Pump the debounce deadline; called from the event loop on idle ticks.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire(now) {
            self.storage.save(&self.state.panels);
        }
    }

    fn notify(&mut self) {
        let state = &self.state;
        for observer in &mut self.observers {
            observer(state);
        }
    }
}
