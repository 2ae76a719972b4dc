//! Canonical grid coordinate model.
//!
//! Panel geometry is expressed in integer grid units only: `x`/`y` are the
//! zero-based column/row origin, `w`/`h` the span in cells of a 12-column
//! grid. Conversion to terminal cells happens at the interaction/render
//! boundary, never here.

pub mod defaults;

use std::collections::BTreeMap;

use ratatui::prelude::Rect;
use serde::{Deserialize, Serialize};

/// Fixed column count of the dashboard grid.
pub const GRID_COLS: u16 = 12;

/// The closed set of panel kinds, in placement order.
///
/// Order matters: the default-layout generator walks [`PanelId::ALL`] as a
/// single linear pass, so reordering variants changes the generated
/// arrangement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    UsdJpy,
    Map,
    EurUsd,
    GbpUsd,
    Indices,
    Commodities,
    Crypto,
    News,
}

impl PanelId {
    pub const ALL: [PanelId; 8] = [
        PanelId::UsdJpy,
        PanelId::Map,
        PanelId::EurUsd,
        PanelId::GbpUsd,
        PanelId::Indices,
        PanelId::Commodities,
        PanelId::Crypto,
        PanelId::News,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelId::UsdJpy => "USD/JPY",
            PanelId::Map => "Market Map",
            PanelId::EurUsd => "EUR/USD",
            PanelId::GbpUsd => "GBP/USD",
            PanelId::Indices => "Indices",
            PanelId::Commodities => "Commodities",
            PanelId::Crypto => "Crypto",
            PanelId::News => "Headlines",
        }
    }
}

/// Placement of one panel on the grid.
///
/// `x + w` is not required to stay within [`GRID_COLS`] by construction; the
/// interaction controller clamps at gesture time and the generator never
/// emits an out-of-bound column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub id: PanelId,
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// Full arrangement, one entry per known panel.
///
/// A `BTreeMap` keeps iteration deterministic, which the renderer and the
/// persisted blob both rely on.
pub type LayoutMap = BTreeMap<PanelId, PanelLayout>;

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_ids_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&PanelId::UsdJpy).unwrap(),
            "\"usdjpy\""
        );
        assert_eq!(serde_json::to_string(&PanelId::Map).unwrap(), "\"map\"");
        assert_eq!(
            serde_json::to_string(&PanelId::Commodities).unwrap(),
            "\"commodities\""
        );
    }

    #[test]
    fn unknown_panel_id_fails_to_parse() {
        assert!(serde_json::from_str::<PanelId>("\"vix\"").is_err());
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect {
            x: 1,
            y: 1,
            width: 3,
            height: 2,
        };
        assert!(rect_contains(r, 1, 1));
        assert!(rect_contains(r, 3, 2));
        assert!(!rect_contains(r, 4, 1));
        assert!(!rect_contains(r, 1, 3));
        let empty = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 2,
        };
        assert!(!rect_contains(empty, 0, 0));
    }
}
