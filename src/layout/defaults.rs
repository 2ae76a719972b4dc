//! Deterministic default arrangement.
//!
//! A single left-to-right, top-to-bottom pass over the panel enumeration.
//! Two panels are special-cased in place (never hoisted): the market map is
//! full-width, and the USD/JPY ticker keeps a fixed 3x2 footprint.

use super::{LayoutMap, PanelId, PanelLayout};

/// Grid rows taken by the full-width map panel.
pub const MAP_HEIGHT: u16 = 4;
/// Fixed footprint of the USD/JPY ticker.
pub const TICKER_SIZE: (u16, u16) = (3, 2);
/// Footprint of every other panel.
pub const DEFAULT_SIZE: (u16, u16) = (3, 3);

/// Produce the complete default mapping for `ids` against `cols` columns.
///
/// Pure and deterministic: same inputs, same mapping. The wrap check
/// (`x + w > cols`) assumes the default width divides the column count; it
/// does for the fixed 12-column grid and is not meant to generalize.
pub fn default_layout(ids: &[PanelId], cols: u16) -> LayoutMap {
    let mut panels = LayoutMap::new();
    let mut x = 0u16;
    let mut y = 0u16;
    for &id in ids {
        match id {
            PanelId::Map => {
                panels.insert(
                    id,
                    PanelLayout {
                        id,
                        x: 0,
                        y,
                        w: cols,
                        h: MAP_HEIGHT,
                    },
                );
                y += MAP_HEIGHT;
                x = 0;
            }
            PanelId::UsdJpy => {
                let (w, h) = TICKER_SIZE;
                panels.insert(id, PanelLayout { id, x, y, w, h });
                // no forced row wrap for the ticker
                x += w;
            }
            _ => {
                let (w, h) = DEFAULT_SIZE;
                if x + w > cols {
                    x = 0;
                    y += h;
                }
                panels.insert(id, PanelLayout { id, x, y, w, h });
                x += w;
            }
        }
    }
    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GRID_COLS;

    #[test]
    fn generator_is_deterministic() {
        let a = default_layout(&PanelId::ALL, GRID_COLS);
        let b = default_layout(&PanelId::ALL, GRID_COLS);
        assert_eq!(a, b);
    }

    #[test]
    fn generator_is_total() {
        let panels = default_layout(&PanelId::ALL, GRID_COLS);
        assert_eq!(panels.len(), PanelId::ALL.len());
        for id in PanelId::ALL {
            assert!(panels.contains_key(&id), "{id:?} missing from defaults");
        }
    }

    #[test]
    fn specials_keep_their_enumeration_position() {
        let panels = default_layout(&PanelId::ALL, GRID_COLS);
        let ticker = panels[&PanelId::UsdJpy];
        assert_eq!((ticker.x, ticker.y), (0, 0));
        assert_eq!((ticker.w, ticker.h), TICKER_SIZE);

        // The map follows the ticker, so it lands on the row the cursor is
        // still on and resets the cursor below itself.
        let map = panels[&PanelId::Map];
        assert_eq!((map.x, map.y), (0, 0));
        assert_eq!((map.w, map.h), (GRID_COLS, MAP_HEIGHT));

        // First default-sized panel starts on the row the map cleared.
        let eur = panels[&PanelId::EurUsd];
        assert_eq!((eur.x, eur.y), (0, MAP_HEIGHT));
    }

    #[test]
    fn default_panels_never_cross_the_right_edge() {
        let panels = default_layout(&PanelId::ALL, GRID_COLS);
        for layout in panels.values() {
            assert!(
                layout.x + layout.w <= GRID_COLS,
                "{:?} overflows: x={} w={}",
                layout.id,
                layout.x,
                layout.w
            );
        }
    }

    #[test]
    fn cursor_wraps_instead_of_reaching_the_edge() {
        let panels = default_layout(&PanelId::ALL, GRID_COLS);
        // EurUsd, GbpUsd, Indices, Commodities fill row 4 at x = 0,3,6,9;
        // Crypto must wrap to the next row rather than start at x = 12.
        assert_eq!(panels[&PanelId::Commodities].x, 9);
        let crypto = panels[&PanelId::Crypto];
        assert_eq!((crypto.x, crypto.y), (0, MAP_HEIGHT + 3));
        assert_eq!(panels[&PanelId::News].x, 3);
    }

    #[test]
    fn placement_follows_enumeration_order() {
        // Swapping two default-sized panels swaps their slots and nothing else.
        let reordered = [
            PanelId::UsdJpy,
            PanelId::Map,
            PanelId::GbpUsd,
            PanelId::EurUsd,
            PanelId::Indices,
            PanelId::Commodities,
            PanelId::Crypto,
            PanelId::News,
        ];
        let base = default_layout(&PanelId::ALL, GRID_COLS);
        let swapped = default_layout(&reordered, GRID_COLS);
        assert_eq!(swapped[&PanelId::GbpUsd].x, base[&PanelId::EurUsd].x);
        assert_eq!(swapped[&PanelId::EurUsd].x, base[&PanelId::GbpUsd].x);
        assert_eq!(swapped[&PanelId::Indices], base[&PanelId::Indices]);
    }
}
