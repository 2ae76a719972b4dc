//! Placeholder bodies for the data panels.
//!
//! The panels that fetch live market data are collaborators outside the
//! layout core; they consume a panel identifier and render whatever they
//! hold. Here each kind carries a static snapshot so the dashboard has
//! something to show without any networking.

use crate::layout::PanelId;

/// Body lines for one panel kind.
pub fn body(id: PanelId) -> &'static [&'static str] {
    match id {
        PanelId::UsdJpy => &["157.24", "▲ +0.31%", "bid 157.22 / ask 157.26"],
        PanelId::Map => &[
            "● TOK open     ● LON open     ● NYC pre",
            "● SYD closed   ● FRA open     ● CHI pre",
            "session overlap: LON/NYC in 2h 10m",
        ],
        PanelId::EurUsd => &["1.0842", "▼ -0.12%", "bid 1.0841 / ask 1.0843"],
        PanelId::GbpUsd => &["1.2710", "▲ +0.08%", "bid 1.2709 / ask 1.2712"],
        PanelId::Indices => &["SPX   5 312 ▲", "NDX  18 940 ▲", "N225 39 120 ▼"],
        PanelId::Commodities => &["XAU 2 412.6 ▲", "WTI    78.4 ▼", "XAG    30.9 ▲"],
        PanelId::Crypto => &["BTC 67 420 ▲", "ETH  3 512 ▲"],
        PanelId::News => &[
            "BoJ holds rates; yen slips",
            "ECB signals June cut",
            "Oil steadies after draw",
        ],
    }
}
