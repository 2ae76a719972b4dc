//! Shared crate-wide constants.

/// Terminal rows occupied by one grid row.
///
/// The column axis is proportional to the viewport; the row axis is fixed,
/// so vertical drag/resize deltas quantize against this value.
pub const ROW_HEIGHT: u16 = 3;

/// Total horizontal inset (left + right) subtracted from the viewport width
/// before dividing it into grid columns.
pub const H_PADDING: u16 = 2;

/// Columns of the left inset; the first grid column starts here.
pub const PAD_LEFT: u16 = 1;

/// Smallest width/height (in grid units) a resize gesture can reach.
pub const MIN_PANEL_SPAN: u16 = 2;

/// Rows reserved for the bottom status bar.
pub const STATUS_BAR_HEIGHT: u16 = 1;
