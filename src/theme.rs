use ratatui::style::Color;

// Centralized theme colors, kept as small helpers so the palette can be
// swapped in one place.

pub fn border_fg() -> Color {
    Color::DarkGray
}

pub fn border_active_fg() -> Color {
    Color::Yellow
}

pub fn title_fg() -> Color {
    Color::White
}

pub fn body_fg() -> Color {
    Color::Gray
}

pub fn up_fg() -> Color {
    Color::Green
}

pub fn down_fg() -> Color {
    Color::Red
}

pub fn resize_grip_fg() -> Color {
    Color::DarkGray
}

pub fn status_bar_bg() -> Color {
    Color::DarkGray
}

pub fn status_bar_fg() -> Color {
    Color::Black
}
