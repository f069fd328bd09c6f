// Theme - the one place colors are decided
use crate::domain::band::Band;
use crossterm::style::Color;

pub const TITLE: Color = Color::Cyan;
pub const STATUS: Color = Color::Yellow;
pub const NO_DATA: Color = Color::Red;

pub fn band_color(band: Band) -> Color {
    match band {
        Band::Cold => Color::Blue,
        Band::Comfortable => Color::Green,
        Band::Warm => Color::Yellow,
        Band::Hot => Color::Red,
    }
}

/// Color for a temperature value, used by every call site that shows one
pub fn temperature_color(value: f64) -> Color {
    band_color(Band::of(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_color() {
        assert_eq!(temperature_color(18.0), Color::Blue);
        assert_eq!(temperature_color(22.0), Color::Green);
        assert_eq!(temperature_color(27.5), Color::Yellow);
        assert_eq!(temperature_color(30.0), Color::Red);
    }
}
