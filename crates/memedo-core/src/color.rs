use serde::{Deserialize, Serialize};
use std::fmt;

/// Caption text color. The catalog only ever draws fully opaque black or white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    #[default]
    Black,
    White,
}

impl TextColor {
    /// Convert to an opaque RGBA u8 quadruple.
    pub const fn to_rgba8(self) -> [u8; 4] {
        match self {
            TextColor::Black => [0, 0, 0, 255],
            TextColor::White => [255, 255, 255, 255],
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextColor::Black => write!(f, "black"),
            TextColor::White => write!(f, "white"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_rgba() {
        assert_eq!(TextColor::Black.to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(TextColor::White.to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(TextColor::White.to_string(), "white");
        assert_eq!(TextColor::default(), TextColor::Black);
    }
}
