//! Color theme selection.
//!
//! The theme only tells the renderer how to map elevation to color; nothing in
//! the sorting core reads it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorTheme {
    /// Blue lowlands through green to red peaks.
    #[default]
    Terrain,
    Grayscale,
    Heat,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 3] = [ColorTheme::Terrain, ColorTheme::Grayscale, ColorTheme::Heat];

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Terrain => ColorTheme::Grayscale,
            ColorTheme::Grayscale => ColorTheme::Heat,
            ColorTheme::Heat => ColorTheme::Terrain,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorTheme::Terrain => "terrain",
            ColorTheme::Grayscale => "grayscale",
            ColorTheme::Heat => "heat",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color theme: {0}")]
pub struct ParseThemeError(pub String);

impl FromStr for ColorTheme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terrain" => Ok(ColorTheme::Terrain),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(ColorTheme::Grayscale),
            "heat" => Ok(ColorTheme::Heat),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_themes() {
        let mut theme = ColorTheme::default();
        let mut seen = Vec::new();
        for _ in 0..ColorTheme::ALL.len() {
            seen.push(theme);
            theme = theme.next();
        }
        assert_eq!(seen, ColorTheme::ALL.to_vec());
        assert_eq!(theme, ColorTheme::Terrain);
    }

    #[test]
    fn parses_names() {
        assert_eq!("Heat".parse::<ColorTheme>(), Ok(ColorTheme::Heat));
        assert_eq!("grey".parse::<ColorTheme>(), Ok(ColorTheme::Grayscale));
        assert!("sepia".parse::<ColorTheme>().is_err());
    }
}
