//! Fill/background style types

use super::Color;

/// Fill style for cell background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fill {
    /// No fill (transparent)
    #[default]
    None,

    /// 12.5% gray pattern (reserved by spreadsheet applications at index 1)
    Gray125,

    /// Solid color fill
    Solid(Color),
}

impl Fill {
    /// Create a solid fill with the given color
    pub fn solid(color: Color) -> Self {
        Fill::Solid(color)
    }
}
