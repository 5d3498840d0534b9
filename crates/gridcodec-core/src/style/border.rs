//! Border style types

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderLineStyle {
    /// Thin line
    Thin,
}

impl BorderLineStyle {
    /// The OOXML `style` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderLineStyle::Thin => "thin",
        }
    }
}

/// Border style for a cell; `None` on an edge means no line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Border {
    pub left: Option<BorderLineStyle>,
    pub right: Option<BorderLineStyle>,
    pub top: Option<BorderLineStyle>,
    pub bottom: Option<BorderLineStyle>,
}

impl Border {
    /// Create a border with no lines
    pub fn new() -> Self {
        Self::default()
    }

    /// Same line on all four edges
    pub fn all(style: BorderLineStyle) -> Self {
        Self {
            left: Some(style),
            right: Some(style),
            top: Some(style),
            bottom: Some(style),
        }
    }

    /// Lines on the top and bottom edges only
    pub fn horizontal(style: BorderLineStyle) -> Self {
        Self {
            top: Some(style),
            bottom: Some(style),
            ..Self::default()
        }
    }
}
