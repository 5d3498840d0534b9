//! Conversion between raw cells and typed values

use crate::cell::{CellTypeTag, RawCell, SharedStringTable, TypedValue};
use crate::error::{Error, Result};
use crate::style::{StyleRole, StyleTable};

/// The role a cell plays in an exported sheet, which selects its style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// A header row cell
    Header,
    /// A content cell in the first column
    ContentFirst,
    /// A content cell in any later column
    ContentOther,
    /// A footer row cell
    Footer,
}

impl StyleClass {
    /// The catalog role used for text (and boolean, and empty) cells
    pub fn text_role(&self) -> StyleRole {
        match self {
            StyleClass::Header => StyleRole::HeaderText,
            StyleClass::ContentFirst => StyleRole::BorderedText,
            StyleClass::ContentOther => StyleRole::AlignedText,
            StyleClass::Footer => StyleRole::FooterText,
        }
    }
}

/// Decode a raw cell into a typed value
///
/// | tag | result |
/// |---|---|
/// | None, String | raw text or Null |
/// | Boolean | `Bool(raw == "1")` |
/// | InlineString | raw text, else inline text, else Null |
/// | SharedString | the indexed string; a bad index is corrupt |
/// | Error | Null |
/// | Date, Number | [`Error::UnsupportedCellType`] |
pub fn decode(cell: &RawCell, strings: &SharedStringTable) -> Result<TypedValue> {
    match cell.type_tag {
        CellTypeTag::None | CellTypeTag::String => Ok(text_or_null(cell.raw_text.as_deref())),
        CellTypeTag::Boolean => Ok(TypedValue::Bool(cell.raw_text.as_deref() == Some("1"))),
        CellTypeTag::InlineString => Ok(text_or_null(
            cell.raw_text.as_deref().or(cell.inline_text.as_deref()),
        )),
        CellTypeTag::SharedString => {
            let raw = cell
                .raw_text
                .as_deref()
                .ok_or_else(|| Error::corrupt("shared string cell has no index"))?;
            let index: usize = raw.trim().parse().map_err(|_| {
                Error::corrupt(format!("invalid shared string index '{}'", raw))
            })?;
            strings
                .get(index)
                .map(TypedValue::text)
                .ok_or_else(|| {
                    Error::corrupt(format!(
                        "shared string index {} out of range ({} strings)",
                        index,
                        strings.len()
                    ))
                })
        }
        CellTypeTag::Error => Ok(TypedValue::Null),
        CellTypeTag::Date | CellTypeTag::Number => Err(Error::UnsupportedCellType(cell.type_tag)),
    }
}

fn text_or_null(text: Option<&str>) -> TypedValue {
    text.map_or(TypedValue::Null, TypedValue::text)
}

/// Encode a typed value as a raw cell styled for the given class
///
/// The kind of cell written follows the value's variant only: numbers get a
/// numeric cell and a numeric style, text gets an inline string. The
/// returned cell carries no reference; the caller places it.
pub fn encode(value: &TypedValue, class: StyleClass, styles: &StyleTable) -> RawCell {
    let style = |role: StyleRole| styles.index_of(role).unwrap_or(0);

    match value {
        TypedValue::Integer(n) => RawCell::new(CellTypeTag::Number)
            .with_raw_text(n.to_string())
            .styled(style(StyleRole::BorderedInteger)),
        TypedValue::Decimal(d) => RawCell::new(CellTypeTag::Number)
            .with_raw_text(d.to_string())
            .styled(style(StyleRole::BorderedDecimal)),
        TypedValue::Text(s) => RawCell::new(CellTypeTag::InlineString)
            .with_inline_text(s.as_str())
            .styled(style(class.text_role())),
        TypedValue::Bool(b) => RawCell::new(CellTypeTag::Boolean)
            .with_raw_text(if *b { "1" } else { "0" })
            .styled(style(class.text_role())),
        TypedValue::Null => RawCell::new(CellTypeTag::None).styled(style(class.text_role())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn strings() -> SharedStringTable {
        ["a", "b", "c"].into_iter().collect()
    }

    fn raw(tag: CellTypeTag, text: &str) -> RawCell {
        RawCell::new(tag).with_raw_text(text)
    }

    #[test]
    fn test_decode_untyped() {
        let t = strings();
        assert_eq!(decode(&raw(CellTypeTag::None, "12"), &t).unwrap(), TypedValue::text("12"));
        assert_eq!(decode(&RawCell::new(CellTypeTag::None), &t).unwrap(), TypedValue::Null);
        assert_eq!(
            decode(&raw(CellTypeTag::String, "x"), &t).unwrap(),
            TypedValue::text("x")
        );
        assert_eq!(decode(&RawCell::new(CellTypeTag::String), &t).unwrap(), TypedValue::Null);
    }

    #[test]
    fn test_decode_boolean() {
        let t = strings();
        assert_eq!(decode(&raw(CellTypeTag::Boolean, "1"), &t).unwrap(), TypedValue::Bool(true));
        for other in ["0", "", "true", "TRUE", "2"] {
            assert_eq!(
                decode(&raw(CellTypeTag::Boolean, other), &t).unwrap(),
                TypedValue::Bool(false),
                "{:?}",
                other
            );
        }
        assert_eq!(
            decode(&RawCell::new(CellTypeTag::Boolean), &t).unwrap(),
            TypedValue::Bool(false)
        );
    }

    #[test]
    fn test_decode_inline_string() {
        let t = strings();
        let both = RawCell::new(CellTypeTag::InlineString)
            .with_raw_text("raw")
            .with_inline_text("inline");
        assert_eq!(decode(&both, &t).unwrap(), TypedValue::text("raw"));

        let inline = RawCell::new(CellTypeTag::InlineString).with_inline_text("inline");
        assert_eq!(decode(&inline, &t).unwrap(), TypedValue::text("inline"));

        assert_eq!(
            decode(&RawCell::new(CellTypeTag::InlineString), &t).unwrap(),
            TypedValue::Null
        );
    }

    #[test]
    fn test_decode_shared_string() {
        let t = strings();
        assert_eq!(
            decode(&raw(CellTypeTag::SharedString, "2"), &t).unwrap(),
            TypedValue::text("c")
        );

        for bad in ["5", "-1", "x"] {
            let err = decode(&raw(CellTypeTag::SharedString, bad), &t).unwrap_err();
            assert!(matches!(err, Error::CorruptDocument(_)), "{:?}", bad);
        }
        let err = decode(&RawCell::new(CellTypeTag::SharedString), &t).unwrap_err();
        assert!(matches!(err, Error::CorruptDocument(_)));
    }

    #[test]
    fn test_decode_unsupported() {
        let t = strings();
        for tag in [CellTypeTag::Date, CellTypeTag::Number] {
            for text in ["1", "2024-01-01", ""] {
                let err = decode(&raw(tag, text), &t).unwrap_err();
                assert!(matches!(err, Error::UnsupportedCellType(got) if got == tag));
            }
            assert!(decode(&RawCell::new(tag), &t).is_err());
        }
    }

    #[test]
    fn test_decode_error_cell() {
        let t = strings();
        assert_eq!(decode(&raw(CellTypeTag::Error, "#N/A"), &t).unwrap(), TypedValue::Null);
    }

    #[test]
    fn test_encode_numbers() {
        let styles = StyleTable::standard();

        let cell = encode(&TypedValue::Integer(30), StyleClass::ContentOther, &styles);
        assert_eq!(cell.type_tag, CellTypeTag::Number);
        assert_eq!(cell.raw_text.as_deref(), Some("30"));
        assert_eq!(cell.style_index, 11);

        let d = Decimal::from_str("12.50").unwrap();
        let cell = encode(&TypedValue::Decimal(d), StyleClass::Header, &styles);
        assert_eq!(cell.type_tag, CellTypeTag::Number);
        assert_eq!(cell.raw_text.as_deref(), Some("12.50"));
        assert_eq!(cell.style_index, 9);
    }

    #[test]
    fn test_encode_text_per_class() {
        let styles = StyleTable::standard();
        let value = TypedValue::text("30");

        let expected = [
            (StyleClass::Header, 10),
            (StyleClass::ContentFirst, 8),
            (StyleClass::ContentOther, 13),
            (StyleClass::Footer, 12),
        ];
        for (class, index) in expected {
            let cell = encode(&value, class, &styles);
            assert_eq!(cell.type_tag, CellTypeTag::InlineString);
            assert_eq!(cell.inline_text.as_deref(), Some("30"));
            assert!(cell.raw_text.is_none());
            assert_eq!(cell.style_index, index, "{:?}", class);
        }
    }

    #[test]
    fn test_encode_bool_and_null() {
        let styles = StyleTable::standard();

        let cell = encode(&TypedValue::Bool(true), StyleClass::ContentFirst, &styles);
        assert_eq!(cell.type_tag, CellTypeTag::Boolean);
        assert_eq!(cell.raw_text.as_deref(), Some("1"));
        assert_eq!(cell.style_index, 8);
        assert_eq!(decode(&cell, &SharedStringTable::new()).unwrap(), TypedValue::Bool(true));

        let cell = encode(&TypedValue::Null, StyleClass::Footer, &styles);
        assert!(!cell.has_value());
        assert_eq!(cell.style_index, 12);
    }

    #[test]
    fn test_encode_text_decodes_back() {
        let styles = StyleTable::standard();
        let cell = encode(&TypedValue::text("Ann"), StyleClass::ContentFirst, &styles);
        assert_eq!(
            decode(&cell, &SharedStringTable::new()).unwrap(),
            TypedValue::text("Ann")
        );
    }

    #[test]
    fn test_encode_without_roles_uses_default_style() {
        let styles = crate::style::StyleTableBuilder::new().build();
        let cell = encode(&TypedValue::text("x"), StyleClass::Header, &styles);
        assert_eq!(cell.style_index, 0);
    }
}
