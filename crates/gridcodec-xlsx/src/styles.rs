//! `xl/styles.xml` serialization of the style catalog

use gridcodec_core::style::{Alignment, Border, CellFormat, Fill, Font, StyleTable};

use crate::xml::escape_xml;

/// Serialize a style catalog as the `xl/styles.xml` part
///
/// Sections are written in schema order and every index in the catalog is
/// kept as-is.
pub fn to_styles_xml(table: &StyleTable) -> String {
    let mut xml = String::new();
    xml.push_str(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    let numfmts = table.number_formats();
    if !numfmts.is_empty() {
        xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
        for fmt in numfmts {
            xml.push_str(&format!(
                "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                fmt.id,
                escape_xml(&fmt.code)
            ));
        }
        xml.push_str("\n  </numFmts>");
    }

    xml.push_str(&format!("\n  <fonts count=\"{}\">", table.fonts().len()));
    for font in table.fonts() {
        xml.push_str("\n    ");
        xml.push_str(&write_font(font));
    }
    xml.push_str("\n  </fonts>");

    xml.push_str(&format!("\n  <fills count=\"{}\">", table.fills().len()));
    for fill in table.fills() {
        xml.push_str("\n    ");
        xml.push_str(&write_fill(fill));
    }
    xml.push_str("\n  </fills>");

    xml.push_str(&format!("\n  <borders count=\"{}\">", table.borders().len()));
    for border in table.borders() {
        xml.push_str("\n    ");
        xml.push_str(&write_border(border));
    }
    xml.push_str("\n  </borders>");

    xml.push_str(
        r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
    );

    xml.push_str(&format!(
        "\n  <cellXfs count=\"{}\">",
        table.cell_formats().len()
    ));
    for format in table.cell_formats() {
        xml.push_str("\n    ");
        xml.push_str(&write_xf(format));
    }
    xml.push_str("\n  </cellXfs>");

    xml.push_str(
        r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
    );
    xml
}

fn write_font(font: &Font) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
    s.push_str("</font>");
    s
}

fn write_fill(fill: &Fill) -> String {
    match fill {
        Fill::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        Fill::Gray125 => "<fill><patternFill patternType=\"gray125\"/></fill>".to_string(),
        Fill::Solid(color) => format!(
            "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
            color.to_argb_hex()
        ),
    }
}

fn write_border(border: &Border) -> String {
    let edges = [
        ("left", border.left),
        ("right", border.right),
        ("top", border.top),
        ("bottom", border.bottom),
    ];

    let mut s = String::from("<border>");
    for (tag, edge) in edges {
        match edge {
            Some(style) => s.push_str(&format!(
                "<{tag} style=\"{}\"><color indexed=\"64\"/></{tag}>",
                style.as_str()
            )),
            None => s.push_str(&format!("<{tag}/>")),
        }
    }
    s.push_str("<diagonal/></border>");
    s
}

fn write_alignment(al: &Alignment) -> String {
    format!(
        "<alignment horizontal=\"{}\" vertical=\"{}\"/>",
        al.horizontal.as_str(),
        al.vertical.as_str()
    )
}

fn write_xf(format: &CellFormat) -> String {
    let mut attrs = String::new();
    if format.applies_number_format() {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if format.font_id != 0 {
        attrs.push_str(" applyFont=\"1\"");
    }
    if format.fill_id != 0 {
        attrs.push_str(" applyFill=\"1\"");
    }
    if format.border_id != 0 {
        attrs.push_str(" applyBorder=\"1\"");
    }
    if format.alignment.is_some() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let mut s = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        format.number_format_id, format.font_id, format.fill_id, format.border_id, attrs
    );

    match &format.alignment {
        Some(al) => {
            s.push('>');
            s.push_str(&write_alignment(al));
            s.push_str("</xf>");
        }
        None => s.push_str("/>"),
    }
    s
}
