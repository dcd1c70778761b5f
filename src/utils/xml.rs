//! XML/HTML reading and writing helpers shared by the navigation loader and
//! the sidebar renderer.

use anyhow::Result;
use quick_xml::{
    Reader, Writer,
    escape::{resolve_predefined_entity, unescape},
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::borrow::Cow;
use std::io::Cursor;
use std::str;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

// ============================================================================
// Reading
// ============================================================================

/// Create a reader tolerant of HTML: no end-name checks, text kept as-is.
#[inline]
pub fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader
}

/// Unescaped value of attribute `name`, if present.
pub fn attr_value(elem: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in elem.attributes().flatten() {
        if attr.key.as_ref() == name {
            let raw = str::from_utf8(attr.value.as_ref())?;
            return Ok(Some(unescape(raw)?.into_owned()));
        }
    }
    Ok(None)
}

/// Whitespace-separated `class` attribute contains `class`.
pub fn has_class(elem: &BytesStart<'_>, class: &str) -> bool {
    elem.attributes().flatten().any(|attr| {
        attr.key.as_ref() == b"class"
            && str::from_utf8(attr.value.as_ref())
                .unwrap_or_default()
                .split_whitespace()
                .any(|c| c == class)
    })
}

/// Resolve the name of a general reference (`amp`, `#38`, `#x26`).
///
/// Unknown entities are kept verbatim as `&name;`.
pub fn resolve_entity(name: &str) -> Cow<'static, str> {
    let numeric = name.strip_prefix('#').and_then(|num| {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse().ok(),
        };
        code.and_then(char::from_u32)
    });

    match numeric {
        Some(ch) => Cow::Owned(ch.to_string()),
        None => match resolve_predefined_entity(name) {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(format!("&{name};")),
        },
    }
}

// ============================================================================
// Writing
// ============================================================================

pub fn create_xml_writer() -> XmlWriter {
    Writer::new(Cursor::new(Vec::new()))
}

/// Start tag with attributes: `<tag attr1="val1" ...>`.
#[inline]
pub fn write_start(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    writer.write_event(Event::Start(elem))?;
    Ok(())
}

#[inline]
pub fn write_end(writer: &mut XmlWriter, tag: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Escaped text node.
#[inline]
pub fn write_text(writer: &mut XmlWriter, text: &str) -> Result<()> {
    writer.write_event(Event::Text(BytesText::new(text)))?;
    Ok(())
}

/// Text element with attributes: `<tag ...>text</tag>`.
#[inline]
pub fn write_text_element(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    write_start(writer, tag, attrs)?;
    write_text(writer, text)?;
    write_end(writer, tag)
}

pub fn into_string(writer: XmlWriter) -> Result<String> {
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}
