//! XML serialization utilities.
use quick_xml::{se::Serializer, SeError};
use serde::Serialize;

use crate::config::WriterSettings;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Whether `c` matches the XML 1.0 `Char` production.
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Renders `value` as an XML document. The root tag is the serde name of `V`.
pub(crate) fn to_string<V: Serialize>(
    value: &V,
    settings: &WriterSettings,
) -> Result<String, SeError> {
    let mut buffer = String::new();

    if settings.xml_declaration {
        buffer.push_str(XML_DECLARATION);
        if settings.indent.is_some() {
            buffer.push('\n');
        }
    }

    let mut serializer = Serializer::new(&mut buffer);
    serializer.expand_empty_elements(true);
    if let Some(indent) = settings.indent {
        serializer.indent(' ', indent);
    }

    value.serialize(serializer)?;

    Ok(buffer)
}
