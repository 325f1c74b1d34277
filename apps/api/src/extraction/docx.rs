//! DOCX → plain text. Reads `word/document.xml` from the zip container and keeps
//! only the run text, one line per paragraph.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use zip::ZipArchive;

use crate::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Text runs, tabs, breaks and paragraph ends, in document order.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>|<w:br(?:\s[^>]*)?/>|</w:p>")
            .expect("docx token pattern is valid")
    })
}

/// Named XML entities and decimal / hex character references.
fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|(lt|gt|quot|apos|amp));")
            .expect("entity pattern is valid")
    })
}

/// Reads at most `max_xml_bytes` of decompressed `word/document.xml`.
pub fn docx_to_text(bytes: &[u8], max_xml_bytes: usize) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("not a zip container: {e}")))?;

    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("missing {DOCUMENT_PART}: {e}")))?;

    let mut raw = Vec::new();
    part.take(max_xml_bytes as u64 + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ExtractionError::Docx(format!("unreadable {DOCUMENT_PART}: {e}")))?;
    if raw.len() > max_xml_bytes {
        return Err(ExtractionError::Docx(format!(
            "{DOCUMENT_PART} expands beyond {max_xml_bytes} bytes"
        )));
    }

    let xml = String::from_utf8(raw)
        .map_err(|_| ExtractionError::Docx(format!("{DOCUMENT_PART} is not valid UTF-8")))?;

    Ok(document_xml_to_text(&xml))
}

/// Flattens WordprocessingML body XML to text.
pub fn document_xml_to_text(xml: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for caps in token_pattern().captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            current.push_str(&decode_entities(run.as_str()));
            continue;
        }
        match &caps[0] {
            "<w:tab/>" => current.push('\t'),
            "</w:p>" => lines.push(std::mem::take(&mut current)),
            _ => current.push('\n'), // <w:br .../>
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n").trim_end().to_string()
}

/// Single pass, so `&amp;lt;` stays `&lt;`. Unknown or invalid references are kept verbatim.
fn decode_entities(text: &str) -> String {
    entity_pattern()
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else {
                match &caps[3] {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => Some('&'),
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
