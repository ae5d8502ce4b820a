/*!
 * DOCX text extraction.
 *
 * A DOCX file is a zip archive; the body lives in `word/document.xml` as
 * WordprocessingML. Text runs (`w:t`) of each top-level paragraph are
 * concatenated, tabs and breaks become `\t` and `\n`, and paragraphs are
 * joined with newlines.
 */

use roxmltree::{Document, Node};
use std::io::{Cursor, Read};

use super::{ContentExtractor, FileFormat};
use crate::errors::ExtractionError;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts paragraph text from Word documents
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    fn read_document_part(bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::Docx(format!("not a zip archive: {}", e)))?;

        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| ExtractionError::Docx(format!("missing {}: {}", DOCUMENT_PART, e)))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        Ok(xml)
    }

    fn is_wordml(node: &Node, name: &str) -> bool {
        node.is_element()
            && node.tag_name().name() == name
            && node.tag_name().namespace() == Some(WORDML_NS)
    }

    fn paragraph_text(paragraph: Node) -> String {
        let mut text = String::new();
        for node in paragraph.descendants() {
            if Self::is_wordml(&node, "t") {
                text.push_str(node.text().unwrap_or_default());
            } else if Self::is_wordml(&node, "tab") {
                text.push('\t');
            } else if Self::is_wordml(&node, "br") || Self::is_wordml(&node, "cr") {
                text.push('\n');
            }
        }
        text
    }

    /// Extract text from the XML of a document part
    pub fn text_from_xml(xml: &str) -> Result<String, ExtractionError> {
        let document = Document::parse(xml).map_err(|e| ExtractionError::Docx(e.to_string()))?;

        let body = document
            .root_element()
            .children()
            .find(|n| Self::is_wordml(n, "body"))
            .ok_or_else(|| ExtractionError::Docx("document has no body".to_string()))?;

        // Top-level paragraphs only: nested ones (tables, text boxes) are
        // reached through descendants of their container instead.
        let mut paragraphs = Vec::new();
        for block in body.children().filter(|n| n.is_element()) {
            if Self::is_wordml(&block, "p") {
                paragraphs.push(Self::paragraph_text(block));
            } else {
                paragraphs.extend(
                    block
                        .descendants()
                        .filter(|n| Self::is_wordml(n, "p"))
                        .filter(|p| !p.ancestors().skip(1).any(|a| Self::is_wordml(&a, "p")))
                        .map(Self::paragraph_text),
                );
            }
        }

        Ok(paragraphs.join("\n"))
    }
}

impl ContentExtractor for DocxExtractor {
    fn format(&self) -> FileFormat {
        FileFormat::Docx
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let xml = Self::read_document_part(bytes)?;
        Self::text_from_xml(&xml)
    }
}
