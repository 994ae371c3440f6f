//! DOCX extraction. A `.docx` file is a zip archive; the body text lives in
//! `word/document.xml` as `<w:t>` runs.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use zip::result::ZipError;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

fn text_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").expect("valid text run regex"))
}

/// Joins every `<w:t>` run with a single space and trims the result.
/// An archive without a document part yields empty text.
pub(super) fn extract_docx(raw_bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(raw_bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut document_xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut document_xml)
                .map_err(|e| ExtractionError::Docx(e.to_string()))?;
        }
        Err(ZipError::FileNotFound) => return Ok(String::new()),
        Err(e) => return Err(ExtractionError::Docx(e.to_string())),
    }

    Ok(text_runs(&document_xml))
}

fn text_runs(document_xml: &str) -> String {
    text_run_pattern()
        .captures_iter(document_xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    /// Builds an in-memory docx-shaped archive from `(part name, contents)` pairs.
    fn build_archive(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in parts {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Senior Rust Engineer </w:t></w:r><w:r><w:tab/></w:r><w:r><w:t>2019-2024</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_text_runs_joined_with_space() {
        let text = text_runs(DOCUMENT_XML);
        assert_eq!(text, "Jane Doe Senior Rust Engineer  2019-2024");
    }

    #[test]
    fn test_extract_docx_reads_document_part() {
        let archive = build_archive(&[
            ("[Content_Types].xml", "<Types/>"),
            (DOCUMENT_PART, DOCUMENT_XML),
        ]);
        let text = extract_docx(&archive).unwrap();
        assert!(text.starts_with("Jane Doe"));
        assert!(text.ends_with("2019-2024"));
    }

    #[test]
    fn test_missing_document_part_is_empty_not_error() {
        let archive = build_archive(&[("word/styles.xml", "<w:styles/>")]);
        assert_eq!(extract_docx(&archive).unwrap(), "");
    }

    #[test]
    fn test_document_without_runs_is_empty() {
        let archive = build_archive(&[(DOCUMENT_PART, "<w:document><w:body/></w:document>")]);
        assert_eq!(extract_docx(&archive).unwrap(), "");
    }

    #[test]
    fn test_non_zip_bytes_are_extraction_error() {
        let err = extract_docx(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
        assert!(err.to_string().starts_with("Failed to extract text from DOCX:"));
    }
}
