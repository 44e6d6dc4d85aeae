//! Document text extraction for uploaded resumes (PDF and DOCX).

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use bytes::Bytes;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const DOCX_BODY_PATH: &str = "word/document.xml";

/// Upper bound on the uncompressed `word/document.xml`. Uploads are capped
/// compressed, and a tiny archive can inflate to gigabytes.
pub const MAX_DOCX_BODY_BYTES: u64 = 32 * 1024 * 1024;

/// Text runs, tabs, breaks and paragraph ends inside a WordprocessingML body.
static DOCX_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab\s*/>|<w:br\s*/>|</w:p>")
        .expect("docx token regex is valid")
});

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("DOCX body could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX body exceeds {0} bytes uncompressed")]
    BodyTooLarge(u64),

    #[error("Document extraction aborted")]
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            _ => None,
        }
    }
}

/// Extracts UTF-8 text from an uploaded document on a blocking thread.
///
/// A panic inside the PDF library surfaces as `ExtractionError::Aborted`.
pub async fn extract_text(kind: DocumentKind, data: Bytes) -> Result<String, ExtractionError> {
    let text = run_blocking(move || match kind {
        DocumentKind::Pdf => extract_pdf_text(&data),
        DocumentKind::Docx => extract_docx_text(&data, MAX_DOCX_BODY_BYTES),
    })
    .await?;

    debug!(?kind, chars = text.len(), "extracted document text");
    Ok(text)
}

async fn run_blocking<F>(job: F) -> Result<String, ExtractionError>
where
    F: FnOnce() -> Result<String, ExtractionError> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|_| ExtractionError::Aborted)?
}

fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_docx_text(data: &[u8], limit: u64) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let body = archive.by_name(DOCX_BODY_PATH)?;
    if body.size() > limit {
        return Err(ExtractionError::BodyTooLarge(limit));
    }

    // The declared size comes from the archive itself, so the read is
    // bounded as well.
    let mut xml = String::new();
    body.take(limit + 1).read_to_string(&mut xml)?;
    if xml.len() as u64 > limit {
        return Err(ExtractionError::BodyTooLarge(limit));
    }
    Ok(docx_xml_to_text(&xml))
}

/// One output line per paragraph; tabs become spaces, breaks become newlines.
fn docx_xml_to_text(xml: &str) -> String {
    let mut text = String::new();
    for token in DOCX_TOKEN.captures_iter(xml) {
        if let Some(run) = token.get(1) {
            text.push_str(&html_escape::decode_html_entities(run.as_str()));
            continue;
        }
        let whole = &token[0];
        if whole.starts_with("<w:tab") {
            text.push(' ');
        } else {
            text.push('\n');
        }
    }
    text
}
