//! Resume text extraction for PDF and DOCX uploads.
//!
//! PDF goes through `pdf-extract`. DOCX is a zip container: the body lives in
//! `word/document.xml`, where each `w:p` is a paragraph and its `w:t` runs carry
//! the text.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use zip::ZipArchive;

use crate::errors::AppError;

const PREVIEW_CHARS: usize = 500;
const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(ResumeFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(ResumeFormat::Docx)
        } else {
            Err(AppError::Validation(
                "Only PDF and DOCX files are supported".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeParseResponse {
    pub filename: String,
    pub text_preview: String,
    pub total_characters: usize,
}

impl ResumeParseResponse {
    pub fn new(filename: String, text: &str) -> Self {
        let total_characters = text.chars().count();
        let mut text_preview: String = text.chars().take(PREVIEW_CHARS).collect();
        if total_characters > PREVIEW_CHARS {
            text_preview.push_str("...");
        }

        Self {
            filename,
            text_preview,
            total_characters,
        }
    }
}

/// Extracts plain text from a resume. Unreadable files and files with no text are
/// `UnprocessableEntity`.
pub fn parse_resume(bytes: &[u8], format: ResumeFormat) -> Result<String, AppError> {
    let text = match format {
        ResumeFormat::Pdf => extract_pdf(bytes),
        ResumeFormat::Docx => extract_docx(bytes),
    }
    .map_err(|e| AppError::UnprocessableEntity(format!("Could not parse resume: {e}")))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Could not extract text from resume".to_string(),
        ));
    }
    Ok(text.to_string())
}

fn extract_pdf(bytes: &[u8]) -> Result<String, String> {
    let raw = pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())?;
    Ok(raw
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn extract_docx(bytes: &[u8]) -> Result<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|_| format!("{DOCX_BODY} not found in DOCX file"))?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    docx_paragraphs(&xml).map(|paragraphs| paragraphs.join("\n"))
}

/// Collects the text of every non-blank paragraph in a WordprocessingML body.
fn docx_paragraphs(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    let paragraph = current.trim();
                    if !paragraph.is_empty() {
                        paragraphs.push(paragraph.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:tab" => current.push('\t'),
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|err| format!("XML decode error: {err}"))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML parsing error at position {}: {e}",
                    reader.buffer_position()
                ))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
