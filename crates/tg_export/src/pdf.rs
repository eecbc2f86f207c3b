use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

/// Export failure.
///
/// Reported to the user as a non-fatal notification; the process continues.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },
    #[error("pdf rendering failed: {0}")]
    Render(String),
}

// A4 portrait, fixed margins, one built-in font.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 6.0;

/// Widest line that fits between the margins at `FONT_SIZE_PT`.
const MAX_LINE_CHARS: usize = 88;

/// Write `text` to `path` as a single-font, auto-paginated PDF.
pub fn write_document(path: &Path, text: &str) -> Result<(), ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new("Extracted Text", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in wrap_lines(text, MAX_LINE_CHARS) {
        if y < MARGIN_MM + LINE_HEIGHT_MM {
            let (page, new_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }

        layer.use_text(line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        y -= LINE_HEIGHT_MM;
    }

    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.display().to_string(),
        source,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Render(e.to_string()))?;

    tracing::debug!(path = %path.display(), "pdf written");
    Ok(())
}

/// Split text into render lines: hard breaks first, then greedy word wrap at
/// `max_chars`. Words longer than a full line are broken mid-word.
fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        if raw.chars().count() <= max_chars {
            lines.push(raw.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0usize;
        for word in raw.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if word_len > max_chars {
                // Break the oversized word into full-width chunks.
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_chars) {
                    if current_len > 0 {
                        lines.push(std::mem::take(&mut current));
                        current_len = 0;
                    }
                    let piece: String = chunk.iter().collect();
                    if chunk.len() == max_chars {
                        lines.push(piece);
                    } else {
                        current_len = chunk.len();
                        current = piece;
                    }
                }
                continue;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    // An empty document still gets one (blank) line so the PDF has content.
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::{wrap_lines, write_document, ExportError};

    #[test]
    fn writes_a_parseable_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        write_document(&path, "HELLO\nWORLD").unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn long_text_spans_multiple_pages_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.pdf");

        // Enough lines to overflow an A4 page several times.
        let text = (0..400)
            .map(|i| format!("line number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        write_document(&path, &text).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_path_fails_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");

        let err = write_document(&path, "text").unwrap_err();
        assert!(matches!(err, ExportError::Create { .. }));
    }

    #[test]
    fn empty_text_still_produces_a_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        write_document(&path, "").unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn wrap_respects_hard_breaks_and_width() {
        let lines = wrap_lines("short\nanother", 88);
        assert_eq!(lines, vec!["short".to_string(), "another".to_string()]);

        let long = "word ".repeat(40);
        for line in wrap_lines(&long, 20) {
            assert!(line.chars().count() <= 20);
        }

        let oversized = "x".repeat(50);
        let wrapped = wrap_lines(&oversized, 20);
        assert_eq!(wrapped.len(), 3);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 20));
    }
}
