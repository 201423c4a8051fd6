//! Page text sources
//!
//! [`PdfTextSource`] reads PDF pages through `lopdf`. `pdftotext` and similar
//! extractors emit one form feed (`\x0c`) between pages; [`FormFeedTextSource`]
//! reads such files. [`DocumentTextSource`] picks one of the two by file
//! extension. [`InMemoryPages`] serves pre-split text.

use lopdf::Document;
use pagewise_domain::traits::PageTextSource;
use pagewise_domain::{PageRecord, PageSelector};
use std::convert::Infallible;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Page separator in extracted text
pub const PAGE_BREAK: char = '\x0c';

/// Errors raised while reading document pages
#[derive(Error, Debug)]
pub enum PageSourceError {
    /// File could not be read
    #[error(transparent)]
    Io(#[from] io::Error),

    /// PDF could not be parsed
    #[error("Failed to read PDF {path}: {message}")]
    Pdf {
        /// Document path
        path: String,
        /// Parser message
        message: String,
    },
}

/// Reads PDF documents page by page
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PageTextSource for PdfTextSource {
    type Error = PageSourceError;

    fn page_texts(&self, path: &Path, selector: &PageSelector) -> Result<Vec<PageRecord>, PageSourceError> {
        let document = Document::load(path).map_err(|e| PageSourceError::Pdf {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let page_count = u32::try_from(document.get_pages().len()).unwrap_or(u32::MAX);
        if page_count == 0 {
            return Err(PageSourceError::Pdf {
                path: path.display().to_string(),
                message: "document has no pages".to_string(),
            });
        }
        debug!("Loaded {} ({} pages)", path.display(), page_count);

        let pages = selector
            .resolve(page_count)
            .into_iter()
            .map(|page| {
                // A page without extractable text (scans, unknown fonts) stays in the batch.
                let text = document.extract_text(&[page]).unwrap_or_else(|e| {
                    warn!("No text extracted from page {} of {}: {}", page, path.display(), e);
                    String::new()
                });
                PageRecord::new(page, text.trim_end())
            })
            .collect();
        Ok(pages)
    }
}

/// Reads text files whose pages are separated by form feeds
#[derive(Debug, Clone, Copy, Default)]
pub struct FormFeedTextSource;

impl PageTextSource for FormFeedTextSource {
    type Error = io::Error;

    fn page_texts(&self, path: &Path, selector: &PageSelector) -> Result<Vec<PageRecord>, io::Error> {
        let text = std::fs::read_to_string(path)?;
        Ok(select(&split_pages(&text), selector))
    }
}

/// Dispatches on the file extension: `.pdf` goes to [`PdfTextSource`],
/// everything else is read as form-feed separated text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextSource;

impl PageTextSource for DocumentTextSource {
    type Error = PageSourceError;

    fn page_texts(&self, path: &Path, selector: &PageSelector) -> Result<Vec<PageRecord>, PageSourceError> {
        if is_pdf(path) {
            PdfTextSource.page_texts(path, selector)
        } else {
            Ok(FormFeedTextSource.page_texts(path, selector)?)
        }
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Pages held in memory; the path argument is ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryPages {
    pages: Vec<String>,
}

impl InMemoryPages {
    /// One entry per page, page 1 first
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// Split form-feed separated text
    pub fn from_text(text: &str) -> Self {
        Self::new(split_pages(text))
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether there are no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageTextSource for InMemoryPages {
    type Error = Infallible;

    fn page_texts(&self, _path: &Path, selector: &PageSelector) -> Result<Vec<PageRecord>, Infallible> {
        let pages: Vec<&str> = self.pages.iter().map(String::as_str).collect();
        Ok(select(&pages, selector))
    }
}

fn split_pages(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut pages: Vec<&str> = text.split(PAGE_BREAK).collect();
    // Extractors terminate the last page with a form feed too.
    if pages.len() > 1 && pages.last().is_some_and(|page| page.trim().is_empty()) {
        pages.pop();
    }
    pages
}

fn select(pages: &[&str], selector: &PageSelector) -> Vec<PageRecord> {
    let page_count = u32::try_from(pages.len()).unwrap_or(u32::MAX);
    selector
        .resolve(page_count)
        .into_iter()
        .filter_map(|page| {
            let idx = usize::try_from(page - 1).ok()?;
            pages.get(idx).map(|text| PageRecord::new(page, *text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewise_domain::PageSample;
    use std::io::Write;

    #[test]
    fn test_split_pages() {
        assert_eq!(split_pages("one\x0ctwo\x0cthree\x0c"), vec!["one", "two", "three"]);
        assert_eq!(split_pages("single page"), vec!["single page"]);
        assert!(split_pages("  \n").is_empty());
        assert_eq!(split_pages("a\x0c\x0cc"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_form_feed_source_reads_selected_pages() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Income statement\x0cBalance sheet\x0cNotes\x0c").unwrap();

        let selector = PageSelector::pages(vec![3, 1, 3, 9]).unwrap();
        let pages = FormFeedTextSource.page_texts(file.path(), &selector).unwrap();

        assert_eq!(
            pages,
            vec![PageRecord::new(3, "Notes"), PageRecord::new(1, "Income statement")]
        );
    }

    #[test]
    fn test_form_feed_source_missing_file() {
        let result = FormFeedTextSource.page_texts(Path::new("/nonexistent/doc.txt"), &PageSelector::All);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_source_dispatch() {
        assert!(is_pdf(Path::new("/docs/report.PDF")));
        assert!(!is_pdf(Path::new("/docs/report.txt")));
        assert!(!is_pdf(Path::new("/docs/pdf")));

        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        write!(file, "# Summary\x0c# Appendix").unwrap();
        let pages = DocumentTextSource.page_texts(file.path(), &PageSelector::All).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], PageRecord::new(2, "# Appendix"));
    }

    #[test]
    fn test_pdf_source_rejects_garbage() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4\n\xff\xfe\x00 truncated").unwrap();

        let err = DocumentTextSource
            .page_texts(file.path(), &PageSelector::All)
            .unwrap_err();
        assert!(matches!(err, PageSourceError::Pdf { .. }));
        assert!(err.to_string().starts_with("Failed to read PDF"));
    }

    #[test]
    fn test_in_memory_samples() {
        let source = InMemoryPages::new(["   Consolidated statement of cash flows for the year ended 31 December 2023 (continued)"]);
        let samples = source
            .page_samples(Path::new(""), &PageSelector::range(1, Some(5)).unwrap())
            .unwrap();

        assert_eq!(samples.len(), 1);
        let expected: String = source.pages[0].chars().take(70).collect::<String>().trim().to_string();
        assert_eq!(samples[0], PageSample::new(1, expected));
    }
}
