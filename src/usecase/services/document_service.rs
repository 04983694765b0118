use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::entities::document::Document;
use crate::domain::entities::save::SaveOptions;
use crate::infra::codec::decode::{decode, detect_encoding, TextEncoding};
use crate::infra::codec::sniff::sniff;
use crate::infra::export::csv::serialize;
use crate::infra::import::csv::parse_delimited;
use crate::usecase::ports::store::FileStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub row_count: usize,
    pub column_count: usize,
    pub delimiter: char,
    pub encoding: TextEncoding,
    pub had_sep_directive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub path: PathBuf,
    pub row_count: usize,
    pub bytes_written: usize,
}

/// Moves documents between the file store and memory.
pub struct DocumentService {
    store: Arc<dyn FileStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Reads, decodes and parses `path`, then replaces `document` with the
    /// result. On any failure `document` is left as it was.
    pub fn open_into(&self, document: &mut Document, path: &Path) -> Result<LoadSummary> {
        let bytes = self
            .store
            .read(path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        let encoding = detect_encoding(&bytes);
        let text = decode(&bytes);
        let sniffed = sniff(&text);
        let table = parse_delimited(sniffed.text, sniffed.delimiter, true)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let summary = LoadSummary {
            path: path.to_path_buf(),
            row_count: table.rows.len(),
            column_count: table.headers.len(),
            delimiter: table.delimiter,
            encoding,
            had_sep_directive: sniffed.had_directive,
        };
        document.load(table.headers, table.rows, table.delimiter);

        tracing::info!(
            path = %path.display(),
            rows = summary.row_count,
            columns = summary.column_count,
            delimiter = ?summary.delimiter,
            encoding = ?summary.encoding,
            "loaded document"
        );
        Ok(summary)
    }

    /// Writes `document` to `path` and clears its change markers. The
    /// document keeps the delimiter it was written with.
    pub fn save(
        &self,
        document: &mut Document,
        path: &Path,
        options: &SaveOptions,
    ) -> Result<SaveSummary> {
        let bytes = serialize(document, options)
            .with_context(|| format!("failed to serialize {}", path.display()))?;
        self.store
            .write(path, &bytes)
            .with_context(|| format!("failed to save {}", path.display()))?;

        document.set_delimiter(options.delimiter);
        document.mark_saved();

        let summary = SaveSummary {
            path: path.to_path_buf(),
            row_count: document.row_count(),
            bytes_written: bytes.len(),
        };
        tracing::info!(
            path = %path.display(),
            rows = summary.row_count,
            bytes = summary.bytes_written,
            delimiter = ?options.delimiter,
            sep_directive = options.include_sep_directive,
            bom = options.include_bom,
            "saved document"
        );
        Ok(summary)
    }
}
