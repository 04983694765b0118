use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::AppConfig;
use crate::domain::entities::command::EditCommand;
use crate::domain::entities::document::{Document, FindScope, RowData};
use crate::domain::entities::save::SaveOptions;
use crate::infra::codec::decode::TextEncoding;
use crate::infra::fs::local_store::LocalFileStore;
use crate::usecase::ports::store::{FileStore, StoreError};
use crate::usecase::services::document_service::DocumentService;
use crate::usecase::services::edit_service::EditService;
use crate::*;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("csv-studio-{prefix}-{nanos}"))
}

#[derive(Default)]
struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    fn with_file(path: &str, bytes: &[u8]) -> Self {
        let store = Self::default();
        store
            .files
            .lock()
            .expect("store lock")
            .insert(PathBuf::from(path), bytes.to_vec());
        store
    }

    fn bytes(&self, path: &str) -> Vec<u8> {
        self.files
            .lock()
            .expect("store lock")
            .get(Path::new(path))
            .cloned()
            .expect("file should exist in memory store")
    }
}

impl FileStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        self.files
            .lock()
            .map_err(|_| StoreError::Io("poisoned".to_string()))?
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.display().to_string()))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        self.files
            .lock()
            .map_err(|_| StoreError::Io("poisoned".to_string()))?
            .insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}

fn loaded_document() -> Document {
    let mut document = Document::new();
    let rows: Vec<RowData> = [("Alice", "Paris"), ("Bob", "Tokyo, JP")]
        .iter()
        .map(|(name, city)| {
            [
                ("name".to_string(), name.to_string()),
                ("city".to_string(), city.to_string()),
            ]
            .into_iter()
            .collect()
        })
        .collect();
    document.load(vec!["name".to_string(), "city".to_string()], rows, ',');
    document
}

#[test]
fn save_then_open_round_trips_through_local_files() {
    let temp_dir = unique_test_dir("round-trip");
    fs::create_dir_all(&temp_dir).expect("temp dir should be created");
    let path = temp_dir.join("people.csv");
    let service = DocumentService::new(Arc::new(LocalFileStore));

    let mut document = loaded_document();
    document
        .add_column("note", None)
        .expect("add column should succeed");
    document.update_cell(1, "note", "said \"hi\"");
    let options = SaveOptions {
        delimiter: ';',
        include_sep_directive: true,
        include_bom: true,
    };
    service
        .save(&mut document, &path, &options)
        .expect("save should succeed");

    let bytes = fs::read(&path).expect("saved file should exist");
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
    assert!(!document.has_unsaved_changes());
    assert!(document.new_columns().is_empty());
    assert_eq!(document.delimiter(), ';');

    let mut reopened = Document::new();
    let summary = service
        .open_into(&mut reopened, &path)
        .expect("open should succeed");

    assert_eq!(summary.encoding, TextEncoding::Utf8Bom);
    assert!(summary.had_sep_directive);
    assert_eq!(reopened.delimiter(), ';');
    assert_eq!(reopened.headers(), ["name", "city", "note"]);
    assert_eq!(reopened.row_count(), 2);
    assert_eq!(reopened.rows()[1].value("city"), "Tokyo, JP");
    assert_eq!(reopened.rows()[1].value("note"), "said \"hi\"");
    assert_eq!(reopened.rows()[0].value("note"), "");
    assert!(!reopened.headers()[0].starts_with('\u{feff}'));

    fs::remove_dir_all(&temp_dir).ok();
}

#[test]
fn failed_open_leaves_previous_document_untouched() {
    let service = DocumentService::new(Arc::new(MemoryStore::with_file("empty.csv", b"")));
    let mut document = loaded_document();
    document.update_cell(0, "city", "Lyon");
    let before = document.clone();

    let missing = service.open_into(&mut document, Path::new("missing.csv"));
    assert!(missing.is_err());
    assert_eq!(document, before);

    let unparsable = service.open_into(&mut document, Path::new("empty.csv"));
    assert!(unparsable.is_err());
    assert_eq!(document, before);
}

#[test]
fn missing_local_file_reports_not_found() {
    let temp_dir = unique_test_dir("missing");
    let result = LocalFileStore.read(&temp_dir.join("nope.csv"));

    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn utf16_files_are_decoded_before_parsing() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "sep=\t\r\nname\tcity\r\nZoë\tOslo\r\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let service = DocumentService::new(Arc::new(MemoryStore::with_file("wide.csv", &bytes)));
    let mut document = Document::new();

    let summary = service
        .open_into(&mut document, Path::new("wide.csv"))
        .expect("open should succeed");

    assert_eq!(summary.encoding, TextEncoding::Utf16Le);
    assert_eq!(document.delimiter(), '\t');
    assert_eq!(document.headers(), ["name", "city"]);
    assert_eq!(document.rows()[0].value("name"), "Zoë");
}

#[test]
fn comma_save_without_directive_writes_plain_quoted_csv() {
    let store = Arc::new(MemoryStore::default());
    let service = DocumentService::new(store.clone());
    let mut document = loaded_document();

    let summary = service
        .save(
            &mut document,
            Path::new("out.csv"),
            &SaveOptions::for_delimiter(',', false),
        )
        .expect("save should succeed");

    let text = String::from_utf8(store.bytes("out.csv")).expect("utf-8 output");
    assert_eq!(
        text,
        "\"name\",\"city\"\r\n\"Alice\",\"Paris\"\r\n\"Bob\",\"Tokyo, JP\"\r\n"
    );
    assert_eq!(summary.bytes_written, text.len());
    assert_eq!(summary.row_count, 2);
}

#[test]
fn emptied_document_can_still_be_saved() {
    let store = Arc::new(MemoryStore::default());
    let service = DocumentService::new(store.clone());
    let mut document = loaded_document();
    document.delete_rows(&[0, 1]).expect("delete should succeed");
    document.delete_column("name").expect("delete should succeed");
    document.delete_column("city").expect("delete should succeed");
    assert!(document.is_loaded());
    assert!(document.has_unsaved_changes());

    let summary = service
        .save(
            &mut document,
            Path::new("empty.csv"),
            &SaveOptions::for_delimiter(';', false),
        )
        .expect("save should succeed");

    assert_eq!(summary.row_count, 0);
    assert_eq!(document.delimiter(), ';');
    assert!(!document.has_unsaved_changes());
    assert!(store.read(Path::new("empty.csv")).is_ok());
}

#[test]
fn edits_through_the_service_share_untouched_rows() {
    let mut document = loaded_document();
    let before = document.clone();
    let service = EditService::new();

    service
        .apply(
            &mut document,
            EditCommand::FindAndReplace {
                find: "paris".to_string(),
                replace: "Lyon".to_string(),
                scope: FindScope::Column("city".to_string()),
                case_sensitive: false,
            },
        )
        .expect("replace should succeed");

    assert_eq!(document.rows()[0].value("city"), "Lyon");
    assert!(!Arc::ptr_eq(&document.rows()[0], &before.rows()[0]));
    assert!(Arc::ptr_eq(&document.rows()[1], &before.rows()[1]));
    assert!(document.revision() > before.revision());
}

#[test]
fn config_round_trips_and_falls_back_on_invalid_json() {
    let temp_dir = unique_test_dir("config");
    let path = temp_dir.join("nested").join("config.json");
    let mut config = AppConfig::default();
    config.log_level = "debug".to_string();
    config.save.include_bom = false;
    config.save.default_delimiter = ';';

    config.save_to(&path).expect("config should save");
    assert_eq!(AppConfig::load_from(Some(path.as_path())), config);

    fs::write(&path, "{ not json").expect("overwrite config");
    assert_eq!(AppConfig::load_from(Some(path.as_path())), AppConfig::default());

    fs::remove_dir_all(&temp_dir).ok();
}

#[test]
fn missing_config_file_yields_defaults() {
    let temp_dir = unique_test_dir("config-missing");

    let config = AppConfig::load_from(Some(temp_dir.join("config.json").as_path()));

    assert_eq!(config, AppConfig::default());
}

#[test]
fn default_config_path_uses_app_directory() {
    let path = default_config_path().expect("default config path should resolve");

    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("config.json")
    );
}

#[test]
fn default_logs_dir_is_named_logs() {
    let logs_dir = default_logs_dir().expect("default logs dir should resolve");

    assert_eq!(
        logs_dir.file_name().and_then(|name| name.to_str()),
        Some("logs")
    );
}

#[test]
fn ensure_webview_data_dir_creates_webview2_subdir() {
    let temp_dir = unique_test_dir("webview-data-dir");
    fs::create_dir_all(&temp_dir).expect("temp dir should be created");

    let webview_dir =
        ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

    assert_eq!(webview_dir, temp_dir.join("webview2"));
    assert!(webview_dir.is_dir(), "webview2 directory should exist");

    fs::remove_dir_all(&temp_dir).ok();
}
