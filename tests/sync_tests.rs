//! End-to-end runs against an in-process POEditor stand-in

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use poeditor_sync::cli::commands::{handle_sync_with, ApiVariant};
use poeditor_sync::{Configuration, FileEntry, PoeditorError, ServiceSettings};

type Fields = HashMap<String, String>;

#[derive(Clone, Default)]
struct MockState {
    base: String,
    exports: Arc<Mutex<Vec<Fields>>>,
    uploads: Arc<Mutex<Vec<Fields>>>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MockState {
    fn answer_export(&self, form: &Fields, legacy: bool) -> Value {
        let language = form.get("language").cloned().unwrap_or_default();
        if language == "xx" {
            return json!({"response": {"status": "fail", "code": "403", "message": "denied"}});
        }

        let ext = form.get("type").cloned().unwrap_or_default();
        let url = format!("{}/files/{}.{}", self.base, language, ext);
        if legacy {
            json!({"response": {"status": "success", "code": "200", "message": "OK"}, "item": url})
        } else {
            json!({"response": {"status": "success", "code": "200", "message": "OK"}, "result": {"url": url}})
        }
    }
}

async fn export(State(state): State<MockState>, Form(form): Form<Fields>) -> Json<Value> {
    let body = state.answer_export(&form, false);
    state.exports.lock().unwrap().push(form);
    Json(body)
}

async fn legacy(State(state): State<MockState>, Form(form): Form<Fields>) -> Json<Value> {
    let body = state.answer_export(&form, true);
    state.exports.lock().unwrap().push(form);
    Json(body)
}

async fn upload(State(state): State<MockState>, mut multipart: Multipart) -> Json<Value> {
    let mut fields = Fields::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            fields.insert("file_name".to_string(), field.file_name().unwrap_or_default().to_string());
        }
        fields.insert(name, field.text().await.unwrap());
    }
    state.uploads.lock().unwrap().push(fields);

    Json(json!({
        "response": {"status": "success", "code": "200", "message": "OK"},
        "result": {"terms": {"parsed": 2, "added": 2, "deleted": 0}}
    }))
}

async fn file(State(state): State<MockState>, Path(name): Path<String>) -> &'static str {
    state.downloads.lock().unwrap().push(name);
    "msg"
}

async fn start_mock() -> MockState {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let state = MockState {
        base: format!("http://{}", listener.local_addr().unwrap()),
        ..Default::default()
    };

    let app = Router::new()
        .route("/v2/projects/export", post(export))
        .route("/v2/projects/upload", post(upload))
        .route("/api/", post(legacy))
        .route("/files/:name", get(file))
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    state
}

fn download_config(dir: &std::path::Path, langs: &[&str]) -> Configuration {
    Configuration {
        token: "t".to_string(),
        project_id: "1".to_string(),
        file_type: "po".to_string(),
        download: true,
        files: langs
            .iter()
            .map(|l| FileEntry::new(*l, dir.join(format!("{}.po", l)).display().to_string()))
            .collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_export_then_fetch_writes_file() {
    let mock = start_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = ServiceSettings::default().with_base_url(format!("{}/v2", mock.base));

    let report = handle_sync_with(&download_config(dir.path(), &["en"]), &settings, ApiVariant::V2)
        .await
        .unwrap();

    assert_eq!(report.downloaded(), 1);
    assert_eq!(std::fs::read_to_string(dir.path().join("en.po")).unwrap(), "msg");

    let exports = mock.exports.lock().unwrap();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0]["api_token"], "t");
    assert_eq!(exports[0]["id"], "1");
    assert_eq!(exports[0]["type"], "po");
    assert_eq!(exports[0]["language"], "en");
    assert!(!exports[0].contains_key("action"));
}

#[tokio::test]
async fn test_denied_export_writes_nothing() {
    let mock = start_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = ServiceSettings::default().with_base_url(format!("{}/v2", mock.base));

    let report = handle_sync_with(&download_config(dir.path(), &["xx"]), &settings, ApiVariant::V2)
        .await
        .unwrap();

    assert!(!dir.path().join("xx.po").exists());
    assert!(mock.downloads.lock().unwrap().is_empty());

    let err = report.files[0].result.as_ref().unwrap_err();
    assert!(matches!(err, PoeditorError::Remote { .. }));
    assert!(err.remote_message().contains("denied"));
}

#[tokio::test]
async fn test_failure_does_not_stop_later_languages() {
    let mock = start_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = ServiceSettings::default().with_base_url(format!("{}/v2", mock.base));

    let report = handle_sync_with(
        &download_config(dir.path(), &["en", "xx", "fr"]),
        &settings,
        ApiVariant::V2,
    )
    .await
    .unwrap();

    let languages: Vec<String> = mock
        .exports
        .lock()
        .unwrap()
        .iter()
        .map(|f| f["language"].clone())
        .collect();
    assert_eq!(languages, vec!["en", "xx", "fr"]);
    assert_eq!(*mock.downloads.lock().unwrap(), vec!["en.po", "fr.po"]);
    assert_eq!(report.downloaded(), 2);
    assert_eq!(report.failed(), 1);
}

#[tokio::test]
async fn test_repeated_download_overwrites() {
    let mock = start_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("en.po");
    std::fs::write(&target, "stale content that is longer than the export").unwrap();
    let settings = ServiceSettings::default().with_base_url(format!("{}/v2", mock.base));
    let config = download_config(dir.path(), &["en"]);

    for _ in 0..2 {
        let report = handle_sync_with(&config, &settings, ApiVariant::V2).await.unwrap();
        assert_eq!(report.failed(), 0);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "msg");
    }
}

#[tokio::test]
async fn test_upload_sends_terms_file() {
    let mock = start_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let terms = dir.path().join("messages.pot");
    std::fs::write(&terms, "msgid \"hello\"\nmsgstr \"\"\n").unwrap();
    let settings = ServiceSettings::default().with_base_url(format!("{}/v2", mock.base));

    let config = Configuration {
        token: "t".to_string(),
        project_id: "1".to_string(),
        upload: true,
        upload_path: terms.display().to_string(),
        files: vec![FileEntry::new("en", dir.path().join("en.po").display().to_string())],
        ..Default::default()
    };

    let report = handle_sync_with(&config, &settings, ApiVariant::V2).await.unwrap();

    let upload = report.upload.unwrap().unwrap();
    assert_eq!(upload.status, "success");
    assert_eq!(upload.terms.map(|t| t.added), Some(2));
    assert!(report.files.is_empty());
    assert!(mock.exports.lock().unwrap().is_empty());

    let uploads = mock.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0]["file"], "msgid \"hello\"\nmsgstr \"\"\n");
    assert_eq!(uploads[0]["file_name"], "messages.pot");
    assert_eq!(uploads[0]["api_token"], "t");
    assert_eq!(uploads[0]["id"], "1");
    assert_eq!(uploads[0]["updating"], "terms");
}

#[tokio::test]
async fn test_legacy_always_downloads_with_default_type() {
    let mock = start_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = ServiceSettings::default().with_base_url(format!("{}/api/", mock.base));

    let mut config = download_config(dir.path(), &["de"]);
    config.download = false;
    config.upload = true;
    config.file_type.clear();

    let report = handle_sync_with(&config, &settings, ApiVariant::Legacy).await.unwrap();

    assert!(report.upload.is_none());
    assert!(mock.uploads.lock().unwrap().is_empty());
    assert_eq!(report.downloaded(), 1);
    assert_eq!(std::fs::read_to_string(dir.path().join("de.po")).unwrap(), "msg");

    let exports = mock.exports.lock().unwrap();
    assert_eq!(exports[0]["action"], "export");
    assert_eq!(exports[0]["type"], "mo");
    assert_eq!(*mock.downloads.lock().unwrap(), vec!["de.mo"]);
}

#[tokio::test]
async fn test_unreachable_service_is_reported_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ServiceSettings::default().with_base_url("http://127.0.0.1:9/v2");

    let report = handle_sync_with(&download_config(dir.path(), &["en", "fr"]), &settings, ApiVariant::V2)
        .await
        .unwrap();

    assert_eq!(report.failed(), 2);
    assert!(report
        .files
        .iter()
        .all(|f| matches!(f.result, Err(PoeditorError::Network { .. }))));
}
