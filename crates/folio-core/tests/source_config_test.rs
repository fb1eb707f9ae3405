//! File source, source selection and layered configuration.

mod common;

use common::{COMPANIES, EXPERIENCE};
use folio_core::{
    create_source, CollectionKind, CollectionPaths, CollectionSource, FileSource, FolioConfig,
    HttpSource, LoadError, MemorySource, Portfolio,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[tokio::test]
async fn file_source_reads_relative_and_rooted_paths() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data/companies.json", COMPANIES);
    let source = FileSource::new(dir.path());

    let a = source.fetch("data/companies.json").await.unwrap();
    let b = source.fetch("/data/companies.json").await.unwrap();
    assert_eq!(a, b);
    assert!(source.describe().starts_with("file:"));
}

#[tokio::test]
async fn file_source_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(dir.path());
    let err = source.fetch("data/nothing.json").await.unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
}

#[tokio::test]
async fn memory_source_missing_path_is_not_found() {
    let err = MemorySource::new().fetch("x.json").await.unwrap_err();
    assert!(matches!(err, LoadError::NotFound(p) if p == "x.json"));
}

#[tokio::test]
async fn portfolio_over_files_with_default_roots() {
    let dir = tempfile::tempdir().unwrap();
    let paths = CollectionPaths::default();
    write(dir.path(), paths.get(CollectionKind::Companies), COMPANIES);
    write(dir.path(), paths.get(CollectionKind::Experience), EXPERIENCE);

    let portfolio = Portfolio::new(Arc::new(FileSource::new(dir.path())), &paths);
    assert_eq!(
        portfolio.experience.get_title_by_code(Some("E2")).await.as_deref(),
        Some("Globex")
    );
    // people lives under assets/data and was never written
    assert!(portfolio.people.get_list().await.is_empty());
}

#[test]
fn default_paths_use_two_roots() {
    let paths = CollectionPaths::default();
    assert_eq!(paths.get(CollectionKind::Companies), "data/companies.json");
    assert_eq!(paths.get(CollectionKind::People), "assets/data/people.json");
    assert_eq!(paths.iter().count(), CollectionKind::ALL.len());
}

#[test]
fn collection_kind_parses_names() {
    assert_eq!("Skills".parse::<CollectionKind>().unwrap(), CollectionKind::Skills);
    assert_eq!(CollectionKind::References.to_string(), "references");
    assert!("widgets".parse::<CollectionKind>().is_err());
}

#[test]
fn config_file_overrides_paths() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("folio.toml");
    fs::write(
        &file,
        r#"
data_root = "https://example.test/site"

[collections]
people = "data/people.json"
"#,
    )
    .unwrap();

    let cfg = FolioConfig::load_from(&file).unwrap();
    assert_eq!(cfg.data_root, "https://example.test/site");
    let paths = cfg.paths().unwrap();
    assert_eq!(paths.get(CollectionKind::People), "data/people.json");
    assert_eq!(paths.get(CollectionKind::Domains), "assets/data/domains.json");
}

#[test]
fn config_extension_is_optional_and_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("folio.toml"), "data_root = \"./site\"\n").unwrap();

    let cfg = FolioConfig::load_from(&dir.path().join("folio")).unwrap();
    assert_eq!(cfg.data_root, "./site");

    let cfg = FolioConfig::load_from(&dir.path().join("absent")).unwrap();
    assert_eq!(cfg.data_root, ".");
    assert_eq!(cfg.paths().unwrap(), CollectionPaths::default());
}

#[test]
fn unknown_collection_in_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("folio.toml");
    fs::write(&file, "data_root = \".\"\n[collections]\nwidgets = \"w.json\"\n").unwrap();

    assert!(FolioConfig::load_from(&file).is_err());
}

#[test]
fn portfolio_from_config() {
    let cfg = FolioConfig {
        data_root: "./does-not-matter".to_string(),
        ..FolioConfig::default()
    };
    let portfolio = Portfolio::from_config(&cfg).unwrap();
    assert_eq!(portfolio.skills.path(), "data/skills.json");
    assert!(!portfolio.skills.is_loaded());
}

/// Minimal HTTP/1.1 server: serves `documents` by path, 404 otherwise, and
/// counts requests per path.
async fn serve(documents: HashMap<String, String>) -> (String, Arc<Mutex<HashMap<String, usize>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let hits = Arc::new(Mutex::new(HashMap::new()));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let request = String::from_utf8_lossy(&buf);
            let path = request
                .split_whitespace()
                .nth(1)
                .unwrap_or("/")
                .trim_start_matches('/')
                .to_string();
            *counter.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

            let response = match documents.get(&path) {
                Some(body) => format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                ),
                None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    .to_string(),
            };
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (base_url, hits)
}

#[tokio::test]
async fn http_source_fetches_documents_and_maps_status() {
    let documents = HashMap::from([("data/companies.json".to_string(), COMPANIES.to_string())]);
    let (base_url, hits) = serve(documents).await;
    let source = HttpSource::new(format!("{base_url}/"));

    let bytes = source.fetch("data/companies.json").await.unwrap();
    assert_eq!(bytes, COMPANIES.as_bytes());

    let err = source.fetch("/data/people.json").await.unwrap_err();
    assert!(matches!(err, LoadError::Status { status: 404, .. }));
    assert_eq!(hits.lock().unwrap().get("data/people.json"), Some(&1));
    assert_eq!(source.describe(), base_url);
}

#[tokio::test]
async fn portfolio_over_http_caches_missing_collection_as_empty() {
    let documents = HashMap::from([("data/companies.json".to_string(), COMPANIES.to_string())]);
    let (base_url, hits) = serve(documents).await;
    let paths = CollectionPaths::default();
    let portfolio = Portfolio::new(Arc::new(HttpSource::new(base_url)), &paths);

    assert_eq!(portfolio.companies.get_list().await.len(), 3);
    assert!(portfolio.experience.get_list().await.is_empty());
    assert!(portfolio.experience.get_list().await.is_empty());
    assert_eq!(portfolio.experience.get_title_by_code(Some("E1")).await, None);

    let hits = hits.lock().unwrap();
    assert_eq!(hits.get("data/companies.json"), Some(&1));
    assert_eq!(hits.get("data/experience.json"), Some(&1));
}

#[test]
fn create_source_picks_by_scheme() {
    assert_eq!(create_source("https://x").describe(), "https://x");
    assert_eq!(create_source("http://x/site/").describe(), "http://x/site");
    assert_eq!(create_source("./d").describe(), "file:./d");
}
