//! Shared fixtures for folio-core integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use folio_core::{
    CollectionKind, CollectionPaths, CollectionSource, LoadError, LoadResult, MemorySource,
    Portfolio,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wraps a [`MemorySource`], counting fetches and optionally delaying or failing them.
pub struct CountingSource {
    inner: MemorySource,
    delay: Duration,
    fail: bool,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            delay: Duration::ZERO,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every fetch fails with a transport-like error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(MemorySource::new())
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CollectionSource for CountingSource {
    async fn fetch(&self, path: &str) -> LoadResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(LoadError::Io {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            });
        }
        self.inner.fetch(path).await
    }

    fn describe(&self) -> String {
        format!("counting({})", self.inner.describe())
    }
}

pub const COMPANIES: &str = r#"{
  "items": [
    { "code": "ACME", "title": "Acme Corp", "photoUrl": "/img/acme.png", "city": "Berlin" },
    { "code": "GLOBEX", "title": "Globex", "photoUrl": "" },
    { "code": "UNI", "title": "Tech University", "photoUrl": "/img/uni.png" }
  ],
  "general": { "heading": "Companies" }
}"#;

pub const CUSTOMERS: &str = r#"{
  "items": [
    { "code": "BANK", "title": "Big Bank" }
  ]
}"#;

pub const DOMAINS: &str = r#"{
  "items": [
    { "code": "FINTECH", "title": "Fintech" },
    { "code": "HEALTH", "title": "Healthcare" }
  ]
}"#;

pub const PARTNERS: &str = r#"{
  "items": [
    { "code": "AGENCY", "title": "Design Agency", "photoUrl": "/img/agency.png" }
  ]
}"#;

pub const SKILLS: &str = r#"{
  "items": [
    { "code": "REACT", "title": "React", "category": "Frontend" },
    { "code": "VUE", "title": "Vue", "category": "frontend" },
    { "code": "RUST", "title": "Rust", "category": "Backend" },
    { "code": "SQL", "title": "SQL" }
  ]
}"#;

pub const PEOPLE: &str = r#"{
  "items": [
    { "code": "JDOE", "title": "Jane Doe", "photoUrl": "/img/jdoe.png", "companyCode": "acme" },
    { "code": "BSMITH", "title": "Bob Smith", "companyCode": "GLOBEX" }
  ]
}"#;

pub const REFERENCES: &str = r#"{
  "items": [
    { "code": "R1", "personCode": "jdoe", "text": "Great engineer." },
    { "code": "R2", "personCode": "BSMITH", "companyCode": "ACME", "text": "Reliable." },
    { "code": "R3", "personCode": "NOBODY" }
  ]
}"#;

pub const PROJECTS: &str = r#"{
  "items": [
    {
      "code": "P1", "title": "Trading Dashboard", "companyCode": "ACME", "customerCode": "bank",
      "skillCodes": ["React", "rust"], "domainCodes": ["FINTECH"],
      "partnerCodes": ["AGENCY"], "personCodes": ["JDOE", "GHOST"]
    },
    {
      "code": "P2", "title": "Clinic Portal", "companyCode": "GLOBEX",
      "skillCodes": ["Vue"], "domainCodes": ["health"]
    },
    { "code": "P3", "title": "Thesis Prototype", "skillCodes": ["SQL"] }
  ]
}"#;

pub const EXPERIENCE: &str = r#"{
  "items": [
    {
      "code": "E1", "companyCode": "acme", "from": "2019-01",
      "positions": [
        { "title": "Engineer", "skillCodes": ["react"], "domainCodes": ["fintech"], "projectCodes": ["p1"] },
        { "title": "Lead", "skillCodes": ["RUST", "React"], "projectCodes": ["P1", "MISSING"] }
      ]
    },
    {
      "code": "E2", "companyCode": "globex",
      "positions": [ { "title": "Consultant", "skillCodes": ["VUE"], "domainCodes": ["HEALTH"], "projectCodes": ["P2"] } ]
    },
    { "code": "E3", "companyCode": "GHOST", "positions": [] }
  ]
}"#;

pub const EDUCATION: &str = r#"{
  "items": [
    {
      "code": "MSC", "companyCode": "uni", "title": "MSc Computer Science",
      "skillCodes": ["SQL", "Rust"], "domainCodes": ["HEALTH"], "projectCodes": ["P3"]
    }
  ]
}"#;

/// Every collection at its default path.
pub fn fixture_source() -> MemorySource {
    let paths = CollectionPaths::default();
    MemorySource::new()
        .with(paths.get(CollectionKind::Companies), COMPANIES)
        .with(paths.get(CollectionKind::Customers), CUSTOMERS)
        .with(paths.get(CollectionKind::Domains), DOMAINS)
        .with(paths.get(CollectionKind::Partners), PARTNERS)
        .with(paths.get(CollectionKind::Skills), SKILLS)
        .with(paths.get(CollectionKind::People), PEOPLE)
        .with(paths.get(CollectionKind::References), REFERENCES)
        .with(paths.get(CollectionKind::Projects), PROJECTS)
        .with(paths.get(CollectionKind::Experience), EXPERIENCE)
        .with(paths.get(CollectionKind::Education), EDUCATION)
}

/// A fresh portfolio over the fixtures, plus the counting source behind it.
pub fn fixture_portfolio() -> (Portfolio, Arc<CountingSource>) {
    let source = Arc::new(CountingSource::new(fixture_source()));
    let portfolio = Portfolio::new(source.clone(), &CollectionPaths::default());
    (portfolio, source)
}

pub fn codes<T: folio_core::Record>(items: &[T]) -> Vec<String> {
    items.iter().map(|i| i.code().to_string()).collect()
}
