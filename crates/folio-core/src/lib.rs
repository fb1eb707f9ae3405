//! folio-core: data-access layer for the portfolio site.
//!
//! Career data (experience, education, projects, customers, skills, people,
//! domains, partners, references) lives in static JSON collections shaped
//! `{ items: [...], general?: {...} }`. This crate loads each collection lazily
//! and at most once, indexes it by case-insensitive `code`, and joins
//! collections through their foreign-key codes into view-ready records.
//!
//! ## Layers
//!
//! | Layer | Type | Role |
//! |-------|------|------|
//! | Source | [`CollectionSource`] | Fetch one document (file, HTTP, memory) |
//! | Base repository | [`Repository`] | Single-flight load, cache, index, search |
//! | Advanced repository | [`Titled`] | `get_title_by_code` / `get_photo_url_by_code` |
//! | Facades | [`ExperienceRepo`], [`ProjectsRepo`], ... | Per-collection joins |
//! | Registry | [`Portfolio`] | One facade per collection, shared by reference |
//! | Resolver | [`ExperienceView`], [`SkillUsage`], ... | Composite views |
//!
//! Load failures never surface as errors: they are logged and the collection
//! is cached as empty for the life of the repository.
//!
//! Collections are loaded on Tokio tasks, so repositories must be used from
//! within a Tokio runtime.

mod code;
mod config;
mod entities;
mod error;
mod facades;
mod query;
mod registry;
mod repository;
mod resolver;
mod search;
mod source;

pub use code::{codes_match, contains_code, normalize_code};
pub use config::{CollectionKind, CollectionPaths, FolioConfig};
pub use entities::{
    Company, Customer, Domain, Education, Experience, Partner, Person, Position, Project,
    Reference, Skill,
};
pub use error::{ConfigError, LoadError, LoadResult};
pub use facades::{
    CompaniesRepo, CustomersRepo, DomainsRepo, EducationRepo, ExperienceRepo, PartnersRepo,
    PeopleRepo, ProjectsRepo, ReferencesRepo, SkillsRepo,
};
pub use query::ListQuery;
pub use registry::Portfolio;
pub use repository::{Collection, Record, Repository, Titled};
pub use resolver::{
    resolve_codes, DomainUsage, EducationView, ExperienceView, PositionView, ProjectView,
    ReferenceView, SkillUsage,
};
pub use source::{create_source, CollectionSource, FileSource, HttpSource, MemorySource};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
