//! The portfolio registry: one facade per collection, built once and shared.

use crate::config::{CollectionKind, CollectionPaths, FolioConfig};
use crate::error::ConfigError;
use crate::facades::{
    CompaniesRepo, CustomersRepo, DomainsRepo, EducationRepo, ExperienceRepo, PartnersRepo,
    PeopleRepo, ProjectsRepo, ReferencesRepo, SkillsRepo,
};
use crate::repository::{Record, Repository};
use crate::source::{create_source, CollectionSource};
use std::sync::Arc;
use tracing::info;

/// Container for every collection facade.
///
/// Construct one per process (or per test) and pass it by reference. Two
/// `Portfolio` values never share caches.
pub struct Portfolio {
    pub companies: Arc<CompaniesRepo>,
    pub customers: Arc<CustomersRepo>,
    pub domains: Arc<DomainsRepo>,
    pub education: Arc<EducationRepo>,
    pub experience: Arc<ExperienceRepo>,
    pub partners: Arc<PartnersRepo>,
    pub people: Arc<PeopleRepo>,
    pub projects: Arc<ProjectsRepo>,
    pub references: Arc<ReferencesRepo>,
    pub skills: Arc<SkillsRepo>,
}

fn bind<T: Record>(
    kind: CollectionKind,
    paths: &CollectionPaths,
    source: &Arc<dyn CollectionSource>,
) -> Repository<T> {
    Repository::new(kind.name(), paths.get(kind), Arc::clone(source))
}

impl Portfolio {
    /// Wire every facade to `source` using the `paths` table. Nothing is
    /// fetched until first use.
    pub fn new(source: Arc<dyn CollectionSource>, paths: &CollectionPaths) -> Self {
        let companies = Arc::new(bind(CollectionKind::Companies, paths, &source));
        let people = Arc::new(bind(CollectionKind::People, paths, &source));
        Self {
            customers: Arc::new(bind(CollectionKind::Customers, paths, &source)),
            domains: Arc::new(bind(CollectionKind::Domains, paths, &source)),
            education: Arc::new(EducationRepo::new(
                bind(CollectionKind::Education, paths, &source),
                Arc::clone(&companies),
            )),
            experience: Arc::new(ExperienceRepo::new(
                bind(CollectionKind::Experience, paths, &source),
                Arc::clone(&companies),
            )),
            partners: Arc::new(bind(CollectionKind::Partners, paths, &source)),
            projects: Arc::new(bind(CollectionKind::Projects, paths, &source)),
            references: Arc::new(ReferencesRepo::new(
                bind(CollectionKind::References, paths, &source),
                Arc::clone(&people),
            )),
            skills: Arc::new(bind(CollectionKind::Skills, paths, &source)),
            companies,
            people,
        }
    }

    /// Build from configuration: pick the source for `data_root` and apply
    /// path overrides.
    pub fn from_config(config: &FolioConfig) -> Result<Self, ConfigError> {
        let paths = config.paths()?;
        let source = create_source(&config.data_root);
        Ok(Self::new(source, &paths))
    }

    /// Load every collection concurrently. Failures are logged per collection
    /// and leave that collection empty, as with lazy loading.
    pub async fn preload(&self) {
        futures_util::join!(
            self.companies.snapshot(),
            self.customers.snapshot(),
            self.domains.snapshot(),
            self.education.snapshot(),
            self.experience.snapshot(),
            self.partners.snapshot(),
            self.people.snapshot(),
            self.projects.snapshot(),
            self.references.snapshot(),
            self.skills.snapshot(),
        );
        info!("all collections loaded");
    }
}
