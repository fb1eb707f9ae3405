//! Per-entity repository facades.
//!
//! Self-contained kinds are plain [`Repository`] aliases with extra inherent
//! methods where needed. Kinds whose display title lives in another
//! collection wrap their repository together with the facade they join
//! against, and deref to the wrapped repository for list/get/search.

mod education;
mod experience;
mod people;
mod projects;
mod references;
mod skills;

use crate::entities::{Company, Customer, Domain, Partner, Person, Project, Skill};
use crate::repository::Repository;

pub use education::EducationRepo;
pub use experience::ExperienceRepo;
pub use references::ReferencesRepo;

pub type CompaniesRepo = Repository<Company>;
pub type CustomersRepo = Repository<Customer>;
pub type DomainsRepo = Repository<Domain>;
pub type PartnersRepo = Repository<Partner>;
pub type PeopleRepo = Repository<Person>;
pub type ProjectsRepo = Repository<Project>;
pub type SkillsRepo = Repository<Skill>;

/// Reverse joins on an empty code match nothing and skip the load.
fn is_blank(code: &str) -> bool {
    code.is_empty()
}
