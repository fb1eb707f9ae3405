use super::{is_blank, PeopleRepo};
use crate::code::codes_match;
use crate::entities::Reference;
use crate::repository::Repository;
use std::ops::Deref;
use std::sync::Arc;

/// References joined to People: a reference is titled by its author.
pub struct ReferencesRepo {
    repo: Repository<Reference>,
    people: Arc<PeopleRepo>,
}

impl Deref for ReferencesRepo {
    type Target = Repository<Reference>;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}

impl ReferencesRepo {
    pub fn new(repo: Repository<Reference>, people: Arc<PeopleRepo>) -> Self {
        Self { repo, people }
    }

    /// Name of the person who wrote the reference.
    pub async fn get_title_by_code(&self, code: Option<&str>) -> Option<String> {
        let person_code = self.person_code(code).await?;
        self.people.get_title_by_code(Some(person_code.as_str())).await
    }

    pub async fn get_photo_url_by_code(&self, code: Option<&str>) -> Option<String> {
        let person_code = self.person_code(code).await?;
        self.people.get_photo_url_by_code(Some(person_code.as_str())).await
    }

    pub async fn get_references_by_person_code(&self, person_code: &str) -> Vec<Reference> {
        if is_blank(person_code) {
            return Vec::new();
        }
        self.repo
            .filter(|r| {
                r.person_code
                    .as_deref()
                    .is_some_and(|c| codes_match(c, person_code))
            })
            .await
    }

    /// References tied to a company directly through their own `companyCode`.
    pub async fn get_references_by_company_code(&self, company_code: &str) -> Vec<Reference> {
        if is_blank(company_code) {
            return Vec::new();
        }
        self.repo
            .filter(|r| {
                r.company_code
                    .as_deref()
                    .is_some_and(|c| codes_match(c, company_code))
            })
            .await
    }

    async fn person_code(&self, code: Option<&str>) -> Option<String> {
        self.repo
            .find(code, |r| r.person_code.clone())
            .await
            .flatten()
    }
}
