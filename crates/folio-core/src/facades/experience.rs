use super::{is_blank, CompaniesRepo};
use crate::code::{codes_match, contains_code};
use crate::entities::{Experience, Position};
use crate::repository::Repository;
use std::ops::Deref;
use std::sync::Arc;

/// Experience collection joined to Companies for its display title and photo.
pub struct ExperienceRepo {
    repo: Repository<Experience>,
    companies: Arc<CompaniesRepo>,
}

impl Deref for ExperienceRepo {
    type Target = Repository<Experience>;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}

impl ExperienceRepo {
    pub fn new(repo: Repository<Experience>, companies: Arc<CompaniesRepo>) -> Self {
        Self { repo, companies }
    }

    /// Title of the company the experience was at. Two hops: experience, then
    /// company. Any missing link yields `None`.
    pub async fn get_title_by_code(&self, code: Option<&str>) -> Option<String> {
        let company_code = self.company_code(code).await?;
        self.companies.get_title_by_code(Some(company_code.as_str())).await
    }

    /// Photo (logo) of the company the experience was at.
    pub async fn get_photo_url_by_code(&self, code: Option<&str>) -> Option<String> {
        let company_code = self.company_code(code).await?;
        self.companies.get_photo_url_by_code(Some(company_code.as_str())).await
    }

    pub async fn get_experiences_by_skill_code(&self, skill_code: &str) -> Vec<Experience> {
        self.with_position(skill_code, |p| &p.skill_codes).await
    }

    pub async fn get_experiences_by_domain_code(&self, domain_code: &str) -> Vec<Experience> {
        self.with_position(domain_code, |p| &p.domain_codes).await
    }

    pub async fn get_experiences_by_project_code(&self, project_code: &str) -> Vec<Experience> {
        self.with_position(project_code, |p| &p.project_codes).await
    }

    pub async fn get_experiences_by_company_code(&self, company_code: &str) -> Vec<Experience> {
        if is_blank(company_code) {
            return Vec::new();
        }
        self.repo
            .filter(|e| {
                e.company_code
                    .as_deref()
                    .is_some_and(|c| codes_match(c, company_code))
            })
            .await
    }

    async fn company_code(&self, code: Option<&str>) -> Option<String> {
        self.repo
            .find(code, |e| e.company_code.clone())
            .await
            .flatten()
    }

    /// Experiences where any position's code list contains `code`.
    async fn with_position(
        &self,
        code: &str,
        codes: impl Fn(&Position) -> &Vec<String>,
    ) -> Vec<Experience> {
        if is_blank(code) {
            return Vec::new();
        }
        self.repo
            .filter(|e| e.positions.iter().any(|p| contains_code(codes(p), code)))
            .await
    }
}
