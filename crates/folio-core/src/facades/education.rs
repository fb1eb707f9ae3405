use super::{is_blank, CompaniesRepo};
use crate::code::contains_code;
use crate::entities::Education;
use crate::repository::Repository;
use std::ops::Deref;
use std::sync::Arc;

/// Education collection joined to Companies (the institutions).
pub struct EducationRepo {
    repo: Repository<Education>,
    companies: Arc<CompaniesRepo>,
}

impl Deref for EducationRepo {
    type Target = Repository<Education>;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}

impl EducationRepo {
    pub fn new(repo: Repository<Education>, companies: Arc<CompaniesRepo>) -> Self {
        Self { repo, companies }
    }

    /// Institution title: resolve the education entry, then its `companyCode`.
    pub async fn get_title_by_code(&self, code: Option<&str>) -> Option<String> {
        let company_code = self.company_code(code).await?;
        self.companies.get_title_by_code(Some(company_code.as_str())).await
    }

    pub async fn get_photo_url_by_code(&self, code: Option<&str>) -> Option<String> {
        let company_code = self.company_code(code).await?;
        self.companies.get_photo_url_by_code(Some(company_code.as_str())).await
    }

    pub async fn get_educations_by_skill_code(&self, skill_code: &str) -> Vec<Education> {
        self.referencing(skill_code, |e| &e.skill_codes).await
    }

    pub async fn get_educations_by_domain_code(&self, domain_code: &str) -> Vec<Education> {
        self.referencing(domain_code, |e| &e.domain_codes).await
    }

    pub async fn get_educations_by_project_code(&self, project_code: &str) -> Vec<Education> {
        self.referencing(project_code, |e| &e.project_codes).await
    }

    async fn company_code(&self, code: Option<&str>) -> Option<String> {
        self.repo
            .find(code, |e| e.company_code.clone())
            .await
            .flatten()
    }

    async fn referencing(
        &self,
        code: &str,
        codes: impl Fn(&Education) -> &Vec<String>,
    ) -> Vec<Education> {
        if is_blank(code) {
            return Vec::new();
        }
        self.repo.filter(|e| contains_code(codes(e), code)).await
    }
}
