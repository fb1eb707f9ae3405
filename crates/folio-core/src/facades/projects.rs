use super::{is_blank, ProjectsRepo};
use crate::code::{codes_match, contains_code};
use crate::entities::Project;

impl ProjectsRepo {
    /// Projects whose `skillCodes` contain `skill_code`. Scans the collection.
    pub async fn get_projects_by_skill_code(&self, skill_code: &str) -> Vec<Project> {
        self.referencing(skill_code, |p| &p.skill_codes).await
    }

    pub async fn get_projects_by_domain_code(&self, domain_code: &str) -> Vec<Project> {
        self.referencing(domain_code, |p| &p.domain_codes).await
    }

    pub async fn get_projects_by_partner_code(&self, partner_code: &str) -> Vec<Project> {
        self.referencing(partner_code, |p| &p.partner_codes).await
    }

    pub async fn get_projects_by_person_code(&self, person_code: &str) -> Vec<Project> {
        self.referencing(person_code, |p| &p.person_codes).await
    }

    pub async fn get_projects_by_customer_code(&self, customer_code: &str) -> Vec<Project> {
        if is_blank(customer_code) {
            return Vec::new();
        }
        self.filter(|p| {
            p.customer_code
                .as_deref()
                .is_some_and(|c| codes_match(c, customer_code))
        })
        .await
    }

    pub async fn get_projects_by_company_code(&self, company_code: &str) -> Vec<Project> {
        if is_blank(company_code) {
            return Vec::new();
        }
        self.filter(|p| {
            p.company_code
                .as_deref()
                .is_some_and(|c| codes_match(c, company_code))
        })
        .await
    }

    async fn referencing(&self, code: &str, codes: impl Fn(&Project) -> &Vec<String>) -> Vec<Project> {
        if is_blank(code) {
            return Vec::new();
        }
        self.filter(|p| contains_code(codes(p), code)).await
    }
}
