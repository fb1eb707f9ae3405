//! Cross-collection resolution: composite, view-ready records.
//!
//! Every view is assembled from two primitives:
//! - forward join: foreign code(s) → entities of another collection
//!   ([`resolve_codes`], [`Repository::get_by_code`]);
//! - reverse join: code → every entity whose foreign-key list contains it
//!   (the `get_*_by_*_code` facade methods).
//!
//! Dangling references resolve to `None` or are left out of lists. Hops are
//! awaited one after another; each one may trigger its own collection load.

use crate::code::codes_match;
use crate::entities::{
    Company, Customer, Domain, Education, Experience, Partner, Person, Position, Project,
    Reference, Skill,
};
use crate::registry::Portfolio;
use crate::repository::{Record, Repository};
use serde::Serialize;

/// Forward join over a list of codes. Keeps the order of `codes`, drops
/// unknown codes and repeats of the same code.
pub async fn resolve_codes<T: Record, S: AsRef<str>>(repo: &Repository<T>, codes: &[S]) -> Vec<T> {
    if codes.is_empty() {
        return Vec::new();
    }
    let snapshot = repo.snapshot().await;
    let mut out: Vec<T> = Vec::with_capacity(codes.len());
    for code in codes {
        if let Some(entity) = snapshot.get(code.as_ref()) {
            if !out.iter().any(|e| codes_match(e.code(), entity.code())) {
                out.push(entity.clone());
            }
        }
    }
    out
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    pub position: Position,
    pub skills: Vec<Skill>,
    pub domains: Vec<Domain>,
    pub projects: Vec<Project>,
}

/// An experience with its company and every position's references resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceView {
    pub experience: Experience,
    pub company: Option<Company>,
    pub title: Option<String>,
    pub photo_url: Option<String>,
    pub positions: Vec<PositionView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationView {
    pub education: Education,
    pub institution: Option<Company>,
    pub skills: Vec<Skill>,
    pub domains: Vec<Domain>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub project: Project,
    pub company: Option<Company>,
    pub customer: Option<Customer>,
    pub skills: Vec<Skill>,
    pub domains: Vec<Domain>,
    pub partners: Vec<Partner>,
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceView {
    pub reference: Reference,
    pub person: Option<Person>,
    pub company: Option<Company>,
}

/// Where a skill is used: reverse joins over three collections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillUsage {
    pub skill: Skill,
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainUsage {
    pub domain: Domain,
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
}

impl Portfolio {
    pub async fn experience_view(&self, code: Option<&str>) -> Option<ExperienceView> {
        let experience = self.experience.get_by_code(code).await?;
        let company = self
            .companies
            .get_by_code(experience.company_code.as_deref())
            .await;
        let title = self.experience.get_title_by_code(Some(experience.code.as_str())).await;
        let photo_url = self
            .experience
            .get_photo_url_by_code(Some(experience.code.as_str()))
            .await;

        let mut positions = Vec::with_capacity(experience.positions.len());
        for position in &experience.positions {
            positions.push(PositionView {
                skills: resolve_codes(&self.skills, &position.skill_codes).await,
                domains: resolve_codes(&self.domains, &position.domain_codes).await,
                projects: resolve_codes(&self.projects, &position.project_codes).await,
                position: position.clone(),
            });
        }

        Some(ExperienceView {
            experience,
            company,
            title,
            photo_url,
            positions,
        })
    }

    pub async fn education_view(&self, code: Option<&str>) -> Option<EducationView> {
        let education = self.education.get_by_code(code).await?;
        let institution = self
            .companies
            .get_by_code(education.company_code.as_deref())
            .await;
        Some(EducationView {
            institution,
            skills: resolve_codes(&self.skills, &education.skill_codes).await,
            domains: resolve_codes(&self.domains, &education.domain_codes).await,
            projects: resolve_codes(&self.projects, &education.project_codes).await,
            education,
        })
    }

    pub async fn project_view(&self, code: Option<&str>) -> Option<ProjectView> {
        let project = self.projects.get_by_code(code).await?;
        Some(ProjectView {
            company: self.companies.get_by_code(project.company_code.as_deref()).await,
            customer: self.customers.get_by_code(project.customer_code.as_deref()).await,
            skills: resolve_codes(&self.skills, &project.skill_codes).await,
            domains: resolve_codes(&self.domains, &project.domain_codes).await,
            partners: resolve_codes(&self.partners, &project.partner_codes).await,
            people: resolve_codes(&self.people, &project.person_codes).await,
            project,
        })
    }

    /// A reference with its author; the company is the reference's own
    /// `companyCode`, falling back to the author's.
    pub async fn reference_view(&self, code: Option<&str>) -> Option<ReferenceView> {
        let reference = self.references.get_by_code(code).await?;
        let person = self.people.get_by_code(reference.person_code.as_deref()).await;
        let company_code = reference
            .company_code
            .clone()
            .or_else(|| person.as_ref().and_then(|p| p.company_code.clone()));
        let company = self.companies.get_by_code(company_code.as_deref()).await;
        Some(ReferenceView {
            reference,
            person,
            company,
        })
    }

    pub async fn skill_usage(&self, code: Option<&str>) -> Option<SkillUsage> {
        let skill = self.skills.get_by_code(code).await?;
        Some(SkillUsage {
            projects: self.projects.get_projects_by_skill_code(&skill.code).await,
            experiences: self.experience.get_experiences_by_skill_code(&skill.code).await,
            educations: self.education.get_educations_by_skill_code(&skill.code).await,
            skill,
        })
    }

    pub async fn domain_usage(&self, code: Option<&str>) -> Option<DomainUsage> {
        let domain = self.domains.get_by_code(code).await?;
        Some(DomainUsage {
            projects: self.projects.get_projects_by_domain_code(&domain.code).await,
            experiences: self.experience.get_experiences_by_domain_code(&domain.code).await,
            educations: self.education.get_educations_by_domain_code(&domain.code).await,
            domain,
        })
    }

    /// Every experience as a view, in document order.
    pub async fn experience_views(&self) -> Vec<ExperienceView> {
        let mut out = Vec::new();
        for experience in self.experience.get_list().await {
            if let Some(view) = self.experience_view(Some(experience.code.as_str())).await {
                out.push(view);
            }
        }
        out
    }
}
