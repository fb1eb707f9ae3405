//! Portfolio entity records.
//!
//! Each record types only what the data-access layer interprets: the `code`,
//! the title/photo of titled kinds, and foreign-key codes used by joins. Every
//! other display field is kept verbatim in `extra` and written back on
//! serialization, so consumers see the original document shape.

use crate::repository::{Record, Titled};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! record {
    ($ty:ty) => {
        impl Record for $ty {
            fn code(&self) -> &str {
                &self.code
            }
        }
    };
}

macro_rules! titled {
    ($ty:ty) => {
        record!($ty);

        impl Titled for $ty {
            fn title(&self) -> Option<&str> {
                self.title.as_deref()
            }

            fn photo_url(&self) -> Option<&str> {
                self.photo_url.as_deref()
            }
        }
    };
}

/// Employer or school; referenced by `companyCode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Client a project was delivered for; referenced by `customerCode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Business domain (e.g. fintech); referenced by `domainCodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partner organisation; referenced by `partnerCodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Skill or technology; referenced by `skillCodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A person (colleague, referee); `title` holds the display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recommendation written by a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub partner_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub person_codes: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Employment at one company. The display title comes from the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub positions: Vec<Position>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One role held during an [`Experience`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_codes: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Study at one institution (a company record). `title` is the degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_codes: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

titled!(Company);
titled!(Customer);
titled!(Domain);
titled!(Partner);
titled!(Skill);
titled!(Person);
titled!(Project);
record!(Reference);
record!(Experience);
record!(Education);

impl Experience {
    /// Every skill code across all positions, first occurrence order.
    pub fn skill_codes(&self) -> Vec<&str> {
        collect_codes(self.positions.iter().flat_map(|p| &p.skill_codes))
    }

    pub fn domain_codes(&self) -> Vec<&str> {
        collect_codes(self.positions.iter().flat_map(|p| &p.domain_codes))
    }

    pub fn project_codes(&self) -> Vec<&str> {
        collect_codes(self.positions.iter().flat_map(|p| &p.project_codes))
    }
}

fn collect_codes<'a>(codes: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for code in codes {
        if !out.iter().any(|c| crate::code::codes_match(c, code)) {
            out.push(code.as_str());
        }
    }
    out
}
