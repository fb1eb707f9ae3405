use super::{is_blank, PeopleRepo};
use crate::code::codes_match;
use crate::entities::Person;

impl PeopleRepo {
    /// People whose `companyCode` names `company_code`.
    pub async fn get_people_by_company_code(&self, company_code: &str) -> Vec<Person> {
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
}
