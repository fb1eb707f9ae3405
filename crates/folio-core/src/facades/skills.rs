use super::SkillsRepo;
use crate::entities::Skill;
use crate::search::same_text;

impl SkillsRepo {
    /// Distinct skill categories in first-seen order. Case-insensitive.
    pub async fn get_categories(&self) -> Vec<String> {
        let snapshot = self.snapshot().await;
        let mut out: Vec<String> = Vec::new();
        for category in snapshot.items().iter().filter_map(|s| s.category.as_deref()) {
            if !category.is_empty() && !out.iter().any(|c| same_text(c, category)) {
                out.push(category.to_string());
            }
        }
        out
    }

    pub async fn get_by_category(&self, category: &str) -> Vec<Skill> {
        self.filter(|s| {
            s.category
                .as_deref()
                .is_some_and(|c| same_text(c, category))
        })
        .await
    }
}
