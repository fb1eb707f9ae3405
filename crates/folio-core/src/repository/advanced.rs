//! Title/photo resolution for entity kinds that carry those fields.

use super::{Record, Repository};

/// An entity with a display title and an optional photo.
pub trait Titled: Record {
    fn title(&self) -> Option<&str>;
    fn photo_url(&self) -> Option<&str>;
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(str::to_owned)
}

impl<T: Titled> Repository<T> {
    /// Title of the entity with `code`; `None` if the code is missing, the
    /// entity is absent, or its title is empty.
    pub async fn get_title_by_code(&self, code: Option<&str>) -> Option<String> {
        self.find(code, |e| non_empty(e.title())).await.flatten()
    }

    /// Photo URL of the entity with `code`, with the same `None` rules as
    /// [`Repository::get_title_by_code`].
    pub async fn get_photo_url_by_code(&self, code: Option<&str>) -> Option<String> {
        self.find(code, |e| non_empty(e.photo_url())).await.flatten()
    }
}
