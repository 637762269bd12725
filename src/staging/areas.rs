//! Area creation and lookup

use crate::staging::error::GraphError;
use crate::staging::model::{Area, ImageFields, Project};

/// Case-insensitive, whitespace-trimmed form used for name and title matching
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Project {
    /// Index of the area identified by `areaId`, `_id` or alias.
    ///
    /// Every operation that takes an area key resolves it here once and works
    /// with the index from then on.
    pub fn resolve_area(&self, key: &str) -> Option<usize> {
        self.areas.iter().position(|area| area.matches_key(key))
    }

    pub fn area(&self, key: &str) -> Option<&Area> {
        self.resolve_area(key).map(|index| &self.areas[index])
    }

    /// Index of the first area whose name matches `name` ignoring case and
    /// surrounding whitespace
    pub fn area_named(&self, name: &str) -> Option<usize> {
        let wanted = normalize_name(name);
        self.areas
            .iter()
            .position(|area| normalize_name(&area.area_name) == wanted)
    }

    /// Append a new area with its own image, then relocate image fields.
    pub fn add_area(&mut self, name: &str, image: ImageFields) -> Result<Area, GraphError> {
        if name.trim().is_empty() {
            return Err(GraphError::validation("areaName", "Area name is required"));
        }
        let area = Area::new(name, Some(image), true);
        tracing::debug!(project_id = %self.id, area_id = %area.area_id, "adding area");
        self.areas.push(area);
        self.relocate_images();
        Ok(self.areas[self.areas.len() - 1].clone())
    }

    /// Create the first area from the project's direct image.
    ///
    /// Only meaningful right after creation; the project keeps its own copy of
    /// the image and relocation is not run.
    pub(crate) fn auto_create_area_from_image(&mut self) {
        if !self.areas.is_empty() {
            return;
        }
        if let Some(image) = &self.image {
            let area = Area::new(&self.project_name, Some(ImageFields::from_project_image(image)), true);
            self.areas.push(area);
        }
    }
}
