//! Hotspots and the areas they open
//!
//! Adding a hotspot deduplicates on two sides at once:
//! - a hotspot with the same title under the same parent area is updated in
//!   place
//! - an area whose name equals the title anywhere in the project is reused as
//!   the child area and receives the new image
//!
//! Titles and names compare case-insensitively after trimming.

use serde::Serialize;

use crate::staging::areas::normalize_name;
use crate::staging::error::GraphError;
use crate::staging::ids::{self, IdKind};
use crate::staging::model::{Area, Hotspot, ImageFields, Project};

/// Position and title of a hotspot to add
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotInput {
    pub title: String,
    pub x: f64,
    pub y: f64,
}

/// Result of [`Project::add_hotspot`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotspotPlacement {
    pub hotspot: Hotspot,
    pub area: Area,
    #[serde(skip)]
    pub hotspot_created: bool,
    #[serde(skip)]
    pub area_created: bool,
}

impl Project {
    /// Add (or update) a hotspot under `parent_key` that opens the area named
    /// by its title.
    pub fn add_hotspot(
        &mut self,
        parent_key: &str,
        input: HotspotInput,
        image: ImageFields,
    ) -> Result<HotspotPlacement, GraphError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(GraphError::validation("title", "x, y and title are required"));
        }
        let parent_index = self
            .resolve_area(parent_key)
            .ok_or(GraphError::ParentAreaNotFound)?;
        let parent_doc_id = self.areas[parent_index].doc_id.clone();
        let parent_key = parent_key.trim();
        let wanted = normalize_name(title);

        let (child_index, area_created) = match self.area_named(title) {
            Some(index) => {
                self.areas[index].image = Some(image.clone());
                (index, false)
            }
            None => {
                self.areas.push(Area::new(title, Some(image.clone()), false));
                (self.areas.len() - 1, true)
            }
        };
        let child_area_id = self.areas[child_index].area_id.clone();

        let existing = self.hotspots.iter().position(|hotspot| {
            (hotspot.parent_area_id == parent_doc_id || hotspot.parent_area_id == parent_key)
                && normalize_name(&hotspot.title) == wanted
        });
        let (hotspot_index, hotspot_created) = match existing {
            Some(index) => {
                let hotspot = &mut self.hotspots[index];
                hotspot.x = input.x;
                hotspot.y = input.y;
                hotspot.image = Some(image);
                hotspot.child_area_id = Some(child_area_id);
                (index, false)
            }
            None => {
                self.hotspots.push(Hotspot {
                    doc_id: ids::document_id(),
                    hotspot_id: ids::new_id(IdKind::Hotspot),
                    title: title.to_string(),
                    x: input.x,
                    y: input.y,
                    parent_area_id: parent_doc_id,
                    child_area_id: Some(child_area_id),
                    image: Some(image),
                });
                (self.hotspots.len() - 1, true)
            }
        };

        self.areas[child_index].parent_hotspot_id =
            Some(self.hotspots[hotspot_index].hotspot_id.clone());

        self.relocate_images();

        tracing::debug!(
            project_id = %self.id,
            hotspot_id = %self.hotspots[hotspot_index].hotspot_id,
            hotspot_created,
            area_created,
            "hotspot stored"
        );

        Ok(HotspotPlacement {
            hotspot: self.hotspots[hotspot_index].clone(),
            area: self.areas[child_index].clone(),
            hotspot_created,
            area_created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::model::fixtures::*;
    use pretty_assertions::assert_eq;

    fn input(title: &str, x: f64, y: f64) -> HotspotInput {
        HotspotInput {
            title: title.to_string(),
            x,
            y,
        }
    }

    fn project_with_area() -> (Project, String) {
        let mut project = project_with_image("living.png");
        let area_id = project.areas[0].area_id.clone();
        (project, area_id)
    }

    #[test]
    fn test_new_hotspot_creates_child_area() {
        let (mut project, parent) = project_with_area();
        let placement = project
            .add_hotspot(&parent, input("Kitchen", 10.0, 20.0), image("k1.png"))
            .unwrap();

        assert!(placement.hotspot_created);
        assert!(placement.area_created);
        assert_eq!(project.areas.len(), 2);
        assert_eq!(placement.area.area_name, "Kitchen");
        assert_eq!(placement.hotspot.parent_area_id, project.areas[0].doc_id);
        assert_eq!(placement.hotspot.child_area_id.as_deref(), Some(placement.area.area_id.as_str()));
        assert_eq!(placement.area.parent_hotspot_id.as_deref(), Some(placement.hotspot.hotspot_id.as_str()));
    }

    #[test]
    fn test_same_title_updates_both_sides() {
        let (mut project, parent) = project_with_area();
        let first = project
            .add_hotspot(&parent, input("Kitchen", 10.0, 20.0), image("k1.png"))
            .unwrap();
        let second = project
            .add_hotspot(&parent, input("kitchen ", 30.0, 40.0), image("k2.png"))
            .unwrap();

        assert!(!second.hotspot_created);
        assert!(!second.area_created);
        assert_eq!(project.hotspots.len(), 1);
        assert_eq!(project.areas.len(), 2);
        assert_eq!(second.hotspot.hotspot_id, first.hotspot.hotspot_id);
        assert_eq!((second.hotspot.x, second.hotspot.y), (30.0, 40.0));
        assert_eq!(second.hotspot.image.unwrap().image_url, "/uploads/k2.png");

        let kitchen = project.area(&first.area.area_id).unwrap();
        assert_eq!(kitchen.image.as_ref().unwrap().image_url, "/uploads/k2.png");
    }

    #[test]
    fn test_title_matching_existing_area_reuses_it() {
        let (mut project, parent) = project_with_area();
        let bath = project.add_area("Bath", image("bath.png")).unwrap();

        let placement = project
            .add_hotspot(&parent, input("  BATH", 1.0, 2.0), image("bath2.png"))
            .unwrap();

        assert!(!placement.area_created);
        assert!(placement.hotspot_created);
        assert_eq!(project.areas.len(), 2);
        assert_eq!(placement.hotspot.child_area_id.as_deref(), Some(bath.area_id.as_str()));
        assert_eq!(placement.area.image.unwrap().image_url, "/uploads/bath2.png");
    }

    #[test]
    fn test_same_title_under_other_parent_is_new_hotspot() {
        let (mut project, parent) = project_with_area();
        let bath = project.add_area("Bath", image("bath.png")).unwrap();
        project
            .add_hotspot(&parent, input("Kitchen", 1.0, 1.0), image("k.png"))
            .unwrap();

        let placement = project
            .add_hotspot(&bath.doc_id, input("Kitchen", 5.0, 5.0), image("k.png"))
            .unwrap();

        assert!(placement.hotspot_created);
        assert!(!placement.area_created);
        assert_eq!(project.hotspots.len(), 2);
        assert_eq!(project.areas.len(), 3);
    }

    #[test]
    fn test_parent_resolves_by_alias() {
        let (mut project, _) = project_with_area();
        let alias = project.areas[0].alias.clone().unwrap();
        let placement = project
            .add_hotspot(&alias, input("Porch", 0.0, 0.0), image("p.png"))
            .unwrap();
        assert_eq!(placement.hotspot.parent_area_id, project.areas[0].doc_id);
    }

    #[test]
    fn test_creating_child_area_relocates_project_image() {
        let (mut project, parent) = project_with_area();
        project.lift_single_area_image();
        assert!(project.areas[0].image.is_none());

        project
            .add_hotspot(&parent, input("Kitchen", 1.0, 1.0), image("k.png"))
            .unwrap();

        assert!(project.image.is_none());
        assert!(project.areas.iter().all(|area| area.has_image()));
    }

    #[test]
    fn test_reused_only_area_image_is_lifted() {
        let mut project = empty_project();
        let hall = project.add_area("Hall", image("hall.png")).unwrap();

        let placement = project
            .add_hotspot(&hall.area_id, input("hall", 3.0, 4.0), image("hall2.png"))
            .unwrap();

        assert!(!placement.area_created);
        assert_eq!(project.areas.len(), 1);
        assert!(project.areas[0].image.is_none());
        assert_eq!(project.image.as_ref().unwrap().url, "/uploads/hall2.png");

        let settled = project.clone();
        project.relocate_images();
        assert_eq!(project, settled);
    }

    #[test]
    fn test_unknown_parent() {
        let (mut project, _) = project_with_area();
        let err = project
            .add_hotspot("area_0_missing", input("Kitchen", 1.0, 1.0), image("k.png"))
            .unwrap_err();
        assert_eq!(err, GraphError::ParentAreaNotFound);
        assert!(project.hotspots.is_empty());
        assert_eq!(project.areas.len(), 1);
    }

    #[test]
    fn test_blank_title_rejected() {
        let (mut project, parent) = project_with_area();
        let err = project
            .add_hotspot(&parent, input("   ", 1.0, 1.0), image("k.png"))
            .unwrap_err();
        assert!(matches!(err, GraphError::Validation { field: "title", .. }));
    }
}
