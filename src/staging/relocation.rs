//! Image-field relocation
//!
//! A project with exactly one area shows its image at the project level; a
//! project with two or more areas keeps every image on its areas. After any
//! change in area count, [`Project::relocate_images`] moves the image fields
//! to where they belong. Running it again on a repaired project changes
//! nothing.

use crate::staging::model::{ImageFields, Project, ProjectImage};

impl Project {
    /// Move image fields between the project and its first/only area.
    ///
    /// - two or more areas: the project's direct image is handed to the first
    ///   area if that area has none, and cleared from the project either way
    /// - exactly one area holding an image: the image is lifted onto the
    ///   project and cleared from the area
    /// - no areas: nothing to do
    pub fn relocate_images(&mut self) {
        match self.areas.len() {
            0 => {}
            1 => self.lift_single_area_image(),
            _ => {
                if let Some(image) = self.image.take() {
                    let first = &mut self.areas[0];
                    if first.image.is_none() {
                        tracing::debug!(area_id = %first.area_id, "moving project image onto first area");
                        first.image = Some(ImageFields::from_project_image(&image));
                    }
                }
            }
        }
    }

    /// Lift the image of a project's only area onto the project.
    pub(crate) fn lift_single_area_image(&mut self) {
        if self.areas.len() != 1 {
            return;
        }
        if let Some(image) = self.areas[0].image.take() {
            tracing::debug!(area_id = %self.areas[0].area_id, "lifting area image onto project");
            self.image = Some(ProjectImage::lifted_from(&image));
        }
    }
}
