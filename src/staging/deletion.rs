//! Area and hotspot deletion
//!
//! Two deliberately different policies:
//! - [`Project::delete_area`] removes only the area (and the placements it
//!   holds). Hotspots and info markers pointing at it are left in place.
//! - [`Project::delete_area_and_hotspot`] removes the named entity plus its
//!   directly linked counterpart, one hop only.

use serde::Serialize;

use crate::staging::error::GraphError;
use crate::staging::model::{Area, Hotspot, Project};

/// What [`Project::delete_area_and_hotspot`] removed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDeletion {
    pub deleted_areas: Vec<Area>,
    pub deleted_hotspots: Vec<Hotspot>,
}

impl PairDeletion {
    pub fn is_empty(&self) -> bool {
        self.deleted_areas.is_empty() && self.deleted_hotspots.is_empty()
    }
}

impl Project {
    /// Remove one area.
    ///
    /// If the first area is removed its image passes to the new first area
    /// when that one has none. If a single area remains, its image moves up
    /// to the project.
    pub fn delete_area(&mut self, area_key: &str) -> Result<Area, GraphError> {
        let index = self.resolve_area(area_key).ok_or(GraphError::AreaNotFound)?;
        let removed = self.areas.remove(index);

        if index == 0 {
            if let (Some(first), Some(image)) = (self.areas.first_mut(), removed.image.as_ref()) {
                if first.image.is_none() {
                    first.image = Some(image.clone());
                }
            }
        }
        self.lift_single_area_image();

        tracing::debug!(project_id = %self.id, area_id = %removed.area_id, remaining = self.areas.len(), "area deleted");
        Ok(removed)
    }

    /// Remove an area and/or a hotspot together with the counterpart each is
    /// linked to.
    ///
    /// - an area takes the hotspot whose `hotspotId` is its `parentHotspotId`
    /// - a hotspot takes the area whose `areaId` is its `childAreaId`
    pub fn delete_area_and_hotspot(
        &mut self,
        area_key: Option<&str>,
        hotspot_key: Option<&str>,
    ) -> Result<PairDeletion, GraphError> {
        let area_key = area_key.map(str::trim).filter(|key| !key.is_empty());
        let hotspot_key = hotspot_key.map(str::trim).filter(|key| !key.is_empty());
        if area_key.is_none() && hotspot_key.is_none() {
            return Err(GraphError::validation(
                "areaId",
                "Either areaId or hotspotId is required",
            ));
        }

        let mut deleted = PairDeletion::default();

        if let Some(index) = area_key.and_then(|key| self.resolve_area(key)) {
            let area = self.areas.remove(index);
            if let Some(linked) = area.parent_hotspot_id.as_deref() {
                if let Some(position) = self.hotspots.iter().position(|h| h.hotspot_id == linked) {
                    deleted.deleted_hotspots.push(self.hotspots.remove(position));
                }
            }
            deleted.deleted_areas.push(area);
        }

        if let Some(key) = hotspot_key {
            if let Some(position) = self
                .hotspots
                .iter()
                .position(|h| h.hotspot_id == key || h.doc_id == key)
            {
                let hotspot = self.hotspots.remove(position);
                if let Some(linked) = hotspot.child_area_id.as_deref() {
                    if let Some(index) = self.areas.iter().position(|a| a.area_id == linked) {
                        deleted.deleted_areas.push(self.areas.remove(index));
                    }
                }
                deleted.deleted_hotspots.push(hotspot);
            }
        }

        if deleted.is_empty() {
            return Err(GraphError::NothingToDelete);
        }
        self.relocate_images();

        tracing::debug!(
            project_id = %self.id,
            areas = deleted.deleted_areas.len(),
            hotspots = deleted.deleted_hotspots.len(),
            "area/hotspot pair deleted"
        );
        Ok(deleted)
    }
}
