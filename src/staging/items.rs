//! Item library and placements
//!
//! Library items live on the project; placements (instances) live on areas
//! and point back at a library item by `itemId`. Removing a library item
//! removes every placement of it in every area.

use serde::{Deserialize, Serialize};

use crate::staging::error::GraphError;
use crate::staging::ids::{self, IdKind};
use crate::staging::model::{ImageFields, ItemInstance, LibraryItem, Project};

/// Position of a new placement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Partial update of a placement
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub flip_x: Option<bool>,
    pub flip_y: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryAddition {
    pub item: LibraryItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_item: Option<ItemInstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryRemoval {
    /// `None` when the library held no such item
    pub item: Option<LibraryItem>,
    pub removed_instances: usize,
}

impl Project {
    /// Add an item to the library.
    ///
    /// When `place_in` names an existing area the item is also placed there.
    /// An unknown area is ignored; the library entry is still created.
    pub fn add_library_item(
        &mut self,
        image: ImageFields,
        width: Option<f64>,
        height: Option<f64>,
        place_in: Option<(&str, Placement)>,
    ) -> LibraryAddition {
        let item = LibraryItem {
            doc_id: ids::document_id(),
            item_id: ids::new_id(IdKind::Item),
            image,
            width: width.unwrap_or(100.0),
            height: height.unwrap_or(100.0),
        };
        self.items.push(item.clone());

        let area_item = place_in.and_then(|(area_key, placement)| {
            let index = self.resolve_area(area_key)?;
            let instance = new_instance(&item, placement);
            self.areas[index].items.push(instance.clone());
            Some(instance)
        });

        tracing::debug!(project_id = %self.id, item_id = %item.item_id, placed = area_item.is_some(), "library item added");
        LibraryAddition { item, area_item }
    }

    /// Place an existing library item inside an area
    pub fn place_item(
        &mut self,
        area_key: &str,
        item_id: &str,
        placement: Placement,
    ) -> Result<ItemInstance, GraphError> {
        let item_id = item_id.trim();
        if item_id.is_empty() {
            return Err(GraphError::validation("itemId", "itemId is required"));
        }
        let area_index = self.resolve_area(area_key).ok_or(GraphError::AreaNotFound)?;
        let item = self
            .items
            .iter()
            .find(|item| item.item_id == item_id)
            .ok_or(GraphError::ItemNotFound)?;

        let instance = new_instance(item, placement);
        self.areas[area_index].items.push(instance.clone());
        Ok(instance)
    }

    /// Apply a partial update to one placement
    pub fn update_instance(
        &mut self,
        area_key: &str,
        instance_id: &str,
        patch: PlacementPatch,
    ) -> Result<ItemInstance, GraphError> {
        let area_index = self.resolve_area(area_key).ok_or(GraphError::AreaNotFound)?;
        let instance = self.areas[area_index]
            .items
            .iter_mut()
            .find(|instance| instance.instance_id == instance_id)
            .ok_or(GraphError::InstanceNotFound)?;

        if let Some(x) = patch.x {
            instance.x = x;
        }
        if let Some(y) = patch.y {
            instance.y = y;
        }
        if let Some(rotation) = patch.rotation {
            instance.rotation = rotation;
        }
        if patch.width.is_some() {
            instance.width = patch.width;
        }
        if patch.height.is_some() {
            instance.height = patch.height;
        }
        if let Some(flip_x) = patch.flip_x {
            instance.flip_x = flip_x;
        }
        if let Some(flip_y) = patch.flip_y {
            instance.flip_y = flip_y;
        }
        Ok(instance.clone())
    }

    /// Remove a library item and every placement of it.
    ///
    /// An id missing from the library is not an error; placements carrying
    /// it are still swept.
    pub fn delete_library_item(&mut self, item_id: &str) -> LibraryRemoval {
        let item = self
            .items
            .iter()
            .position(|item| item.item_id == item_id)
            .map(|index| self.items.remove(index));

        let mut removed_instances = 0;
        for area in &mut self.areas {
            let before = area.items.len();
            area.items.retain(|instance| instance.item_id != item_id);
            removed_instances += before - area.items.len();
        }

        tracing::debug!(
            project_id = %self.id,
            item_id,
            found = item.is_some(),
            removed_instances,
            "library item deleted"
        );
        LibraryRemoval {
            item,
            removed_instances,
        }
    }

    /// Remove one placement from one area
    pub fn delete_instance(&mut self, area_key: &str, instance_id: &str) -> Result<ItemInstance, GraphError> {
        let area_index = self.resolve_area(area_key).ok_or(GraphError::AreaNotFound)?;
        let items = &mut self.areas[area_index].items;
        let index = items
            .iter()
            .position(|instance| instance.instance_id == instance_id)
            .ok_or(GraphError::InstanceNotFound)?;
        Ok(items.remove(index))
    }
}

fn new_instance(item: &LibraryItem, placement: Placement) -> ItemInstance {
    ItemInstance {
        doc_id: ids::document_id(),
        instance_id: ids::new_id(IdKind::Instance),
        item_id: item.item_id.clone(),
        x: placement.x,
        y: placement.y,
        rotation: placement.rotation,
        width: placement.width,
        height: placement.height,
        flip_x: placement.flip_x,
        flip_y: placement.flip_y,
        image_url: Some(item.image.image_url.clone()),
    }
}
