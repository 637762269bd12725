//! Staging Project Core
//!
//! The project document and the rules that keep its embedded collections
//! consistent. Everything here is synchronous and storage-agnostic: handlers
//! load a [`Project`], call one of the operations below, and save the whole
//! document back.
//!
//! # Operations
//!
//! | Operation | Method |
//! |---|---|
//! | Create (with optional auto-created area) | [`Project::create`] |
//! | Add area | [`Project::add_area`] |
//! | Image-field relocation | [`Project::relocate_images`] |
//! | Add/update hotspot | [`Project::add_hotspot`] |
//! | Add/update info marker | [`Project::upsert_info`] |
//! | Delete area | [`Project::delete_area`] |
//! | Delete area + hotspot pair | [`Project::delete_area_and_hotspot`] |
//! | Library add / place / update / delete | [`Project::add_library_item`], [`Project::place_item`], [`Project::update_instance`], [`Project::delete_library_item`], [`Project::delete_instance`] |
//!
//! # References
//!
//! Cross references are plain strings inside the document:
//! - `Hotspot::parent_area_id` and `InfoMarker::area_id` hold an area's `_id`
//! - `Hotspot::child_area_id` holds an area's `areaId`
//! - `Area::parent_hotspot_id` holds a hotspot's `hotspotId`
//! - `ItemInstance::item_id` holds a library item's `itemId`
//!
//! Area keys passed in by callers may be any of `areaId`, `_id` or the alias
//! `id`; see [`Project::resolve_area`].

pub mod error;
pub mod ids;
pub mod model;
pub mod view;

mod areas;
mod deletion;
mod hotspots;
mod info;
mod items;
mod relocation;

pub use deletion::PairDeletion;
pub use error::GraphError;
pub use hotspots::{HotspotInput, HotspotPlacement};
pub use info::{InfoInput, InfoUpsert};
pub use items::{LibraryAddition, LibraryRemoval, Placement, PlacementPatch};
pub use model::{
    Area, Hotspot, ImageFields, ImageSource, InfoMarker, ItemInstance, LibraryItem, NewProject,
    Project, ProjectImage, ProjectPatch, StoredImage,
};
pub use view::{AreaView, ProjectSummary, ProjectView};
