//! Project document model
//!
//! A [`Project`] is stored as one document. Its areas, hotspots, info markers
//! and library items are embedded collections that reference each other by
//! string id; nothing points outside the document.
//!
//! Field names serialize in the camelCase shape clients already consume
//! (`areaId`, `parentAreaId`, `imageUrl`, ...). Document-internal ids use
//! `_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::staging::error::GraphError;
use crate::staging::ids::{self, IdKind};

/// Where a project's direct image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    #[serde(rename = "fromgallery")]
    FromGallery,
    #[default]
    Capture,
}

/// A file accepted by object storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub url: String,
    pub storage_id: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
}

/// The project's own image, present only while it has at most one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImage {
    pub url: String,
    #[serde(rename = "public_id", default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(rename = "type", default)]
    pub source: ImageSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: u64,
}

impl ProjectImage {
    pub fn from_stored(stored: &StoredImage, source: ImageSource) -> Self {
        Self {
            url: stored.url.clone(),
            public_id: Some(stored.storage_id.clone()),
            source,
            original_name: Some(stored.original_name.clone()),
            mime_type: Some(stored.mime_type.clone()),
            size: stored.size,
        }
    }

    /// Build the project-level copy of an area's image.
    ///
    /// The original size is not tracked on areas, so it is reported as 0.
    pub fn lifted_from(image: &ImageFields) -> Self {
        let mime_type = match image.image_type.as_deref() {
            Some(subtype) if !subtype.is_empty() => format!("image/{}", subtype),
            _ => "image/jpeg".to_string(),
        };
        Self {
            url: image.image_url.clone(),
            public_id: image.image_public_id.clone(),
            source: ImageSource::Capture,
            original_name: image.image_name.clone(),
            mime_type: Some(mime_type),
            size: 0,
        }
    }
}

/// Image fields carried by areas, hotspots and library items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    /// Mime subtype, e.g. `png`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
}

impl ImageFields {
    pub fn from_stored(stored: &StoredImage) -> Self {
        Self {
            image_url: stored.url.clone(),
            image_public_id: Some(stored.storage_id.clone()),
            image_name: Some(stored.original_name.clone()),
            image_type: Some(mime_subtype(Some(&stored.mime_type))),
        }
    }

    pub fn from_project_image(image: &ProjectImage) -> Self {
        Self {
            image_url: image.url.clone(),
            image_public_id: image.public_id.clone(),
            image_name: image.original_name.clone(),
            image_type: Some(mime_subtype(image.mime_type.as_deref())),
        }
    }
}

/// `image/png` -> `png`; anything unparseable -> `jpg`
fn mime_subtype(mime_type: Option<&str>) -> String {
    mime_type
        .and_then(|mime| mime.split_once('/'))
        .map(|(_, subtype)| subtype.trim())
        .filter(|subtype| !subtype.is_empty())
        .unwrap_or("jpg")
        .to_string()
}

/// One view/room of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(rename = "_id")]
    pub doc_id: String,
    pub area_id: String,
    /// Third accepted identifier form
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub area_name: String,
    #[serde(flatten)]
    pub image: Option<ImageFields>,
    /// `hotspotId` of the hotspot that opens this area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_hotspot_id: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemInstance>,
}

impl Area {
    pub(crate) fn new(name: &str, image: Option<ImageFields>, with_alias: bool) -> Self {
        Self {
            doc_id: ids::document_id(),
            area_id: ids::new_id(IdKind::Area),
            alias: with_alias.then(|| ids::new_id(IdKind::Area)),
            area_name: name.trim().to_string(),
            image,
            parent_hotspot_id: None,
            items: Vec::new(),
        }
    }

    /// True when `key` is this area's `areaId`, `_id` or alias
    pub fn matches_key(&self, key: &str) -> bool {
        let key = key.trim();
        !key.is_empty()
            && (self.area_id == key || self.doc_id == key || self.alias.as_deref() == Some(key))
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// A clickable point in one area that opens another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    #[serde(rename = "_id")]
    pub doc_id: String,
    pub hotspot_id: String,
    pub title: String,
    pub x: f64,
    pub y: f64,
    /// `_id` of the containing area
    pub parent_area_id: String,
    /// `areaId` of the area this hotspot opens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_area_id: Option<String>,
    #[serde(flatten)]
    pub image: Option<ImageFields>,
}

/// A point annotation inside an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoMarker {
    #[serde(rename = "_id")]
    pub doc_id: String,
    #[serde(rename = "id")]
    pub info_id: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    /// `_id` of the owning area
    pub area_id: String,
}

fn default_item_size() -> f64 {
    100.0
}

/// A reusable asset in the project's library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    #[serde(rename = "_id")]
    pub doc_id: String,
    pub item_id: String,
    #[serde(flatten)]
    pub image: ImageFields,
    #[serde(default = "default_item_size")]
    pub width: f64,
    #[serde(default = "default_item_size")]
    pub height: f64,
}

/// One placement of a library item inside an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInstance {
    #[serde(rename = "_id")]
    pub doc_id: String,
    pub instance_id: String,
    pub item_id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
    /// Cached from the library item at placement time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Root aggregate: one staged property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub project_name: String,
    pub street_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apt_landmark: Option<String>,
    pub city_locality: String,
    pub state: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub image: Option<ProjectImage>,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub info: Vec<InfoMarker>,
    #[serde(default)]
    pub items: Vec<LibraryItem>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Details supplied when creating a project
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub project_name: String,
    pub street_address: String,
    pub apt_landmark: Option<String>,
    pub city_locality: String,
    pub state: String,
    pub country: String,
    pub note: Option<String>,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), GraphError> {
        let required = [
            ("projectName", &self.project_name),
            ("streetAddress", &self.street_address),
            ("cityLocality", &self.city_locality),
            ("state", &self.state),
            ("country", &self.country),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(GraphError::validation(*field, "Missing required fields")),
            None => Ok(()),
        }
    }
}

/// Partial update of a project's descriptive fields
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub project_name: Option<String>,
    pub street_address: Option<String>,
    pub apt_landmark: Option<String>,
    pub city_locality: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub note: Option<String>,
}

impl Project {
    /// Create a project owned by `owner`.
    ///
    /// When a direct image is supplied, one area named after the project is
    /// created carrying the same image. The project keeps its own copy so
    /// single-image readers keep working.
    pub fn create(
        details: NewProject,
        owner: Uuid,
        image: Option<ProjectImage>,
    ) -> Result<Self, GraphError> {
        details.validate()?;
        let now = Utc::now();
        let mut project = Self {
            id: Uuid::new_v4(),
            project_name: details.project_name.trim().to_string(),
            street_address: details.street_address.trim().to_string(),
            apt_landmark: details.apt_landmark,
            city_locality: details.city_locality.trim().to_string(),
            state: details.state.trim().to_string(),
            country: details.country.trim().to_string(),
            note: details.note,
            image,
            areas: Vec::new(),
            hotspots: Vec::new(),
            info: Vec::new(),
            items: Vec::new(),
            created_by: owner,
            created_at: now,
            updated_at: now,
        };
        project.auto_create_area_from_image();
        Ok(project)
    }

    /// Apply a partial update. Required fields cannot be blanked.
    pub fn apply_patch(&mut self, patch: ProjectPatch) -> Result<(), GraphError> {
        let required = [
            ("projectName", &patch.project_name),
            ("streetAddress", &patch.street_address),
            ("cityLocality", &patch.city_locality),
            ("state", &patch.state),
            ("country", &patch.country),
        ];
        if let Some((field, _)) = required
            .iter()
            .find(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        {
            return Err(GraphError::validation(*field, format!("{} cannot be empty", field)));
        }

        let assign = |target: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *target = value.trim().to_string();
            }
        };
        assign(&mut self.project_name, patch.project_name);
        assign(&mut self.street_address, patch.street_address);
        assign(&mut self.city_locality, patch.city_locality);
        assign(&mut self.state, patch.state);
        assign(&mut self.country, patch.country);
        if patch.apt_landmark.is_some() {
            self.apt_landmark = patch.apt_landmark;
        }
        if patch.note.is_some() {
            self.note = patch.note;
        }
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
