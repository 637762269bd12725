/**
 * Staging Handler Types
 *
 * JSON bodies for the staging endpoints that do not take multipart forms.
 * Coordinates accept numbers or numeric strings.
 */

use serde::{Deserialize, Serialize};

use crate::shared::numeric::NumericInput;
use crate::shared::Pagination;
use crate::staging::ProjectView;

#[derive(Deserialize, Debug, Default)]
pub struct InfoRequest {
    pub description: Option<String>,
    pub x: Option<NumericInput>,
    pub y: Option<NumericInput>,
}

/// Body of `POST /{id}/areas/{areaId}/items`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceItemRequest {
    pub item_id: Option<String>,
    pub x: Option<NumericInput>,
    pub y: Option<NumericInput>,
    pub rotation: Option<NumericInput>,
    pub width: Option<NumericInput>,
    pub height: Option<NumericInput>,
    pub flip_x: Option<bool>,
    pub flip_y: Option<bool>,
}

/// Body of `PUT /{id}/areas/{areaId}/items/{instanceId}`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstanceRequest {
    pub x: Option<NumericInput>,
    pub y: Option<NumericInput>,
    pub rotation: Option<NumericInput>,
    pub width: Option<NumericInput>,
    pub height: Option<NumericInput>,
    pub flip_x: Option<bool>,
    pub flip_y: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AreaHotspotDeleteRequest {
    pub area_id: Option<String>,
    pub hotspot_id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ProjectIdsRequest {
    #[serde(default)]
    pub ids: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct ProjectsPage {
    pub projects: Vec<ProjectView>,
    pub pagination: Pagination,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsDeleted {
    pub deleted_count: u64,
}
