//! Read shapes
//!
//! Clients read a project as `{ project, areas }` where each area carries the
//! hotspots placed on it and its info markers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::staging::model::{Area, Hotspot, InfoMarker, LibraryItem, Project, ProjectImage};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub project_name: String,
    pub street_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apt_landmark: Option<String>,
    pub city_locality: String,
    pub state: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub image: Option<ProjectImage>,
    pub items: Vec<LibraryItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Omitted from public reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaView {
    #[serde(flatten)]
    pub area: Area,
    pub hotspots: Vec<Hotspot>,
    pub info: Vec<InfoMarker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub project: ProjectSummary,
    pub areas: Vec<AreaView>,
}

impl ProjectView {
    /// View for the owner or an admin
    pub fn full(project: &Project) -> Self {
        Self::build(project, true)
    }

    /// View for anonymous readers
    pub fn public(project: &Project) -> Self {
        Self::build(project, false)
    }

    fn build(project: &Project, with_owner: bool) -> Self {
        let areas = project
            .areas
            .iter()
            .map(|area| AreaView {
                area: area.clone(),
                hotspots: project
                    .hotspots
                    .iter()
                    .filter(|hotspot| hotspot.parent_area_id == area.doc_id)
                    .cloned()
                    .collect(),
                info: project.info_for(&area.doc_id).cloned().collect(),
            })
            .collect();

        Self {
            project: ProjectSummary {
                id: project.id,
                project_name: project.project_name.clone(),
                street_address: project.street_address.clone(),
                apt_landmark: project.apt_landmark.clone(),
                city_locality: project.city_locality.clone(),
                state: project.state.clone(),
                country: project.country.clone(),
                note: project.note.clone(),
                image: project.image.clone(),
                items: project.items.clone(),
                created_at: project.created_at,
                updated_at: project.updated_at,
                created_by: with_owner.then_some(project.created_by),
            },
            areas,
        }
    }
}
