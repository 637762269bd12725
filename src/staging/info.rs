//! Info markers
//!
//! There is at most one marker per (area, x, y). Writing to an occupied
//! coordinate replaces the description of the marker already there.

use serde::Serialize;

use crate::staging::error::GraphError;
use crate::staging::ids::{self, IdKind};
use crate::staging::model::{InfoMarker, Project};

#[derive(Debug, Clone, PartialEq)]
pub struct InfoInput {
    pub description: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoUpsert {
    #[serde(flatten)]
    pub info: InfoMarker,
    #[serde(skip)]
    pub created: bool,
}

impl Project {
    /// Add a marker to the area named by `area_key`, or update the marker at
    /// the same coordinate.
    pub fn upsert_info(&mut self, area_key: &str, input: InfoInput) -> Result<InfoUpsert, GraphError> {
        if input.description.trim().is_empty() {
            return Err(GraphError::validation("description", "Description is required"));
        }
        let area_index = self.resolve_area(area_key).ok_or(GraphError::AreaNotFound)?;
        let area_doc_id = self.areas[area_index].doc_id.clone();

        let existing = self
            .info
            .iter()
            .position(|info| info.area_id == area_doc_id && info.x == input.x && info.y == input.y);

        let (index, created) = match existing {
            Some(index) => {
                let info = &mut self.info[index];
                info.description = input.description;
                info.x = input.x;
                info.y = input.y;
                (index, false)
            }
            None => {
                self.info.push(InfoMarker {
                    doc_id: ids::document_id(),
                    info_id: ids::new_id(IdKind::Info),
                    description: input.description,
                    x: input.x,
                    y: input.y,
                    area_id: area_doc_id,
                });
                (self.info.len() - 1, true)
            }
        };

        Ok(InfoUpsert {
            info: self.info[index].clone(),
            created,
        })
    }

    /// Markers belonging to the area with document id `area_doc_id`
    pub fn info_for(&self, area_doc_id: &str) -> impl Iterator<Item = &InfoMarker> {
        let area_doc_id = area_doc_id.to_string();
        self.info.iter().filter(move |info| info.area_id == area_doc_id)
    }
}
