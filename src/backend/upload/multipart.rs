/**
 * Multipart Form Reading
 *
 * Staging endpoints take `multipart/form-data`: text fields for names and
 * coordinates, and one image file. The whole form is drained into a
 * `FormData` before any validation so handlers can look fields up by name.
 */

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::backend::error::BackendError;
use crate::backend::upload::storage::UploadedFile;
use crate::shared::numeric::parse_number;
use crate::shared::SharedError;

#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl FormData {
    /// Drain every field of a multipart body
    pub async fn read(mut multipart: Multipart) -> Result<Self, BackendError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!("Failed to read multipart field: {}", e);
            BackendError::bad_request(format!("Invalid form data: {}", e.body_text()))
        })? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        tracing::warn!("Failed to read upload {}: {}", name, e);
                        BackendError::bad_request(format!("Invalid file upload: {}", e.body_text()))
                    })?;
                    form.files.push(UploadedFile {
                        field: name,
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        BackendError::bad_request(format!("Invalid form field {}: {}", name, e.body_text()))
                    })?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Trimmed text value, `None` when absent or blank
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Owned copy of [`FormData::text`]
    pub fn string(&self, name: &str) -> Option<String> {
        self.text(name).map(str::to_string)
    }

    /// Numeric value; absent or blank gives `None`, non-numeric is an error
    pub fn number(&self, name: &str) -> Result<Option<f64>, SharedError> {
        self.text(name).map(|text| parse_number(name, text)).transpose()
    }

    /// `"true"` or `"1"`; anything else present is false
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.text(name)
            .map(|text| matches!(text.to_ascii_lowercase().as_str(), "true" | "1"))
    }

    /// Remove and return the first file sent under `name`
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|file| file.field == name)?;
        Some(self.files.remove(index))
    }

    #[cfg(test)]
    pub(crate) fn with_fields(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            files: Vec::new(),
        }
    }
}
