use thiserror::Error;

/// Rule violations raised by project document operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// A required input is missing or malformed
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Area not found")]
    AreaNotFound,

    #[error("Parent area not found")]
    ParentAreaNotFound,

    #[error("Item not found in library")]
    ItemNotFound,

    #[error("Item instance not found")]
    InstanceNotFound,

    /// Neither the named area nor the named hotspot exists
    #[error("Area or hotspot not found")]
    NothingToDelete,
}

impl GraphError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::Validation { .. })
    }
}
