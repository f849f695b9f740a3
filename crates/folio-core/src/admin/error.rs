use thiserror::Error;

use crate::image::ImageError;
use crate::portfolio::{EntryId, ListError, ValidationError};

/// Everything the admin form can be told. Validation and not-found failures
/// are local and synchronous; none of them is fatal to the application and
/// none of them leaves a partial write in the shared store.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("invalid password")]
    InvalidPassword,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("entry {0} not found")]
    NotFound(EntryId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("shared store failure: {0}")]
    Store(anyhow::Error),
}

impl From<ListError> for AdminError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::NotFound(id) => Self::NotFound(id),
            // A duplicate id past validation means id allocation is broken;
            // surface it as a store-level failure rather than user feedback.
            ListError::DuplicateId(id) => {
                Self::Store(anyhow::anyhow!("allocated id {id} already in list"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Field;

    #[test]
    fn validation_message_names_fields() {
        let err = AdminError::from(ValidationError {
            missing: vec![Field::Title, Field::ImageUrl],
        });
        assert_eq!(err.to_string(), "missing required fields: title, imageUrl");
    }

    #[test]
    fn not_found_carries_the_id() {
        let err = AdminError::from(ListError::NotFound(EntryId::new(7)));
        assert!(matches!(err, AdminError::NotFound(id) if id == EntryId::new(7)));
    }
}
