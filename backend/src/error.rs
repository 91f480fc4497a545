use time::OffsetDateTime;

use crate::alerts::{Alert, AlertKind};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid window for shift {uuid}: end {end} is not after start {start}")]
    InvalidWindow {
        uuid: String,
        start: OffsetDateTime,
        end: OffsetDateTime,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid mapping: {0}")]
    Mapping(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Arithmetic invariant violations, as opposed to bad data or config.
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, AppError::InvalidWindow { .. } | AppError::Internal(_))
    }

    pub fn into_alert(self) -> Alert {
        match &self {
            AppError::Mapping(_) | AppError::Json(_) => {
                tracing::warn!("Shift mapping rejected: {}", self);
                Alert::danger(
                    AlertKind::Mapping,
                    "Invalid shift mapping. Please provide a valid mapping!",
                )
            }
            AppError::Validation(e) => {
                let messages: Vec<String> = e
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let msgs: Vec<&str> = errors
                            .iter()
                            .filter_map(|err| err.message.as_ref().map(|m| m.as_ref()))
                            .collect();
                        if msgs.is_empty() {
                            let codes: Vec<&str> =
                                errors.iter().map(|err| err.code.as_ref()).collect();
                            format!("{}: {}", field, codes.join(", "))
                        } else {
                            msgs.join(", ")
                        }
                    })
                    .collect();
                tracing::warn!("Shift mapping incomplete: {}", messages.join("; "));
                Alert::danger(
                    AlertKind::Mapping,
                    format!("Shift mapping incomplete: {}", messages.join("; ")),
                )
            }
            AppError::NotFound(msg) => Alert::warning(AlertKind::Unconfigured, msg.clone()),
            AppError::InvalidWindow { .. } | AppError::Internal(_) => {
                tracing::error!("Shift resolution failed: {:?}", self);
                Alert::danger(AlertKind::InvalidRange, self.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
