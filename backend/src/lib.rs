pub mod alerts;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod panel;
pub mod realtime;
pub mod resolver;
pub mod selector;
pub mod store;

pub use error::{AppError, Result};
pub use panel::ShiftPanel;
