pub mod mapping;
pub mod selection;
pub mod shift;
