pub mod errors;
pub mod sanitize;
pub mod validation;
