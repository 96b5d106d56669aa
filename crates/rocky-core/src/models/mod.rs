pub mod finding;
pub mod patient;
pub mod result;
pub mod severity;
