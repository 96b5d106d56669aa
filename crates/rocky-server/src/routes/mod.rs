pub mod diagnostics;
pub mod health;
pub mod interactions;
pub mod rules;
pub mod settings;
pub mod static_files;
