//! Project input limits.

/// Maximum length of a project name.
pub const MAX_NAME_LEN: u64 = 200;

/// Maximum length of a project description.
pub const MAX_DESCRIPTION_LEN: u64 = 2000;

/// Reason returned when ownership of an archived project is transferred.
pub const ARCHIVED_TRANSFER_MESSAGE: &str = "Cannot transfer ownership of an archived project.";
