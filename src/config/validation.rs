//! Configuration validation trait

/// Validation for configuration sections
///
/// Each section reports its first problem as a plain string; the top-level
/// [`Config::validate`](crate::config::Config::validate) wraps it with the
/// section name.
pub trait Validate {
    /// Check the section for inconsistent or unusable values
    fn validate(&self) -> Result<(), String>;
}
