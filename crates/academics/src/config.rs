//! # Engine Configuration
//!
//! Switches for the structural rules the schema itself leaves open.

use error::{AppError, Result};

/// Behaviour switches shared by the engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicsConfig {
    /// Reject a second active class with the same name in a school.
    pub enforce_unique_class_names:   bool,
    /// Reject a second active section with the same name in a class.
    pub enforce_unique_section_names: bool,
    /// Reject enrollments whose session, class, section or student belong to
    /// a different school than the one addressed.
    pub strict_enrollment_tenancy:    bool,
    /// Capacity given to sections created without one.
    pub default_section_capacity:     i32,
}

impl Default for AcademicsConfig {
    fn default() -> Self {
        Self {
            enforce_unique_class_names:   true,
            enforce_unique_section_names: true,
            strict_enrollment_tenancy:    false,
            default_section_capacity:     30,
        }
    }
}

impl AcademicsConfig {
    /// Read the configuration from `CAMPUS_*` environment variables, falling
    /// back to the defaults for unset ones.
    ///
    /// Returns a `Config` error when a set variable does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let default_section_capacity = env_parse(
            "CAMPUS_DEFAULT_SECTION_CAPACITY",
            defaults.default_section_capacity,
        )?;
        if default_section_capacity < 1 {
            return Err(AppError::config(
                "CAMPUS_DEFAULT_SECTION_CAPACITY must be at least 1",
            ));
        }

        Ok(Self {
            enforce_unique_class_names: env_flag(
                "CAMPUS_ENFORCE_UNIQUE_CLASS_NAMES",
                defaults.enforce_unique_class_names,
            )?,
            enforce_unique_section_names: env_flag(
                "CAMPUS_ENFORCE_UNIQUE_SECTION_NAMES",
                defaults.enforce_unique_section_names,
            )?,
            strict_enrollment_tenancy: env_flag(
                "CAMPUS_STRICT_ENROLLMENT_TENANCY",
                defaults.strict_enrollment_tenancy,
            )?,
            default_section_capacity,
        })
    }
}

fn env_flag(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(value) => {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => Err(AppError::config(format!("Invalid boolean for {}: {}", key, other))),
            }
        },
        Err(_) => Ok(default),
    }
}

fn env_parse(key: &str, default: i32) -> Result<i32> {
    match std::env::var(key) {
        Ok(value) => {
            value
                .trim()
                .parse()
                .map_err(|_| AppError::config(format!("Invalid number for {}: {}", key, value)))
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const KEYS: [&str; 4] = [
        "CAMPUS_ENFORCE_UNIQUE_CLASS_NAMES",
        "CAMPUS_ENFORCE_UNIQUE_SECTION_NAMES",
        "CAMPUS_STRICT_ENROLLMENT_TENANCY",
        "CAMPUS_DEFAULT_SECTION_CAPACITY",
    ];

    fn clear_env() {
        for key in KEYS {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(AcademicsConfig::from_env().unwrap(), AcademicsConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("CAMPUS_ENFORCE_UNIQUE_CLASS_NAMES", "false");
            std::env::set_var("CAMPUS_STRICT_ENROLLMENT_TENANCY", "YES");
            std::env::set_var("CAMPUS_DEFAULT_SECTION_CAPACITY", "45");
        }

        let config = AcademicsConfig::from_env().unwrap();
        assert!(!config.enforce_unique_class_names);
        assert!(config.enforce_unique_section_names);
        assert!(config.strict_enrollment_tenancy);
        assert_eq!(config.default_section_capacity, 45);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_garbage() {
        clear_env();
        unsafe {
            std::env::set_var("CAMPUS_ENFORCE_UNIQUE_SECTION_NAMES", "maybe");
        }
        let err = AcademicsConfig::from_env().unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        clear_env();

        unsafe {
            std::env::set_var("CAMPUS_DEFAULT_SECTION_CAPACITY", "0");
        }
        assert!(AcademicsConfig::from_env().is_err());
        clear_env();
    }
}
