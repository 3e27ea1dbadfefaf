//! Enum tests for the entity crate

use entity::sea_orm_active_enums::{EnrollmentStatus, UserRole};
use sea_orm::{ActiveEnum, Iterable};

/// Test UserRole display values
#[test]
fn test_user_role_values() {
    assert_eq!(format!("{}", UserRole::SuperAdmin), "superadmin");
    assert_eq!(format!("{}", UserRole::Principal), "principal");
    assert_eq!(format!("{}", UserRole::Teacher), "teacher");
    assert_eq!(format!("{}", UserRole::Student), "student");
}

/// Display and stored value agree for every role
#[test]
fn test_user_role_db_values_match_display() {
    for role in UserRole::iter() {
        assert_eq!(role.to_value(), role.to_string());
    }
}

/// Test EnrollmentStatus stored values
#[test]
fn test_enrollment_status_values() {
    assert_eq!(EnrollmentStatus::default(), EnrollmentStatus::Active);
    for status in EnrollmentStatus::iter() {
        assert_eq!(status.to_value(), status.to_string());
    }
    assert_eq!(
        EnrollmentStatus::try_from_value(&"dropout".to_string()).unwrap(),
        EnrollmentStatus::Dropout
    );
    assert!(EnrollmentStatus::try_from_value(&"graduated".to_string()).is_err());
}

/// Test enum serde uses the stored spelling
#[test]
fn test_enum_serialization() {
    assert_eq!(serde_json::to_string(&UserRole::SuperAdmin).unwrap(), "\"superadmin\"");
    let status: EnrollmentStatus = serde_json::from_str("\"transferred\"").unwrap();
    assert_eq!(status, EnrollmentStatus::Transferred);
}
