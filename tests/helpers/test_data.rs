//! Test data helpers for creating domain objects

use chrono::{DateTime, Utc};

use sk_portal::models::{
    EmergencyContact, Event, EventStatus, RegistrationDetails, User, UserRole,
};

/// Helper function to create a test user
pub fn create_test_user(id: i64, role: UserRole, barangay: Option<&str>) -> User {
    User {
        id,
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        email: format!("user{id}@example.com"),
        role,
        barangay: barangay.map(|s| s.to_string()),
        municipality: Some("Calamba".to_string()),
        province: Some("Laguna".to_string()),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Helper function to create a test event
pub fn create_test_event(id: i64, barangay: &str, max_participants: Option<i32>) -> Event {
    Event {
        id,
        title: format!("Event {id}"),
        description: Some("Community cleanup drive".to_string()),
        barangay: barangay.to_string(),
        municipality: Some("Calamba".to_string()),
        province: Some("Laguna".to_string()),
        max_participants,
        current_participants: 0,
        registration_deadline: None,
        is_registration_open: true,
        status: EventStatus::Upcoming,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Helper function to create a test event with a registration deadline
pub fn create_test_event_with_deadline(
    id: i64,
    barangay: &str,
    deadline: DateTime<Utc>,
) -> Event {
    let mut event = create_test_event(id, barangay, None);
    event.registration_deadline = Some(deadline);
    event
}

/// Helper function to create registration details
pub fn create_test_details() -> RegistrationDetails {
    RegistrationDetails {
        emergency_contact: EmergencyContact {
            name: "Ana Reyes".to_string(),
            phone: "09171234567".to_string(),
            relationship: "mother".to_string(),
        },
        special_requirements: None,
        notes: Some("first time participant".to_string()),
    }
}
