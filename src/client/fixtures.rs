//! Test fixtures for API model types
//!
//! Small constructors with sensible defaults. Import via
//! `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use chrono::Utc;

use super::models::{
    Appointment, AppointmentStatus, Doctor, DoctorOffice, MedicalRecord, Medication, Office,
    OfficeStatus, Patient, Prescription, Specialty, User,
};
use crate::auth::token::{TokenPayload, encode_unsigned};

// ============================================================================
// Tokens
// ============================================================================

/// Unsigned token for `{id, username, rol}` expiring at `exp`.
pub fn token(id: i64, username: &str, rol: &str, exp: Option<i64>) -> String {
    encode_unsigned(&TokenPayload {
        id,
        username: username.to_string(),
        rol: rol.to_string(),
        iat: Some(Utc::now().timestamp()),
        exp,
    })
}

/// Admin token valid for one hour.
pub fn admin_token() -> String {
    token(1, "AdminUser", "admin", Some(Utc::now().timestamp() + 3600))
}

/// Regular-user token valid for one hour.
pub fn user_token(id: i64) -> String {
    token(id, "testuser", "user", Some(Utc::now().timestamp() + 3600))
}

/// Token that expired a minute ago.
pub fn expired_token() -> String {
    token(1, "AdminUser", "admin", Some(Utc::now().timestamp() - 60))
}

// ============================================================================
// Entities
// ============================================================================

pub fn patient(id: i64, user_id: i64) -> Patient {
    Patient {
        id,
        user_id,
        national_id: format!("{:010}", 1_000_000_000 + id),
        birth_date: "1990-01-01".to_string(),
        phone: "0991234567".to_string(),
        address: format!("Calle {}", id),
    }
}

pub fn doctor(id: i64, user_id: i64, specialty_id: i64) -> Doctor {
    Doctor {
        id,
        user_id,
        specialty_id,
        shift_start: Some("08:00".to_string()),
        shift_end: Some("16:00".to_string()),
        available_days: Some("Lunes a Viernes".to_string()),
    }
}

pub fn specialty(id: i64, name: &str) -> Specialty {
    Specialty {
        id,
        name: name.to_string(),
        description: None,
    }
}

pub fn office(id: i64, name: &str) -> Office {
    Office {
        id,
        name: name.to_string(),
        location: "Planta baja".to_string(),
        status: OfficeStatus::Activo,
    }
}

pub fn doctor_office(id: i64, doctor_id: i64, office_id: i64) -> DoctorOffice {
    DoctorOffice {
        id,
        doctor_id,
        office_id,
    }
}

pub fn appointment(id: i64, patient_id: i64) -> Appointment {
    Appointment {
        id,
        patient_id,
        doctor_id: 1,
        office_id: 1,
        date: "2025-03-01".to_string(),
        time: "09:30".to_string(),
        status: AppointmentStatus::Pendiente,
        reason: Some("Control".to_string()),
        created_at: None,
    }
}

pub fn medical_record(id: &str, appointment_id: i64) -> MedicalRecord {
    MedicalRecord {
        id: id.to_string(),
        appointment_id,
        diagnosis: "Gripe".to_string(),
        treatment: "Reposo".to_string(),
        notes: String::new(),
        created_at: Some("2025-01-01T10:00:00Z".to_string()),
        updated_at: None,
    }
}

pub fn prescription(id: i64, record_id: i64) -> Prescription {
    Prescription {
        id,
        record_id,
        issued_on: Some("2025-01-02".to_string()),
    }
}

pub fn medication(id: &str, name: &str) -> Medication {
    Medication {
        id: id.to_string(),
        name: name.to_string(),
        description: Some("Tabletas".to_string()),
        price: Some(2.5),
        stock: Some(100),
        created_at: None,
        updated_at: None,
    }
}

pub fn user(id: i64, username: &str, role: &str) -> User {
    User {
        id,
        username: username.to_string(),
        role: role.to_string(),
        created_at: None,
        profile: None,
    }
}
