//! Appointment, clinical history, prescription and medication display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY, format_timestamp, or_empty, truncate_string};
use crate::client::models::{Appointment, MedicalRecord, Medication, Prescription};

/// Appointment display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AppointmentDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "PATIENT")]
    pub patient_id: i64,

    #[tabled(rename = "DOCTOR")]
    pub doctor_id: i64,

    #[tabled(rename = "OFFICE")]
    pub office_id: i64,

    /// Date and time, e.g. "2025-03-01 09:30"
    #[tabled(rename = "WHEN")]
    pub when: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "REASON")]
    pub reason: String,
}

impl From<&Appointment> for AppointmentDisplay {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            office_id: appointment.office_id,
            when: format!(
                "{} {}",
                format_timestamp(Some(&appointment.date)),
                appointment.time
            )
            .trim()
            .to_string(),
            status: appointment.status.to_string(),
            reason: truncate_string(&or_empty(appointment.reason.as_deref()), 40),
        }
    }
}

/// Medical record display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MedicalRecordDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "APPOINTMENT")]
    pub appointment_id: i64,

    #[tabled(rename = "DIAGNOSIS")]
    pub diagnosis: String,

    #[tabled(rename = "TREATMENT")]
    pub treatment: String,

    #[tabled(rename = "NOTES")]
    pub notes: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&MedicalRecord> for MedicalRecordDisplay {
    fn from(record: &MedicalRecord) -> Self {
        Self {
            id: record.id.clone(),
            appointment_id: record.appointment_id,
            diagnosis: truncate_string(&record.diagnosis, 40),
            treatment: truncate_string(&record.treatment, 40),
            notes: truncate_string(&or_empty(Some(&record.notes)), 40),
            created: format_timestamp(record.created_at.as_deref()),
        }
    }
}

/// Prescription display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PrescriptionDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "RECORD")]
    pub record_id: i64,

    #[tabled(rename = "ISSUED")]
    pub issued_on: String,
}

impl From<&Prescription> for PrescriptionDisplay {
    fn from(prescription: &Prescription) -> Self {
        Self {
            id: prescription.id,
            record_id: prescription.record_id,
            issued_on: format_timestamp(prescription.issued_on.as_deref()),
        }
    }
}

/// Medication display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MedicationDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,

    #[tabled(rename = "PRICE")]
    pub price: String,

    #[tabled(rename = "STOCK")]
    pub stock: String,
}

impl From<&Medication> for MedicationDisplay {
    fn from(medication: &Medication) -> Self {
        Self {
            id: medication.id.clone(),
            name: medication.name.clone(),
            description: truncate_string(&or_empty(medication.description.as_deref()), 50),
            price: medication
                .price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| EMPTY.to_string()),
            stock: medication
                .stock
                .map(|s| s.to_string())
                .unwrap_or_else(|| EMPTY.to_string()),
        }
    }
}
