//! Form field specs per entity

use super::form::{Field, FieldKind, FormResource};
use crate::client::models::{
    Appointment, AppointmentStatus, Doctor, DoctorOffice, MedicalRecord, Medication, Office,
    Patient, Prescription, Specialty, User,
};

const OFFICE_STATES: &[&str] = &["activo", "inactivo"];

const fn text(name: &'static str, label: &'static str) -> Field {
    Field::new(name, label, FieldKind::Text { max_len: None })
}

const fn capped(name: &'static str, label: &'static str, max_len: usize) -> Field {
    Field::new(name, label, FieldKind::Text { max_len: Some(max_len) })
}

const fn id_ref(name: &'static str, label: &'static str) -> Field {
    Field::new(name, label, FieldKind::PositiveInt)
}

impl FormResource for Patient {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            id_ref("id_usuario", "User ID"),
            Field::new("cedula", "National ID", FieldKind::Digits { len: 10 }),
            Field::new("fecha_nacimiento", "Birth date", FieldKind::Date),
            capped("telefono", "Phone", 20),
            capped("direccion", "Address", 150),
        ];
        FIELDS
    }
}

impl FormResource for Doctor {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            id_ref("id_usuario", "User ID"),
            id_ref("id_especialidad", "Specialty ID"),
            Field::new("horario_inicio", "Shift start", FieldKind::Time).optional(),
            Field::new("horario_fin", "Shift end", FieldKind::Time).optional(),
            text("dias_disponibles", "Available days").optional(),
        ];
        FIELDS
    }
}

impl FormResource for Specialty {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            text("nombre", "Name"),
            text("descripcion", "Description").optional(),
        ];
        FIELDS
    }
}

impl FormResource for Office {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            capped("nombre", "Name", 50),
            capped("ubicacion", "Location", 100),
            Field::new("estado", "Status", FieldKind::Choice(OFFICE_STATES)),
        ];
        FIELDS
    }
}

impl FormResource for DoctorOffice {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            id_ref("id_doctor", "Doctor ID"),
            id_ref("id_consultorio", "Office ID"),
        ];
        FIELDS
    }
}

impl FormResource for Appointment {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            id_ref("id_paciente", "Patient ID"),
            id_ref("id_doctor", "Doctor ID"),
            id_ref("id_consultorio", "Office ID"),
            Field::new("fecha_cita", "Date", FieldKind::Date),
            Field::new("hora_cita", "Time", FieldKind::Time),
            Field::new("estado", "Status", FieldKind::Choice(&AppointmentStatus::ALL)),
            text("motivo", "Reason").optional(),
        ];
        FIELDS
    }
}

impl FormResource for MedicalRecord {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            id_ref("id_cita", "Appointment ID").locked_on_edit(),
            text("diagnostico", "Diagnosis"),
            text("tratamiento", "Treatment"),
            text("observaciones", "Notes").optional(),
        ];
        FIELDS
    }
}

impl FormResource for Prescription {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            id_ref("id_historial", "Record ID"),
            Field::new("fecha_emision", "Issued on", FieldKind::Date).optional(),
        ];
        FIELDS
    }
}

impl FormResource for Medication {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            text("nombre", "Name"),
            text("descripcion", "Description").optional(),
            Field::new("precio", "Price", FieldKind::PositiveDecimal),
            Field::new("stock", "Stock", FieldKind::NonNegativeInt),
        ];
        FIELDS
    }
}

impl FormResource for User {
    fn fields() -> &'static [Field] {
        const FIELDS: &[Field] = &[
            text("nombre_usuario", "Username"),
            Field::new("password", "Password", FieldKind::Secret).required_on_create(),
            text("rol", "Role").optional(),
        ];
        FIELDS
    }
}
