//! # Appointment Commands

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::new_id;
use crate::error::StoreResult;
use crate::store::Store;
use granel_core::{validation, Appointment, AppointmentStatus, CoreError};

/// Fields of the appointment form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentInput {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub patient: String,
    pub kind: String,
    pub notes: String,
}

/// Creates an appointment, or updates it in place when `id` is given.
///
/// New appointments start scheduled; editing never touches the status.
pub fn save_appointment(
    store: &mut Store,
    input: AppointmentInput,
    id: Option<String>,
) -> StoreResult<Appointment> {
    validation::validate_patient_name(&input.patient)?;

    let saved = store.try_mutate(|doc| match id {
        Some(id) => {
            let appointment = doc
                .appointment_mut(&id)
                .ok_or_else(|| CoreError::AppointmentNotFound(id.clone()))?;
            appointment.date = input.date;
            appointment.time = input.time;
            appointment.patient = input.patient;
            appointment.kind = input.kind;
            appointment.notes = input.notes;
            Ok(appointment.clone())
        }
        None => {
            let appointment = Appointment {
                id: new_id(),
                date: input.date,
                time: input.time,
                patient: input.patient,
                kind: input.kind,
                notes: input.notes,
                status: AppointmentStatus::Scheduled,
            };
            doc.appointments.push(appointment.clone());
            Ok(appointment)
        }
    })?;

    info!(id = %saved.id, date = %saved.date, "appointment saved");
    Ok(saved)
}

/// Advances the appointment one step along the fixed cycle
/// scheduled → done → cancelled → scheduled, returning the new status.
pub fn toggle_appointment_status(
    store: &mut Store,
    id: &str,
) -> StoreResult<AppointmentStatus> {
    let status = store.try_mutate(|doc| {
        let appointment = doc
            .appointment_mut(id)
            .ok_or_else(|| CoreError::AppointmentNotFound(id.to_string()))?;
        appointment.status = appointment.status.next();
        Ok(appointment.status)
    })?;
    info!(id = %id, ?status, "appointment status toggled");
    Ok(status)
}

/// Removes an appointment from the agenda.
pub fn delete_appointment(store: &mut Store, id: &str) -> StoreResult<()> {
    store.try_mutate(|doc| {
        let before = doc.appointments.len();
        doc.appointments.retain(|a| a.id != id);
        if doc.appointments.len() == before {
            return Err(CoreError::AppointmentNotFound(id.to_string()));
        }
        Ok(())
    })
}

/// The agenda listing, ordered by date then time.
pub fn agenda(store: &Store) -> Vec<Appointment> {
    let mut appointments = store.document().appointments.clone();
    appointments.sort_by_key(|a| (a.date, a.time));
    appointments
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("state.json")).unwrap();
        (dir, store)
    }

    fn consulta(day: &str, time: &str, patient: &str) -> AppointmentInput {
        AppointmentInput {
            date: day.parse().unwrap(),
            time: time.parse().unwrap(),
            patient: patient.to_string(),
            kind: "Consulta nutricional".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_create_and_edit_appointment() {
        let (_dir, mut store) = temp_store();
        let created =
            save_appointment(&mut store, consulta("2024-04-02", "14:30", "Ana"), None).unwrap();
        assert_eq!(created.status, AppointmentStatus::Scheduled);

        let mut edit = consulta("2024-04-03", "09:00", "Ana");
        edit.notes = "Retorno".to_string();
        let updated =
            save_appointment(&mut store, edit, Some(created.id.clone())).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.notes, "Retorno");
        assert_eq!(store.document().appointments.len(), 1);
    }

    #[test]
    fn test_edit_preserves_status() {
        let (_dir, mut store) = temp_store();
        let created =
            save_appointment(&mut store, consulta("2024-04-02", "14:30", "Ana"), None).unwrap();
        toggle_appointment_status(&mut store, &created.id).unwrap();

        let updated = save_appointment(
            &mut store,
            consulta("2024-04-05", "10:00", "Ana"),
            Some(created.id),
        )
        .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Done);
    }

    #[test]
    fn test_status_cycle_wraps_back_to_scheduled() {
        let (_dir, mut store) = temp_store();
        let created =
            save_appointment(&mut store, consulta("2024-04-02", "14:30", "Ana"), None).unwrap();

        assert_eq!(
            toggle_appointment_status(&mut store, &created.id).unwrap(),
            AppointmentStatus::Done
        );
        assert_eq!(
            toggle_appointment_status(&mut store, &created.id).unwrap(),
            AppointmentStatus::Cancelled
        );
        assert_eq!(
            toggle_appointment_status(&mut store, &created.id).unwrap(),
            AppointmentStatus::Scheduled
        );
    }

    #[test]
    fn test_missing_appointment_rejected() {
        let (_dir, mut store) = temp_store();
        assert!(toggle_appointment_status(&mut store, "missing").is_err());
        assert!(delete_appointment(&mut store, "missing").is_err());
        assert!(save_appointment(
            &mut store,
            consulta("2024-04-02", "14:30", "Ana"),
            Some("missing".to_string()),
        )
        .is_err());
    }

    #[test]
    fn test_agenda_sorted_by_date_then_time() {
        let (_dir, mut store) = temp_store();
        save_appointment(&mut store, consulta("2024-04-03", "09:00", "Bruna"), None).unwrap();
        save_appointment(&mut store, consulta("2024-04-02", "16:00", "Carla"), None).unwrap();
        save_appointment(&mut store, consulta("2024-04-02", "08:30", "Ana"), None).unwrap();

        let agenda = agenda(&store);
        let patients: Vec<&str> = agenda.iter().map(|a| a.patient.as_str()).collect();
        assert_eq!(patients, ["Ana", "Carla", "Bruna"]);
    }

    #[test]
    fn test_blank_patient_rejected() {
        let (_dir, mut store) = temp_store();
        let result =
            save_appointment(&mut store, consulta("2024-04-02", "14:30", "   "), None);
        assert!(result.is_err());
        assert!(store.document().appointments.is_empty());
    }
}
