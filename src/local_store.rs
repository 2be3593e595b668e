use crate::backend::ScheduleStore;
use crate::error::{InsertError, StoreError};
use crate::types::{Appointment, UnavailabilityRange};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

/// In-memory store for running without a database. The slot-uniqueness
/// invariant is enforced by performing the existence check and the insert
/// under a single lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    appointments: HashMap<Uuid, Appointment>,
    unavailabilities: HashMap<Uuid, UnavailabilityRange>,
}

impl Inner {
    fn slot_taken(&self, stylist_id: i32, start: DateTime<Utc>) -> bool {
        self.appointments
            .values()
            .any(|appointment| appointment.stylist_id == stylist_id && appointment.start_time == start)
    }
}

impl ScheduleStore for LocalStore {
    fn appointments(&self, stylist: Option<i32>) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut appointments: Vec<Appointment> = inner
            .appointments
            .values()
            .filter(|appointment| stylist.is_none() || stylist == Some(appointment.stylist_id))
            .cloned()
            .collect();
        appointments.sort_unstable_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(appointments)
    }

    fn unavailabilities(
        &self,
        stylist: Option<i32>,
    ) -> Result<Vec<UnavailabilityRange>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut ranges: Vec<UnavailabilityRange> = inner
            .unavailabilities
            .values()
            .filter(|range| stylist.is_none() || stylist == Some(range.stylist_id))
            .cloned()
            .collect();
        ranges.sort_unstable_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(ranges)
    }

    fn has_conflict(&self, stylist_id: i32, start: DateTime<Utc>) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.slot_taken(stylist_id, start) {
            return Ok(true);
        }
        Ok(inner
            .unavailabilities
            .values()
            .any(|range| range.stylist_id == stylist_id && range.contains(start)))
    }

    fn insert_appointment(&self, appointment: Appointment) -> Result<(), InsertError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.slot_taken(appointment.stylist_id, appointment.start_time) {
            return Err(InsertError::SlotTaken);
        }
        inner.appointments.insert(appointment.id, appointment);
        Ok(())
    }

    fn insert_unavailability_if_absent(
        &self,
        range: UnavailabilityRange,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let exists = inner.unavailabilities.values().any(|existing| {
            existing.stylist_id == range.stylist_id
                && existing.start_time == range.start_time
                && existing.end_time == range.end_time
        });
        if !exists {
            inner.unavailabilities.insert(range.id, range);
        }
        Ok(())
    }

    fn remove_appointment(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.lock().unwrap().appointments.remove(&id);
        Ok(())
    }

    fn remove_unavailability(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.lock().unwrap().unavailabilities.remove(&id);
        Ok(())
    }
}
