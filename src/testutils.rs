use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::ScheduleStore;
use crate::configuration::Configuration;
use crate::error::{InsertError, StoreError};
use crate::types::{Appointment, BusinessHours, UnavailabilityRange};

pub struct MockScheduleStoreInner {
    pub conflict: AtomicBool,
    pub slot_taken: AtomicBool,
    pub storage_down: AtomicBool,
    pub calls_to_appointments: AtomicU64,
    pub calls_to_unavailabilities: AtomicU64,
    pub calls_to_has_conflict: AtomicU64,
    pub calls_to_insert_appointment: AtomicU64,
    pub calls_to_insert_unavailability: AtomicU64,
    pub calls_to_remove_appointment: AtomicU64,
    pub calls_to_remove_unavailability: AtomicU64,
    pub appointments: Mutex<Vec<Appointment>>,
    pub unavailabilities: Mutex<Vec<UnavailabilityRange>>,
}

#[derive(Clone)]
pub struct MockScheduleStore(pub Arc<MockScheduleStoreInner>);

impl MockScheduleStore {
    pub fn new() -> Self {
        Self(Arc::new(MockScheduleStoreInner {
            conflict: AtomicBool::new(false),
            slot_taken: AtomicBool::new(false),
            storage_down: AtomicBool::new(false),
            calls_to_appointments: AtomicU64::default(),
            calls_to_unavailabilities: AtomicU64::default(),
            calls_to_has_conflict: AtomicU64::default(),
            calls_to_insert_appointment: AtomicU64::default(),
            calls_to_insert_unavailability: AtomicU64::default(),
            calls_to_remove_appointment: AtomicU64::default(),
            calls_to_remove_unavailability: AtomicU64::default(),
            appointments: Mutex::default(),
            unavailabilities: Mutex::default(),
        }))
    }

    fn storage_result(&self) -> Result<(), StoreError> {
        match self.0.storage_down.load(Ordering::SeqCst) {
            false => Ok(()),
            true => Err(StoreError::Database(
                diesel::result::Error::BrokenTransactionManager,
            )),
        }
    }
}

impl ScheduleStore for MockScheduleStore {
    fn appointments(&self, stylist: Option<i32>) -> Result<Vec<Appointment>, StoreError> {
        self.0.calls_to_appointments.fetch_add(1, Ordering::SeqCst);
        self.storage_result()?;
        Ok(self
            .0
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|appointment| stylist.is_none() || stylist == Some(appointment.stylist_id))
            .cloned()
            .collect())
    }

    fn unavailabilities(
        &self,
        stylist: Option<i32>,
    ) -> Result<Vec<UnavailabilityRange>, StoreError> {
        self.0
            .calls_to_unavailabilities
            .fetch_add(1, Ordering::SeqCst);
        self.storage_result()?;
        Ok(self
            .0
            .unavailabilities
            .lock()
            .unwrap()
            .iter()
            .filter(|range| stylist.is_none() || stylist == Some(range.stylist_id))
            .cloned()
            .collect())
    }

    fn has_conflict(&self, _stylist_id: i32, _start: DateTime<Utc>) -> Result<bool, StoreError> {
        self.0.calls_to_has_conflict.fetch_add(1, Ordering::SeqCst);
        self.storage_result()?;
        Ok(self.0.conflict.load(Ordering::SeqCst))
    }

    fn insert_appointment(&self, appointment: Appointment) -> Result<(), InsertError> {
        self.0
            .calls_to_insert_appointment
            .fetch_add(1, Ordering::SeqCst);
        self.storage_result()?;
        if self.0.slot_taken.load(Ordering::SeqCst) {
            return Err(InsertError::SlotTaken);
        }
        self.0.appointments.lock().unwrap().push(appointment);
        Ok(())
    }

    fn insert_unavailability_if_absent(
        &self,
        range: UnavailabilityRange,
    ) -> Result<(), StoreError> {
        self.0
            .calls_to_insert_unavailability
            .fetch_add(1, Ordering::SeqCst);
        self.storage_result()?;
        self.0.unavailabilities.lock().unwrap().push(range);
        Ok(())
    }

    fn remove_appointment(&self, id: Uuid) -> Result<(), StoreError> {
        self.0
            .calls_to_remove_appointment
            .fetch_add(1, Ordering::SeqCst);
        self.storage_result()?;
        self.0
            .appointments
            .lock()
            .unwrap()
            .retain(|appointment| appointment.id != id);
        Ok(())
    }

    fn remove_unavailability(&self, id: Uuid) -> Result<(), StoreError> {
        self.0
            .calls_to_remove_unavailability
            .fetch_add(1, Ordering::SeqCst);
        self.storage_result()?;
        self.0
            .unavailabilities
            .lock()
            .unwrap()
            .retain(|range| range.id != id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct TestConfiguration;

impl Configuration for TestConfiguration {
    fn password(&self) -> String {
        "123".into()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn business_hours(&self) -> BusinessHours {
        BusinessHours::default()
    }

    fn granularity_minutes(&self) -> u32 {
        30
    }
}
