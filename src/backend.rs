use crate::error::{InsertError, StoreError};
use crate::types::{Appointment, UnavailabilityRange};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Durable record of appointments and unavailability ranges. The store is
/// the sole owner of persisted rows; callers re-read on every decision and
/// never cache across calls.
pub trait ScheduleStore: Clone + Send + Sync + 'static {
    fn appointments(&self, stylist: Option<i32>) -> Result<Vec<Appointment>, StoreError>;

    fn unavailabilities(&self, stylist: Option<i32>)
        -> Result<Vec<UnavailabilityRange>, StoreError>;

    /// True if the stylist already has an appointment at exactly `start`,
    /// or `start` falls inside one of the stylist's unavailability ranges.
    fn has_conflict(&self, stylist_id: i32, start: DateTime<Utc>) -> Result<bool, StoreError>;

    /// Atomic insert-if-absent on the `(stylist_id, start_time)` slot.
    /// The uniqueness guarantee lives here, not in any pre-check.
    fn insert_appointment(&self, appointment: Appointment) -> Result<(), InsertError>;

    /// Skips the insert when an identical (stylist, start, end) range
    /// already exists.
    fn insert_unavailability_if_absent(&self, range: UnavailabilityRange)
        -> Result<(), StoreError>;

    /// Unconditional removal; unknown ids are a no-op.
    fn remove_appointment(&self, id: Uuid) -> Result<(), StoreError>;

    /// Unconditional removal; unknown ids are a no-op.
    fn remove_unavailability(&self, id: Uuid) -> Result<(), StoreError>;
}
