use crate::backend::ScheduleStore;
use crate::catalog::Catalog;
use crate::error::{BookingError, InsertError, StoreError};
use crate::types::{
    Appointment, BookingConfirmation, BookingOutcome, BookingRequest, BusinessHours,
    CalendarRow, CalendarSnapshot, UnavailabilityForm, UnavailabilityRange, UnavailabilityRow,
};
use chrono::{DateTime, Timelike, Utc};
use tokio::sync::watch::{self, Sender};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Validates booking requests against the catalog and the store and either
/// commits an appointment or reports the slot as unavailable. Decisions
/// always re-read current store state; nothing is cached across calls.
#[derive(Debug, Clone)]
pub struct Scheduler<S: ScheduleStore> {
    store: S,
    catalog: Catalog,
    hours: BusinessHours,
    granularity_minutes: u32,
    sender: Sender<CalendarSnapshot>,
}

impl<S: ScheduleStore> Scheduler<S> {
    pub fn new(store: S, catalog: Catalog, hours: BusinessHours, granularity_minutes: u32) -> Self {
        let (sender, _) = watch::channel(CalendarSnapshot::default());
        Self {
            store,
            catalog,
            hours,
            granularity_minutes,
            sender,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Attempt to book a slot. Validation failures short-circuit in order
    /// and never mutate the store. A slot conflict is a normal outcome,
    /// not an error, and carries the same display payload as a success.
    pub fn attempt_booking(&self, request: &BookingRequest) -> Result<BookingOutcome, BookingError> {
        let service = self
            .catalog
            .service(request.service_id)
            .ok_or(BookingError::InvalidService)?;
        let stylist = self
            .catalog
            .active_stylist(request.stylist_id)
            .ok_or(BookingError::InvalidStylist)?;

        if !self.is_aligned(request.start_time) {
            return Err(BookingError::InvalidTimeGranularity(self.granularity_minutes));
        }
        if request.start_time < Utc::now() {
            return Err(BookingError::InvalidDate);
        }

        let confirmation = BookingConfirmation::new(
            &request.full_name,
            &service.name,
            &stylist.name,
            request.start_time,
        );

        // Friendly path: report a taken slot without attempting the insert.
        if self
            .store
            .has_conflict(request.stylist_id, request.start_time)?
        {
            return Ok(BookingOutcome::SlotUnavailable(confirmation));
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            start_time: request.start_time,
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            service_id: service.id,
            stylist_id: stylist.id,
        };

        match self.store.insert_appointment(appointment) {
            Ok(()) => {
                info!(
                    stylist = %stylist.name,
                    start = %request.start_time,
                    "appointment booked"
                );
                self.publish();
                Ok(BookingOutcome::Booked(confirmation))
            }
            // Lost the race against a concurrent booking. The uniqueness
            // constraint is the arbiter; the pre-check above is only an
            // optimization.
            Err(InsertError::SlotTaken) => Ok(BookingOutcome::SlotUnavailable(confirmation)),
            Err(InsertError::Store(err)) => Err(BookingError::Storage(err)),
        }
    }

    /// Declare an unavailability range. All-day sides resolve to business
    /// open/close; explicit times are clamped into business hours. Empty
    /// and inverted ranges are dropped silently, exact duplicates are not
    /// inserted twice. Existing appointments are not cross-checked; an
    /// overlap only manifests on the next booking attempt.
    pub fn create_unavailability(&self, form: &UnavailabilityForm) -> Result<(), BookingError> {
        if self.catalog.stylist(form.stylist_id).is_none() {
            return Err(BookingError::InvalidStylist);
        }
        if form.end_date < form.start_date {
            debug!("unavailability rejected: end date precedes start date");
            return Ok(());
        }

        let start_time = if form.start_all_day {
            self.hours.open
        } else {
            self.hours.clamp(form.start_time.unwrap_or(self.hours.open))
        };
        let end_time = if form.end_all_day {
            self.hours.close
        } else {
            self.hours.clamp(form.end_time.unwrap_or(self.hours.close))
        };

        let start = form.start_date.and_time(start_time).and_utc();
        let end = form.end_date.and_time(end_time).and_utc();

        if end <= start {
            debug!(%start, %end, "unavailability rejected: empty range");
            return Ok(());
        }

        self.store.insert_unavailability_if_absent(UnavailabilityRange {
            id: Uuid::new_v4(),
            stylist_id: form.stylist_id,
            start_time: start,
            end_time: end,
        })?;
        self.publish();
        Ok(())
    }

    pub fn remove_appointment(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.remove_appointment(id)?;
        self.publish();
        Ok(())
    }

    pub fn remove_unavailability(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.remove_unavailability(id)?;
        self.publish();
        Ok(())
    }

    /// Snapshot of the admin calendar, optionally filtered to one stylist.
    pub fn calendar(&self, stylist: Option<i32>) -> Result<CalendarSnapshot, StoreError> {
        let rows = self
            .store
            .appointments(stylist)?
            .into_iter()
            .map(|appointment| CalendarRow {
                appointment_id: appointment.id,
                start_time: appointment.start_time,
                full_name: appointment.full_name,
                service: self
                    .catalog
                    .service(appointment.service_id)
                    .map(|service| service.name.clone())
                    .unwrap_or_default(),
                email: appointment.email,
                phone: appointment.phone,
            })
            .collect();

        let unavailabilities = self
            .store
            .unavailabilities(stylist)?
            .into_iter()
            .map(|range| UnavailabilityRow {
                id: range.id,
                stylist_name: self
                    .catalog
                    .stylist(range.stylist_id)
                    .map(|stylist| stylist.name.clone())
                    .unwrap_or_default(),
                start_time: range.start_time,
                end_time: range.end_time,
            })
            .collect();

        Ok(CalendarSnapshot {
            rows,
            unavailabilities,
        })
    }

    /// Live calendar: yields the current snapshot immediately, then a new
    /// one after every successful mutation.
    pub fn calendar_stream(&self) -> WatchStream<CalendarSnapshot> {
        let stream = WatchStream::new(self.sender.subscribe());
        self.publish();
        stream
    }

    /// The reminder affordance logs what would be sent and performs no
    /// delivery. Returns whether the appointment was found.
    pub fn log_reminder(&self, appointment_id: Uuid) -> Result<bool, StoreError> {
        let appointments = self.store.appointments(None)?;
        match appointments
            .iter()
            .find(|appointment| appointment.id == appointment_id)
        {
            Some(appointment) => {
                let service = self
                    .catalog
                    .service(appointment.service_id)
                    .map(|service| service.name.as_str())
                    .unwrap_or("");
                info!(
                    customer = %appointment.full_name,
                    email = %appointment.email,
                    service,
                    start = %appointment.start_time,
                    "reminder would be sent"
                );
                Ok(true)
            }
            None => {
                warn!(%appointment_id, "reminder requested for unknown appointment");
                Ok(false)
            }
        }
    }

    fn is_aligned(&self, start: DateTime<Utc>) -> bool {
        let time = start.time();
        let minutes_into_day = time.hour() * 60 + time.minute();
        time.second() == 0
            && time.nanosecond() == 0
            && minutes_into_day % self.granularity_minutes == 0
    }

    fn publish(&self) {
        match self.calendar(None) {
            Ok(snapshot) => {
                self.sender.send_replace(snapshot);
            }
            Err(err) => error!(?err, "failed to load calendar snapshot"),
        }
    }
}
