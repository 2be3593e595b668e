use crate::schema::{appointments, stylist_unavailabilities};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::{Insertable, Queryable};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9 ()./-]{6,20}$").unwrap();
}

/// Reference data: a bookable service with a fixed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub price: u32,
}

/// Reference data: a stylist who can be booked while active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stylist {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub specialty: Option<String>,
    pub bio: Option<String>,
}

/// A committed booking. Per stylist, at most one appointment may exist
/// for a given start instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Insertable)]
#[diesel(table_name = appointments)]
pub struct Appointment {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service_id: i32,
    pub stylist_id: i32,
}

/// An administrator-declared interval `[start_time, end_time)` during
/// which a stylist cannot be booked. Invariant: `end_time > start_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Insertable)]
#[diesel(table_name = stylist_unavailabilities)]
pub struct UnavailabilityRange {
    pub id: Uuid,
    pub stylist_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl UnavailabilityRange {
    /// Half-open containment: the end instant itself is bookable.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_time <= instant && instant < self.end_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    pub service_id: i32,
    pub stylist_id: i32,
    pub start_time: DateTime<Utc>,
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX))]
    pub phone: Option<String>,
}

/// Display payload shown to the customer on either booking outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub customer_name: String,
    pub service_name: String,
    pub stylist_name: String,
    pub date_text: String,
    pub time_text: String,
}

impl BookingConfirmation {
    pub fn new(
        customer_name: &str,
        service_name: &str,
        stylist_name: &str,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            customer_name: customer_name.to_owned(),
            service_name: service_name.to_owned(),
            stylist_name: stylist_name.to_owned(),
            date_text: start_time.format("%A, %b %-d, %Y").to_string(),
            time_text: start_time.format("%H:%M").to_string(),
        }
    }
}

/// Both variants carry the same payload: the caller is not told whether a
/// conflict came from an appointment or an unavailability range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingOutcome {
    Booked(BookingConfirmation),
    SlotUnavailable(BookingConfirmation),
}

/// Opening hours of the shop, applied when resolving unavailability forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusinessHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }
}

impl BusinessHours {
    pub fn from_hours(open: u32, close: u32) -> Self {
        Self {
            open: NaiveTime::from_hms_opt(open, 0, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(close, 0, 0).unwrap_or_default(),
        }
    }

    /// Clamp a time of day into the opening window.
    pub fn clamp(&self, time: NaiveTime) -> NaiveTime {
        if time < self.open {
            self.open
        } else if time > self.close {
            self.close
        } else {
            time
        }
    }
}

/// Admin form for declaring an unavailability range. An all-day side
/// resolves to the business open/close instant of its date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailabilityForm {
    pub stylist_id: i32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub start_all_day: bool,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_all_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarRow {
    pub appointment_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub full_name: String,
    pub service: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailabilityRow {
    pub id: Uuid,
    pub stylist_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The admin calendar: appointments and unavailability ranges with
/// resolved display names, each ordered by start instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarSnapshot {
    pub rows: Vec<CalendarRow>,
    pub unavailabilities: Vec<UnavailabilityRow>,
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn confirmation_formats_date_and_time() {
        let start = Utc.with_ymd_and_hms(2030, 6, 3, 9, 30, 0).unwrap();
        let confirmation = BookingConfirmation::new("Stefan", "Haircut", "Alex", start);
        assert_eq!(confirmation.date_text, "Monday, Jun 3, 2030");
        assert_eq!(confirmation.time_text, "09:30");
    }

    #[test]
    fn range_end_is_exclusive() {
        let range = UnavailabilityRange {
            id: Uuid::new_v4(),
            stylist_id: 1,
            start_time: Utc.with_ymd_and_hms(2030, 6, 3, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2030, 6, 3, 12, 0, 0).unwrap(),
        };
        assert!(range.contains(Utc.with_ymd_and_hms(2030, 6, 3, 9, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2030, 6, 3, 10, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2030, 6, 3, 12, 0, 0).unwrap()));
    }

    #[test]
    fn booking_request_validation() {
        let request = BookingRequest {
            service_id: 1,
            stylist_id: 1,
            start_time: Utc::now(),
            full_name: "Stefan".into(),
            email: "stefan@example.com".into(),
            phone: Some("+43 660 1234567".into()),
        };
        assert!(request.validate().is_ok());

        let bad_email = BookingRequest {
            email: "not-an-email".into(),
            ..request.clone()
        };
        assert!(bad_email.validate().is_err());

        let bad_phone = BookingRequest {
            phone: Some("call me".into()),
            ..request.clone()
        };
        assert!(bad_phone.validate().is_err());

        let no_phone = BookingRequest {
            phone: None,
            ..request
        };
        assert!(no_phone.validate().is_ok());
    }
}
