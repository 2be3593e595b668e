use crate::backend::ScheduleStore;
use crate::configuration::Configuration;
use crate::error::BookingError;
use crate::scheduler::Scheduler;
use crate::types::{BookingOutcome, BookingRequest, UnavailabilityForm};
use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_valid::Valid;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState<S: ScheduleStore, C: Configuration> {
    pub scheduler: Scheduler<S>,
    pub configuration: C,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeleteRequest {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReminderRequest {
    appointment_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CalendarQuery {
    stylist_id: Option<i32>,
}

pub fn create_app<S: ScheduleStore, C: Configuration>(
    scheduler: Scheduler<S>,
    configuration: C,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        scheduler,
        configuration,
    };

    let public = Router::new()
        .route("/services", get(get_services))
        .route("/stylists", get(get_stylists))
        .route("/book", post(book_appointment))
        .route("/calendar/stream", get(stream_calendar));

    let admin = Router::new()
        .route("/calendar", get(get_calendar))
        .route("/unavailability", post(add_unavailability))
        .route("/unavailability/remove", post(remove_unavailability))
        .route("/appointments/remove", post(remove_appointment))
        .route("/remind", post(send_reminder))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

/// The schedule-management capability check: admin routes require the
/// shared password header. Identity and roles stay outside this service.
async fn admin_auth<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    if let Some(auth_header) = request.headers().get("x-admin-password") {
        if auth_header.to_str().unwrap_or("") != state.configuration.password() {
            return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
        }
    } else {
        return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string()));
    }
    Ok(next.run(request).await)
}

async fn get_services<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
) -> impl IntoResponse {
    Json(state.scheduler.catalog().services().to_vec())
}

async fn get_stylists<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
) -> impl IntoResponse {
    Json(state.scheduler.catalog().stylists().to_vec())
}

async fn book_appointment<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Valid(Json(booking)): Valid<Json<BookingRequest>>,
) -> Response {
    match state.scheduler.attempt_booking(&booking) {
        Ok(outcome @ BookingOutcome::Booked(_)) => (StatusCode::OK, Json(outcome)).into_response(),
        Ok(outcome @ BookingOutcome::SlotUnavailable(_)) => {
            (StatusCode::CONFLICT, Json(outcome)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn get_calendar<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Query(query): Query<CalendarQuery>,
) -> Response {
    match state.scheduler.calendar(query.stylist_id) {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => BookingError::Storage(err).into_response(),
    }
}

async fn stream_calendar<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = state
        .scheduler
        .calendar_stream()
        .map(|snapshot| Event::default().json_data(&snapshot));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn add_unavailability<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Json(form): Json<UnavailabilityForm>,
) -> Response {
    match state.scheduler.create_unavailability(&form) {
        Ok(()) => (StatusCode::OK, "Unavailability recorded".to_string()).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn remove_unavailability<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Json(request): Json<DeleteRequest>,
) -> Response {
    match state.scheduler.remove_unavailability(request.id) {
        Ok(()) => {
            (StatusCode::OK, "Unavailability removed successfully".to_string()).into_response()
        }
        Err(err) => BookingError::Storage(err).into_response(),
    }
}

async fn remove_appointment<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Json(request): Json<DeleteRequest>,
) -> Response {
    match state.scheduler.remove_appointment(request.id) {
        Ok(()) => (StatusCode::OK, "Appointment removed successfully".to_string()).into_response(),
        Err(err) => BookingError::Storage(err).into_response(),
    }
}

async fn send_reminder<S: ScheduleStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
    Json(request): Json<ReminderRequest>,
) -> Response {
    match state.scheduler.log_reminder(request.appointment_id) {
        Ok(true) => (StatusCode::OK, "Reminder logged".to_string()).into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Appointment not found".to_string()).into_response(),
        Err(err) => BookingError::Storage(err).into_response(),
    }
}
