use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{App, http::StatusCode, test, web, web::Bytes};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use tokio::sync::Notify;

use docbook::api::client::DoctorsApi;
use docbook::clock::FixedClock;
use docbook::error::{AppError, BOOKING_FAILED_MESSAGE, VALIDATION_MESSAGE};
use docbook::models::appointment::NewAppointment;
use docbook::models::doctor::Doctor;
use docbook::models::slot::DaySlots;
use docbook::routes;
use docbook::state::AppState;

#[derive(Default)]
struct StubApi {
    doctors: Option<Vec<Doctor>>,
    fail_create: bool,
    // when set, creation calls wait here until notified
    gate: Option<Arc<Notify>>,
    created: Mutex<Vec<(String, NewAppointment)>>,
}

impl StubApi {
    fn with_doctors(doctors: Value) -> Self {
        Self {
            doctors: Some(serde_json::from_value(doctors).unwrap()),
            ..Default::default()
        }
    }

    fn created(&self) -> Vec<(String, NewAppointment)> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl DoctorsApi for StubApi {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, AppError> {
        self.doctors
            .clone()
            .ok_or_else(|| AppError::Transport("connection refused".into()))
    }

    async fn create_appointment(
        &self,
        doctor_id: &str,
        appointment: &NewAppointment,
    ) -> Result<(), AppError> {
        self.created
            .lock()
            .unwrap()
            .push((doctor_id.to_string(), appointment.clone()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail_create {
            Err(AppError::Transport("500 Internal Server Error".into()))
        } else {
            Ok(())
        }
    }
}

fn doctors_json() -> Value {
    json!([
        {
            "docId": "d1",
            "docName": "Dr. Rivera",
            "speciality": "Cardiology",
            "price": 40,
            "image": "rivera.png",
            "appointments": {
                "2024-06-10": [
                    {"time": "10:00 AM", "issue": "cough", "_id": "a1"},
                    {"time": "11:30 AM", "issue": "fever", "_id": "a2"}
                ],
                "2024-06-12": [{"time": "02:00 PM", "issue": "follow-up", "_id": "a3"}]
            }
        },
        {"docId": "d2", "docName": "Dr. Okafor", "speciality": "Dermatology", "price": 55, "image": ""}
    ])
}

fn state_with(api: Arc<StubApi>) -> web::Data<AppState> {
    let now = NaiveDate::from_ymd_opt(2024, 6, 11)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap();
    web::Data::new(AppState::with_parts(
        api,
        Arc::new(FixedClock(now)),
        Duration::from_secs(60),
    ))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(App::new().app_data($state.clone()).configure(routes::init)).await
    };
}

#[actix_web::test]
async fn ping_pongs() {
    let state = state_with(Arc::new(StubApi::default()));
    let app = app!(state);

    let req = test::TestRequest::get().uri("/health/ping").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, Bytes::from_static(b"pong"));
}

#[actix_web::test]
async fn upstream_health_reflects_the_api() {
    let state = state_with(Arc::new(StubApi::with_doctors(doctors_json())));
    let app = app!(state);
    let req = test::TestRequest::get().uri("/health/upstream").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["upstream"], "ok");
    assert_eq!(body["doctors"], 2);

    let state = state_with(Arc::new(StubApi::default()));
    let app = app!(state);
    let req = test::TestRequest::get().uri("/health/upstream").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn lists_doctors_or_nothing() {
    let state = state_with(Arc::new(StubApi::with_doctors(doctors_json())));
    let app = app!(state);
    let req = test::TestRequest::get().uri("/doctors").to_request();
    let doctors: Vec<Doctor> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(doctors.len(), 2);

    let state = state_with(Arc::new(StubApi::default()));
    let app = app!(state);
    let req = test::TestRequest::get().uri("/doctors").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doctors: Vec<Value> = test::read_body_json(resp).await;
    assert!(doctors.is_empty());
}

#[actix_web::test]
async fn appointments_are_flattened_with_status() {
    let state = state_with(Arc::new(StubApi::with_doctors(doctors_json())));
    let app = app!(state);

    let req = test::TestRequest::get().uri("/appointments").to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["docId"], "d1");
    assert_eq!(rows[0]["date"], "2024-06-10");
    assert_eq!(rows[0]["appointments"]["2024-06-10"]["_id"], "a1");
    assert_eq!(rows[0]["status"], "completed");
    assert_eq!(rows[1]["issue"], "fever");
    assert_eq!(rows[2]["date"], "2024-06-12");
    assert_eq!(rows[2]["status"], "upcoming");
}

#[actix_web::test]
async fn appointments_empty_when_api_is_down() {
    let state = state_with(Arc::new(StubApi::default()));
    let app = app!(state);

    let req = test::TestRequest::get().uri("/appointments").to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(rows.is_empty());
}

#[actix_web::test]
async fn slots_mark_booked_times() {
    let state = state_with(Arc::new(StubApi::with_doctors(doctors_json())));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/doctors/d1/slots?date=2024-06-10")
        .to_request();
    let day: DaySlots = test::call_and_read_body_json(&app, req).await;

    assert_eq!(day.doc_id, "d1");
    assert_eq!(day.slots.len(), 14);
    let booked: Vec<_> = day.slots.iter().filter(|s| s.booked).map(|s| s.time.as_str()).collect();
    assert_eq!(booked, vec!["10:00 AM", "11:30 AM"]);
}

#[actix_web::test]
async fn slots_reject_weekends_and_unknown_doctors() {
    let state = state_with(Arc::new(StubApi::with_doctors(doctors_json())));
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/doctors/d1/slots?date=2024-06-08")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/doctors/nobody/slots?date=2024-06-10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn booking_with_blank_issue_never_calls_the_api() {
    let api = Arc::new(StubApi::with_doctors(doctors_json()));
    let state = state_with(api.clone());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/doctors/d1/appointments")
        .set_json(json!({"date": "2024-06-13", "time": "10:00 AM", "issue": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], VALIDATION_MESSAGE);
    assert!(api.created().is_empty());
}

#[actix_web::test]
async fn booking_marks_the_slot_without_refetching() {
    let api = Arc::new(StubApi::with_doctors(doctors_json()));
    let state = state_with(api.clone());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/doctors/d1/appointments")
        .set_json(json!({"date": "2024-06-13", "time": "03:30 PM", "issue": "back pain"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Appointment booked on 2024-06-13 at 03:30 PM");

    let created = api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0, "d1");
    assert_eq!(created[0].1.status, 0);

    // The stub's doctor list does not include the new booking.
    let req = test::TestRequest::get()
        .uri("/doctors/d1/slots?date=2024-06-13")
        .to_request();
    let day: DaySlots = test::call_and_read_body_json(&app, req).await;
    let booked: Vec<_> = day.slots.iter().filter(|s| s.booked).map(|s| s.time.as_str()).collect();
    assert_eq!(booked, vec!["03:30 PM"]);

    let req = test::TestRequest::post()
        .uri("/doctors/d1/appointments")
        .set_json(json!({"date": "2024-06-13", "time": "03:30 PM", "issue": "again"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(api.created().len(), 1);
}

#[actix_web::test]
async fn failed_booking_leaves_the_slot_free() {
    let api = Arc::new(StubApi {
        fail_create: true,
        ..StubApi::with_doctors(doctors_json())
    });
    let state = state_with(api.clone());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/doctors/d1/appointments")
        .set_json(json!({"date": "2024-06-13", "time": "10:00 AM", "issue": "cough"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], BOOKING_FAILED_MESSAGE);

    let req = test::TestRequest::get()
        .uri("/doctors/d1/slots?date=2024-06-13")
        .to_request();
    let day: DaySlots = test::call_and_read_body_json(&app, req).await;
    assert!(day.slots.iter().all(|s| !s.booked));
}

#[actix_web::test]
async fn booking_rejects_weekends_and_missing_date() {
    let api = Arc::new(StubApi::with_doctors(doctors_json()));
    let state = state_with(api.clone());
    let app = app!(state);

    for body in [
        json!({"date": "2024-06-09", "time": "10:00 AM", "issue": "cough"}),
        json!({"time": "10:00 AM", "issue": "cough"}),
        json!({"date": "2024-06-13", "issue": "cough"}),
        json!({"date": "2024-06-13", "time": "06:00 PM", "issue": "cough"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/doctors/d1/appointments")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert!(api.created().is_empty());
}

#[actix_web::test]
async fn booking_a_slot_the_api_already_lists_is_a_conflict() {
    let api = Arc::new(StubApi::with_doctors(doctors_json()));
    let state = state_with(api.clone());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/doctors/d1/appointments")
        .set_json(json!({"date": "2024-06-10", "time": "11:30 AM", "issue": "fever again"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(api.created().is_empty());
}

#[actix_web::test]
async fn booking_for_unknown_doctor_is_not_found() {
    let api = Arc::new(StubApi::with_doctors(doctors_json()));
    let state = state_with(api.clone());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/doctors/nobody/appointments")
        .set_json(json!({"date": "2024-06-13", "time": "10:00 AM", "issue": "cough"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(api.created().is_empty());
}

#[actix_web::test]
async fn identical_booking_in_flight_is_rejected() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(StubApi {
        gate: Some(gate.clone()),
        ..StubApi::with_doctors(doctors_json())
    });
    let state = state_with(api.clone());
    let app = app!(state);

    let body = json!({"date": "2024-06-13", "time": "01:00 PM", "issue": "headache"});
    let first_req = test::TestRequest::post()
        .uri("/doctors/d1/appointments")
        .set_json(body.clone())
        .to_request();
    let second_req = test::TestRequest::post()
        .uri("/doctors/d1/appointments")
        .set_json(body)
        .to_request();

    let first = test::call_service(&app, first_req);
    let second = async {
        // wait until the first booking is parked inside the creation call
        while api.created().is_empty() {
            tokio::task::yield_now().await;
        }
        let resp = test::call_service(&app, second_req).await;
        gate.notify_one();
        resp
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(api.created().len(), 1);
}
