#![allow(clippy::unwrap_used)]
// Store behaviour against a wiremock backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campus_api::{Notification, Notifier};
use campus_core::{ApiClient, CoreError, CourseStore, EnrollmentRequest, RecordId};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

async fn setup() -> (MockServer, CourseStore, Arc<RecordingNotifier>) {
    let server = MockServer::start().await;
    let notifier = Arc::new(RecordingNotifier::default());
    let api = ApiClient::with_client(
        reqwest::Client::new(),
        &Url::parse(&server.uri()).unwrap(),
        "/api",
        Duration::from_secs(10),
    )
    .unwrap()
    .with_notifier(Arc::clone(&notifier) as Arc<dyn Notifier>);
    (server, CourseStore::new(api), notifier)
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn rejected(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": message }))
}

fn course(id: i64, status: &str, current: u32, max: u32) -> serde_json::Value {
    json!({
        "courseId": id,
        "status": status,
        "currentEnrollment": current,
        "maxStudents": max,
        "courseName": format!("Course {id}"),
    })
}

async fn request_log(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}

// ── Fetch-all ───────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_replaces_list_with_exactly_the_payload() {
    let (server, store, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ok(json!([
            { "studentId": 1, "name": "Ada" },
            { "studentId": 2, "name": "Grace" }
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ok(json!([{ "studentId": 3, "name": "Edsger" }])))
        .mount(&server)
        .await;

    store.fetch_students().await.unwrap();
    let first: Vec<RecordId> = store.students().iter().map(|s| s.student_id.clone()).collect();
    assert_eq!(first, vec![RecordId::Number(1), RecordId::Number(2)]);

    store.fetch_students().await.unwrap();
    let second: Vec<RecordId> = store.students().iter().map(|s| s.student_id.clone()).collect();
    assert_eq!(second, vec![RecordId::Number(3)]);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn failed_fetch_keeps_prior_list_and_clears_loading() {
    let (server, store, notifier) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ok(json!([course(1, "OPEN", 0, 10)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(rejected("X"))
        .mount(&server)
        .await;

    store.fetch_courses().await.unwrap();
    let err = store.fetch_courses().await.unwrap_err();

    assert!(matches!(err, CoreError::Rejected { ref message } if message == "X"));
    assert_eq!(store.courses().len(), 1);
    assert_eq!(store.courses()[0].course_id, RecordId::Number(1));
    assert!(!store.is_loading());

    let seen = notifier.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "X");
}

#[tokio::test]
async fn loading_is_raised_while_in_flight() {
    let (server, store, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/teachers"))
        .respond_with(ok(json!([{ "teacherId": "T1" }])).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let (result, mid_flight) = tokio::join!(store.fetch_teachers(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        store.is_loading()
    });

    result.unwrap();
    assert!(mid_flight);
    assert!(!store.is_loading());
    assert_eq!(store.teachers().len(), 1);
}

#[tokio::test]
async fn loading_clears_when_the_action_is_dropped() {
    let (server, store, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/enrollments"))
        .respond_with(ok(json!([])).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let outcome = tokio::time::timeout(Duration::from_millis(100), store.fetch_enrollments()).await;

    assert!(outcome.is_err());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn subscribers_observe_replacements() {
    let (server, store, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ok(json!([course(1, "OPEN", 0, 10), course(2, "CLOSED", 0, 10)])))
        .mount(&server)
        .await;

    let mut courses = store.subscribe_courses();
    assert!(courses.items().is_empty());
    assert!(!courses.is_loading());

    store.fetch_courses().await.unwrap();

    let snap = courses.changed().await.unwrap();
    assert_eq!(snap.len(), 2);
    assert_eq!(courses.settled().await.unwrap().len(), 2);

    let mut stream = store.subscribe_courses().into_stream();
    let state = stream.next().await.unwrap();
    assert_eq!(state.items.len(), 2);
    assert!(!state.loading);
}

#[tokio::test]
async fn list_view_reports_loading_during_fetch() {
    let (server, store, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ok(json!([{ "studentId": 1 }])).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let mut view = store.subscribe_students();

    let (result, seen) = tokio::join!(store.fetch_students(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let busy = view.is_loading();
        let settled = view.settled().await.unwrap();
        (busy, settled.len())
    });

    result.unwrap();
    assert_eq!(seen, (true, 1));
}

// ── Derived views ───────────────────────────────────────────────────

#[tokio::test]
async fn available_courses_are_open_and_below_capacity() {
    let (server, store, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ok(json!([
            course(1, "OPEN", 0, 30),
            course(2, "OPEN", 30, 30),
            course(3, "CLOSED", 5, 30),
            course(4, "OPEN", 29, 30),
            course(5, "FULL", 30, 30),
            course(6, "OPEN", 40, 30),
            course(7, "ARCHIVED", 0, 30)
        ])))
        .mount(&server)
        .await;

    store.fetch_courses().await.unwrap();

    let ids: Vec<RecordId> = store
        .available_courses()
        .iter()
        .map(|c| c.course_id.clone())
        .collect();
    assert_eq!(ids, vec![RecordId::Number(1), RecordId::Number(4)]);

    for c in store.courses().iter() {
        let listed = ids.contains(&c.course_id);
        assert_eq!(listed, c.is_available(), "course {}", c.course_id);
    }
}

#[tokio::test]
async fn lookups_by_id() {
    let (server, store, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ok(json!([
            { "studentId": "S001", "name": "Ada" },
            { "studentId": 2, "name": "Grace" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ok(json!([course(10, "OPEN", 0, 5)])))
        .mount(&server)
        .await;

    assert!(store.student_by_id(&RecordId::from("S001")).is_none());

    store.fetch_students().await.unwrap();
    store.fetch_courses().await.unwrap();

    let ada = store.student_by_id(&RecordId::from("S001")).unwrap();
    assert_eq!(ada.extra["name"], "Ada");
    assert!(store.student_by_id(&RecordId::Number(2)).is_some());
    assert!(store.student_by_id(&RecordId::from("2")).is_none());
    assert!(store.student_by_id(&RecordId::Number(99)).is_none());

    assert!(store.course_by_id(&RecordId::Number(10)).is_some());
    assert!(store.course_by_id(&RecordId::Number(11)).is_none());
}

// ── Mutate-then-refetch ─────────────────────────────────────────────

#[tokio::test]
async fn create_student_then_exactly_one_refetch() {
    let (server, store, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(body_json(json!({ "name": "Barbara" })))
        .respond_with(ok(json!({ "studentId": 4, "name": "Barbara" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ok(json!([{ "studentId": 4, "name": "Barbara" }])))
        .expect(1)
        .mount(&server)
        .await;

    let created = store.create_student(&json!({ "name": "Barbara" })).await.unwrap();

    assert_eq!(created.unwrap().student_id, RecordId::Number(4));
    assert_eq!(store.students().len(), 1);
    assert_eq!(
        request_log(&server).await,
        vec!["POST /api/students".to_owned(), "GET /api/students".to_owned()]
    );
}

#[tokio::test]
async fn create_acknowledged_with_null_data_still_refetches() {
    let (server, store, notifier) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "data": null, "message": "created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ok(json!([{ "studentId": 5, "name": "Radia" }])))
        .expect(1)
        .mount(&server)
        .await;

    let created = store.create_student(&json!({ "name": "Radia" })).await.unwrap();

    assert!(created.is_none());
    assert_eq!(store.students().len(), 1);
    assert!(notifier.seen.lock().unwrap().is_empty());
    assert_eq!(
        request_log(&server).await,
        vec!["POST /api/students".to_owned(), "GET /api/students".to_owned()]
    );
}

#[tokio::test]
async fn grade_acknowledged_without_data_still_refetches() {
    let (server, store, _) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/enrollments/3/grade"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/enrollments"))
        .respond_with(ok(json!([{ "enrollmentId": 3, "score": 75.0 }])))
        .expect(1)
        .mount(&server)
        .await;

    let graded = store.update_grade(&RecordId::Number(3), 75.0).await.unwrap();

    assert!(graded.is_none());
    assert_eq!(store.enrollments()[0].score, Some(75.0));
}

#[tokio::test]
async fn failed_create_skips_refetch() {
    let (server, store, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .respond_with(rejected("duplicate student number"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = store
        .create_student(&json!({ "name": "Dup" }))
        .await
        .unwrap_err();

    assert!(
        matches!(err, CoreError::Rejected { ref message } if message == "duplicate student number")
    );
    assert_eq!(request_log(&server).await, vec!["POST /api/students".to_owned()]);
}

#[tokio::test]
async fn failed_refetch_after_successful_create_propagates() {
    let (server, store, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/courses"))
        .respond_with(ok(course(8, "OPEN", 0, 20)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store.create_course(&json!({ "courseName": "Compilers" })).await.unwrap_err();

    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    assert!(!store.is_loading());
}

#[tokio::test]
async fn update_and_delete_student_refetch() {
    let (server, store, _) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/students/1"))
        .respond_with(ok(json!({ "studentId": 1, "name": "Ada King" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/students/1"))
        .respond_with(ok(serde_json::Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ok(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let id = RecordId::Number(1);
    let updated = store
        .update_student(&id, &json!({ "name": "Ada King" }))
        .await
        .unwrap();
    assert_eq!(updated.unwrap().extra["name"], "Ada King");

    store.delete_student(&id).await.unwrap();

    assert_eq!(
        request_log(&server).await,
        vec![
            "PUT /api/students/1".to_owned(),
            "GET /api/students".to_owned(),
            "DELETE /api/students/1".to_owned(),
            "GET /api/students".to_owned(),
        ]
    );
}

#[tokio::test]
async fn enroll_and_grade_refetch_enrollments() {
    let (server, store, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/enrollments"))
        .and(body_json(json!({ "studentId": 1, "courseId": 10 })))
        .respond_with(ok(json!({ "enrollmentId": 100, "studentId": 1, "courseId": 10 })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/enrollments/100/grade"))
        .and(query_param("score", "88.5"))
        .respond_with(ok(json!({ "enrollmentId": 100, "score": 88.5 })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/enrollments"))
        .respond_with(ok(json!([
            { "enrollmentId": 100, "studentId": 1, "courseId": 10, "score": 88.5 }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let enrollment = store
        .enroll_student(&EnrollmentRequest::new(1, 10))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(enrollment.enrollment_id, RecordId::Number(100));

    let graded = store
        .update_grade(&enrollment.enrollment_id, 88.5)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.score, Some(88.5));
    assert_eq!(store.enrollments()[0].score, Some(88.5));

    assert_eq!(
        request_log(&server).await,
        vec![
            "POST /api/enrollments".to_owned(),
            "GET /api/enrollments".to_owned(),
            "PUT /api/enrollments/100/grade".to_owned(),
            "GET /api/enrollments".to_owned(),
        ]
    );
}
