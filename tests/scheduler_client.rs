use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use scheduleBoard::clients::scheduler_client::{SchedulerApi, SchedulerClient};
use scheduleBoard::error::ApiError;
use scheduleBoard::models::schedule::CalendarQuery;
use scheduleBoard::service::schedule_form::ScheduleFormState;
use warp::http::StatusCode;
use warp::Filter;

#[tokio::test]
async fn requests_carry_the_csrf_header() {
    let routes = warp::path!("api" / "active_users")
        .and(warp::header::<String>("x-csrf-token"))
        .map(|token: String| {
            warp::reply::json(&serde_json::json!([
                {"username": token, "color": "#123456", "location": {"name": "Shop"}}
            ]))
        });
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let client = SchedulerClient::new(format!("http://{}", addr), "tok-1".to_string());
    let users = client.active_users().await.expect("users should load");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "tok-1");
    assert_eq!(users[0].location.as_ref().unwrap().name, "Shop");
}

#[tokio::test]
async fn unauthorized_points_at_login() {
    let routes = warp::path!("api" / "upcoming_time_off").map(|| {
        warp::reply::with_status(
            warp::reply::json(&serde_json::json!({"error": "Authentication required"})),
            StatusCode::UNAUTHORIZED,
        )
    });
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let base = format!("http://{}", addr);
    let client = SchedulerClient::new(base.clone(), "tok".to_string());
    match client.upcoming_time_off().await {
        Err(ApiError::Unauthorized { login_url }) => {
            assert_eq!(login_url, format!("{}/login", base));
        }
        other => panic!("expected unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn server_errors_and_bad_bodies_are_reported() {
    let failing = warp::path!("api" / "active_users")
        .map(|| warp::reply::with_status("boom", StatusCode::INTERNAL_SERVER_ERROR));
    let garbled = warp::path!("api" / "upcoming_time_off").map(|| "not json");
    let (addr, server) =
        warp::serve(failing.or(garbled)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let client = SchedulerClient::new(format!("http://{}", addr), "tok".to_string());
    assert!(matches!(
        client.active_users().await,
        Err(ApiError::Status(500))
    ));
    assert!(matches!(
        client.upcoming_time_off().await,
        Err(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn calendar_query_is_forwarded() {
    let routes = warp::path!("api" / "calendar_data")
        .and(warp::query::<HashMap<String, String>>())
        .map(|params: HashMap<String, String>| {
            let range = format!(
                "{}|{}|{}",
                params.get("week_start").cloned().unwrap_or_default(),
                params.get("location_id").cloned().unwrap_or_default(),
                params.get("personal_view").cloned().unwrap_or_default(),
            );
            warp::reply::json(&serde_json::json!({
                "date_range": range,
                "days": [{"date": "2026-03-02"}],
                "schedules": [{
                    "id": 1,
                    "start_time": "2026-03-02T09:00:00",
                    "end_time": "2026-03-02T10:00:00"
                }]
            }))
        });
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let client = SchedulerClient::new(format!("http://{}/", addr), "tok".to_string());
    let query = CalendarQuery {
        week_start: chrono::NaiveDate::from_ymd_opt(2026, 3, 2),
        location_id: Some(4),
        personal_view: true,
    };
    let data = client.calendar_data(&query).await.expect("calendar should load");

    assert_eq!(data.date_range, "2026-03-02|4|true");
    assert_eq!(data.schedules.len(), 1);
}

#[tokio::test]
async fn save_posts_form_and_delete_hits_id_path() {
    let posted: Arc<Mutex<Vec<HashMap<String, String>>>> = Arc::new(Mutex::new(Vec::new()));
    let deleted: Arc<Mutex<Vec<i64>>> = Arc::new(Mutex::new(Vec::new()));

    let save = {
        let posted = posted.clone();
        warp::post()
            .and(warp::path!("schedule" / "new"))
            .and(warp::header::<String>("x-csrf-token"))
            .and(warp::body::form::<HashMap<String, String>>())
            .map(move |_token: String, form: HashMap<String, String>| {
                posted.lock().unwrap().push(form);
                warp::reply()
            })
    };
    let delete = {
        let deleted = deleted.clone();
        warp::get()
            .and(warp::path!("schedule" / "delete" / i64))
            .map(move |id: i64| {
                deleted.lock().unwrap().push(id);
                warp::reply()
            })
    };
    let (addr, server) = warp::serve(save.or(delete)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let client = SchedulerClient::new(format!("http://{}", addr), "tok".to_string());
    let mut form = ScheduleFormState::for_slot(chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 22);
    form.end_hour = 0;
    client
        .save_schedule(&form.submission(None, "tok"))
        .await
        .expect("save should succeed");
    client.delete_schedule(17).await.expect("delete should succeed");

    let posted = posted.lock().unwrap();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0]["start_time"], "2026-03-02 22:00");
    assert_eq!(posted[0]["end_time"], "2026-03-02 00:00");
    assert_eq!(posted[0]["csrf_token"], "tok");
    assert_eq!(*deleted.lock().unwrap(), vec![17]);
}
