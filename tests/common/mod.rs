//! Shared test infrastructure.
//!
//! - `FakeRemote::start()` - in-process stand-in for the monitoring service,
//!   bound to an ephemeral port, recording every call it receives
//! - `test_config()` - config pointing both base URLs at the fake
//! - `Browser` - cookie jar and CSRF scraping for driving the app

#![allow(dead_code, unused_macros)]

use std::collections::HashSet;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::cookie::Cookie;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use regex::Regex;
use serde_json::{Value, json};

use classwatch::config::AppConfig;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASS: &str = "secret";
pub const ADMIN_TOKEN: &str = "token-admin";
pub const COURSE_ID: &str = "c1";
pub const RECORD_ID: &str = "r1";
pub const BOUNDARY: &str = "classwatch-test-boundary";

// ============================================================================
// FAKE REMOTE SERVICE
// ============================================================================

#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: String,
    pub content_type: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    records: Option<Value>,
    failing: HashSet<String>,
}

/// Handle to a running fake service. Cloning shares the same state.
#[derive(Clone)]
pub struct FakeRemote {
    pub base_url: String,
    state: Arc<Mutex<State>>,
}

impl FakeRemote {
    /// Start the fake on 127.0.0.1 with an OS-assigned port. Must be called
    /// from inside an actix system (`#[actix_rt::test]`).
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake remote");
        let port = listener.local_addr().expect("local addr").port();
        let state = Arc::new(Mutex::new(State::default()));

        let data = web::Data::new(state.clone());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .listen(listener)
        .expect("listen fake remote")
        .run();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            state,
        }
    }

    /// Replace the body served by `/course/queryRecords`.
    pub fn set_records(&self, records: Value) {
        self.state.lock().unwrap().records = Some(records);
    }

    /// Answer 500 on `path` from now on.
    pub fn fail(&self, path: &str) {
        self.state.lock().unwrap().failing.insert(path.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }
}

pub fn admin_user() -> Value {
    json!({ "id": "u1", "name": "Admin", "email": ADMIN_EMAIL, "role": "admin" })
}

pub fn courses() -> Value {
    json!([
        {
            "id": COURSE_ID,
            "name": "Data Structures",
            "code": "CS201",
            "description": "Lists, trees and graphs",
            "teacherName": "Wang",
            "startDate": "2000-01-01",
            "endDate": "2999-12-31",
            "schedule": [{ "dayOfWeek": 1, "startTime": "08:00", "endTime": "09:40" }]
        },
        {
            "id": "c2",
            "name": "Operating Systems",
            "code": "CS301",
            "startDate": "2001-02-01",
            "endDate": "2001-06-30",
            "schedule": null
        }
    ])
}

/// One record: s1 attends, s2 is late, s3 is absent.
pub fn records(detecting: bool) -> Value {
    json!([
        {
            "courseId": COURSE_ID,
            "recordId": RECORD_ID,
            "createdAt": "2024-03-01T08:00:00Z",
            "finishedAt": "0001-01-01T00:00:00Z",
            "teacherName": "Wang",
            "roster": [{ "id": "s1", "name": "Li Lei", "class": "CS2101", "phone": "13800000001" }, "s2", "s3"],
            "attendees": ["s1"],
            "latecomers": ["s2"],
            "earlyLeavers": null,
            "isDetecting": detecting
        }
    ])
}

pub fn students() -> Value {
    json!([
        { "id": "s1", "name": "Li Lei", "class": "CS2101", "phone": "13800000001" },
        { "id": "s2", "name": "Han Meimei", "class": "CS2101", "phone": "13800000002" },
        { "id": "s3", "name": "Zhang Wei", "class": "CS2102", "phone": "13800000003" }
    ])
}

pub fn teachers() -> Value {
    json!([
        { "id": "t1", "name": "Wang", "email": "wang@example.com", "title": "Professor", "department": "CS" },
        { "id": "t2", "name": "Li Ming", "email": "li@example.com" }
    ])
}

async fn respond(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Arc<Mutex<State>>>,
) -> HttpResponse {
    let path = req.path().to_string();
    let method = req.method().to_string();
    let query = req.query_string().to_string();
    let body = String::from_utf8_lossy(&body).to_string();
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (failing, records) = {
        let mut s = state.lock().unwrap();
        s.calls.push(Call {
            method: method.clone(),
            path: path.clone(),
            query: query.clone(),
            body: body.clone(),
            content_type,
            authorization: authorization.clone(),
        });
        (s.failing.contains(&path), s.records.clone())
    };
    if failing {
        return HttpResponse::InternalServerError().body("boom");
    }

    match (method.as_str(), path.as_str()) {
        ("POST", "/auth/login") => {
            let creds: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            if creds["password"] == ADMIN_PASS {
                HttpResponse::Ok().json(json!({ "success": true, "user": admin_user(), "token": ADMIN_TOKEN }))
            } else {
                HttpResponse::Ok().json(json!({ "success": false, "message": "Invalid email or password" }))
            }
        }
        ("POST", "/auth/logout") => HttpResponse::Ok().json(json!({ "success": true })),
        ("GET", "/auth/me") => match authorization.as_deref() {
            Some(h) if h == format!("Bearer {ADMIN_TOKEN}") => HttpResponse::Ok().json(admin_user()),
            _ => HttpResponse::Unauthorized().finish(),
        },
        ("GET", "/course/list") => HttpResponse::Ok().json(courses()),
        ("GET", "/course/queryCourseInfo") => {
            let id = query.strip_prefix("id=").unwrap_or_default();
            match courses().as_array().and_then(|list| list.iter().find(|c| c["id"] == id).cloned()) {
                Some(course) => HttpResponse::Ok().json(course),
                None => HttpResponse::NotFound().finish(),
            }
        }
        ("GET", "/course/queryRecords") => HttpResponse::Ok().json(records.unwrap_or_else(|| self::records(false))),
        ("GET", "/course/queryStudents") => HttpResponse::Ok().json(json!([students()[0].clone(), students()[1].clone()])),
        ("GET", "/course/queryOriginalImage") => {
            let urls: Vec<String> = (1..=7).map(|i| format!("http://img.example.com/{i}.jpg")).collect();
            HttpResponse::Ok().json(urls)
        }
        ("GET", "/student/list") => HttpResponse::Ok().json(students()),
        ("GET", "/teachers") => HttpResponse::Ok().json(teachers()),
        ("POST", _) | ("PUT", _) | ("DELETE", _) => HttpResponse::Ok().json(json!({ "success": true })),
        _ => HttpResponse::NotFound().finish(),
    }
}

// ============================================================================
// APP SETUP
// ============================================================================

pub fn test_config(remote: &FakeRemote) -> AppConfig {
    let base = remote.base_url.clone();
    AppConfig::from_lookup(move |name| match name {
        "API_BASE_URL" | "MONITOR_BASE_URL" => Some(base.clone()),
        "REQUEST_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
}

/// Build the app service the way `main` does, minus static files.
/// Test files pull this in with `#[macro_use] mod common;`.
macro_rules! init_app {
    ($config:expr, $guard:expr) => {{
        let config: classwatch::config::AppConfig = $config;
        let api = classwatch::api::ApiClient::from_config(&config).expect("api client");
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(classwatch::session_middleware(config.session_key.clone()))
                .app_data(actix_web::web::Data::new(config.clone()))
                .app_data(actix_web::web::Data::new(api))
                .app_data(actix_web::web::Data::new($guard))
                .configure(classwatch::configure),
        )
        .await
    }};
}

/// Log the admin in through the login form. Evaluates to the CSRF token.
macro_rules! login {
    ($app:expr, $browser:expr) => {{
        let resp = actix_web::test::call_service(&$app, $browser.get("/login").to_request()).await;
        $browser.absorb(&resp);
        let body = actix_web::test::read_body(resp).await;
        let csrf = $crate::common::scrape_csrf(&String::from_utf8_lossy(&body));

        let form = [
            ("email", $crate::common::ADMIN_EMAIL),
            ("password", $crate::common::ADMIN_PASS),
            ("csrf_token", csrf.as_str()),
        ];
        let resp = actix_web::test::call_service(&$app, $browser.post_form("/login", &form).to_request()).await;
        assert_eq!(resp.status(), 303, "login should redirect");
        assert_eq!($crate::common::location(&resp), "/dashboard");
        $browser.absorb(&resp);
        csrf
    }};
}

// ============================================================================
// BROWSER
// ============================================================================

/// Cookie jar carried across requests.
#[derive(Default)]
pub struct Browser {
    cookies: Vec<Cookie<'static>>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uri: &str) -> actix_web::test::TestRequest {
        self.with_cookies(actix_web::test::TestRequest::get().uri(uri))
    }

    pub fn post_form(&self, uri: &str, form: &[(&str, &str)]) -> actix_web::test::TestRequest {
        self.with_cookies(actix_web::test::TestRequest::post().uri(uri).set_form(form))
    }

    /// Multipart POST the way a browser submits a form with a file input.
    /// `file` is `(field, file name, content type, data)`.
    pub fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &str, &[u8])>,
    ) -> actix_web::test::TestRequest {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
            );
        }
        if let Some((name, file_name, content_type, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = actix_web::test::TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", format!("multipart/form-data; boundary={BOUNDARY}")))
            .set_payload(body);
        self.with_cookies(req)
    }

    fn with_cookies(&self, mut req: actix_web::test::TestRequest) -> actix_web::test::TestRequest {
        for c in &self.cookies {
            req = req.cookie(c.clone());
        }
        req
    }

    /// Take over any cookies set (or cleared) by `resp`.
    pub fn absorb<B>(&mut self, resp: &actix_web::dev::ServiceResponse<B>) {
        for c in resp.response().cookies() {
            self.cookies.retain(|old| old.name() != c.name());
            if !c.value().is_empty() {
                self.cookies.push(c.into_owned());
            }
        }
    }
}

pub fn scrape_csrf(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([^"]+)""#).unwrap();
    re.captures(html)
        .map(|c| c[1].to_string())
        .expect("page has no csrf token")
}

pub fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_text<B: actix_web::body::MessageBody>(resp: actix_web::dev::ServiceResponse<B>) -> String {
    String::from_utf8_lossy(&actix_web::test::read_body(resp).await).into_owned()
}
