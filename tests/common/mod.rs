#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use partsadmin::shell::{ConfirmGate, Notifier};
use partsadmin::{ApiClient, Session};
use serde_json::{Value, json};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct LoggedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub bearer: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct BackendState {
    log: Arc<Mutex<Vec<LoggedRequest>>>,
    fail_paths: Arc<Mutex<HashSet<String>>>,
}

/// In-process stand-in for the catalog backend, listening on a real port.
pub struct TestBackend {
    pub base_url: String,
    state: BackendState,
}

impl TestBackend {
    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<LoggedRequest> {
        self.state.log.lock().unwrap().clone()
    }

    /// Requests to the given path (no leading slash).
    pub fn requests_to(&self, path: &str) -> Vec<LoggedRequest> {
        let path = format!("/{path}");
        self.requests()
            .into_iter()
            .filter(|req| req.path == path)
            .collect()
    }

    /// Make the given path (no leading slash) answer 500 until restored.
    pub fn fail_path(&self, path: &str) {
        self.state
            .fail_paths
            .lock()
            .unwrap()
            .insert(format!("/{path}"));
    }

    /// Restore a path broken with [`Self::fail_path`].
    pub fn restore_path(&self, path: &str) {
        self.state
            .fail_paths
            .lock()
            .unwrap()
            .remove(&format!("/{path}"));
    }

    /// A client pointed at this backend with a fresh session.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, Session::new()).unwrap()
    }
}

pub async fn spawn_backend() -> TestBackend {
    let state = BackendState::default();
    let app = Router::new()
        .fallback(dispatch)
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

fn enveloped(data: Value) -> Response {
    axum::Json(json!({"success": true, "data": data})).into_response()
}

fn ok_message(message: &str) -> Response {
    axum::Json(json!({"success": true, "message": message})).into_response()
}

fn rejected(message: &str) -> Response {
    axum::Json(json!({"success": false, "message": message})).into_response()
}

async fn dispatch(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(ToString::to_string);
    state.log.lock().unwrap().push(LoggedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(ToString::to_string),
        bearer: bearer.clone(),
        body: body.clone(),
    });

    if state.fail_paths.lock().unwrap().contains(uri.path()) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    let query = uri.query().unwrap_or_default();
    match (method.as_str(), uri.path()) {
        // Brands answer in PascalCase, the backend's oldest routes.
        ("GET", "/api/v1/Brand/getall") => axum::Json(json!({
            "Success": true,
            "Data": [
                {"Id": 1, "Name": "Bosch", "ImageUrl": "bosch.png"},
                {"Id": 2, "Name": "Febi", "ImageUrl": "febi.png"}
            ]
        }))
        .into_response(),
        ("POST", "/api/v1/Brand/addBrand") => {
            let parsed: Value = serde_json::from_str(&body).unwrap_or_default();
            if parsed["name"] == "Existing" {
                rejected("Brand already exists")
            } else {
                ok_message("Brand added successfully")
            }
        }
        ("PUT", "/api/v1/Brand") => ok_message("Brand updated"),

        ("GET", "/api/Model/getModels") => enveloped(json!([
            {"id": 1, "name": "Golf", "brandId": 2},
            {"id": 2, "name": "Passat", "brandId": 2}
        ])),
        ("POST", "/api/Model/addModel") => ok_message("Model added"),
        ("DELETE", "/api/Model/delete") => ok_message("Model deleted"),

        ("GET", "/api/YearGroup") => enveloped(json!([
            {"id": 10, "from": 2010, "to": 2015},
            {"id": 11, "from": 2016, "to": 2020}
        ])),
        ("GET", "/api/YearGroup/yearGroups/1") => {
            enveloped(json!([{"id": 10, "from": 2010, "to": 2015}]))
        }
        ("GET", "/api/YearGroup/yearGroups/2") => enveloped(json!([])),
        ("POST", "/api/YearGroup") => ok_message("Year group added"),
        ("POST", "/api/YearGroup/delete") => ok_message("Year group deleted"),

        ("GET", "/api/DetailGroup/getall") => enveloped(json!([
            {"id": 20, "name": "Engine"},
            {"id": 21, "name": "Brakes"}
        ])),
        ("GET", "/api/DetailGroup/getByModelIdAndYearGroupId") => {
            if query.contains("modelId=1") && query.contains("yearGroupId=10") {
                enveloped(json!([{"id": 20, "name": "Engine"}]))
            } else {
                enveloped(json!([]))
            }
        }
        ("POST", "/api/DetailGroup/addDetailGroup") => ok_message("Detail group added"),
        ("POST", "/api/DetailGroup/delete") => ok_message("Detail group deleted"),

        ("GET", "/api/Detail/getall") => enveloped(json!([
            {"id": 30, "name": "Oil filter", "price": 10.5},
            {"id": 31, "name": "Air filter", "price": 8.0}
        ])),
        ("POST", "/api/Detail/addDetail") => ok_message("Detail added"),
        ("DELETE", "/api/Detail/delete") => ok_message("Detail deleted"),

        ("GET", "/api/v1/Tag/getTags") => enveloped(json!([{"id": 40, "name": "sale"}])),
        ("POST", "/api/v1/Tag/addTag") => ok_message("Tag added"),
        ("DELETE", "/api/v1/Tag/delete") => ok_message("Tag deleted"),

        ("GET", "/api/v1/DiscountPromocode/getall") => axum::Json(json!({
            "Success": true,
            "Data": [{
                "Id": 50,
                "PromoCode": "SAVE10",
                "Discount": 10,
                "EndDate": "2020-01-01T00:00:00",
                "mimimumAmount": 50.0
            }]
        }))
        .into_response(),
        ("POST", "/api/v1/DiscountPromocode/add") => ok_message("Promo code added"),
        ("POST", "/api/v1/DiscountPromocode/delete") => ok_message("Promo code deleted"),

        ("GET", "/api/v1/ModelYearGroup") => enveloped(json!([
            {"id": 100, "modelId": 1, "yearGroupId": 10}
        ])),
        ("POST", "/api/v1/ModelYearGroup") => ok_message("Link added"),

        ("GET", "/api/ModelYearGroupDetailGroup/getall") => enveloped(json!([
            {"id": 200, "modelId": 1, "yearGroupId": 10, "detailGroupId": 20}
        ])),
        ("POST", "/api/ModelYearGroupDetailGroup/add") => ok_message("Link added"),

        ("GET", "/api/ModelYearGroupDetailGroupDetail/getall") => enveloped(json!([{
            "modelName": "Golf",
            "from": 2010,
            "to": 2015,
            "detailGroupName": "Engine",
            "detailName": "Oil filter"
        }])),
        ("POST", "/api/ModelYearGroupDetailGroupDetail/add") => ok_message("Link added"),

        ("GET", "/api/DetailTag/getDetailTags") => enveloped(json!([
            {"id": 300, "tagId": 40, "detailId": 30}
        ])),
        ("POST", "/api/DetailTag/addDetailTag") => ok_message("Link added"),

        ("POST", "/api/Auth/admin/login") => {
            let parsed: Value = serde_json::from_str(&body).unwrap_or_default();
            if parsed["username"] == "admin" && parsed["password"] == "secret" {
                axum::Json(json!({"token": "tok-123"})).into_response()
            } else {
                (StatusCode::UNAUTHORIZED, "").into_response()
            }
        }
        ("GET", "/api/Auth/users") => {
            if bearer.as_deref() == Some("tok-123") {
                axum::Json(json!([
                    {"id": 7, "userName": "anna", "email": "anna@example.com", "role": "User"},
                    {"id": 8, "userName": "boris", "email": "boris@example.com", "role": "Admin"}
                ]))
                .into_response()
            } else {
                (StatusCode::UNAUTHORIZED, "").into_response()
            }
        }

        ("GET", "/api/v1/Cart/admin/all-promocode-usages") => axum::Json(json!({
            "usages": [
                {
                    "id": 1, "userName": "Anna", "userEmail": "anna@example.com",
                    "promocodeText": "SAVE10", "usedDate": "2024-03-01T10:00:00",
                    "originalAmount": 100.0, "finalAmount": 90.0,
                    "discountAmount": 10.0, "discountPercent": 10.0,
                    "ipAddress": "10.0.0.1"
                },
                {
                    "id": 2, "userName": "Boris", "userEmail": "boris@example.com",
                    "promocodeText": "WINTER", "usedDate": "2024-03-02T11:00:00",
                    "originalAmount": 80.0, "finalAmount": 68.0,
                    "discountAmount": 12.0, "discountPercent": 15.0,
                    "ipAddress": "10.0.0.2"
                }
            ],
            "totalUsages": 2,
            "totalRevenue": 158.0,
            "totalDiscountGiven": 22.0
        }))
        .into_response(),
        ("GET", "/api/v1/Cart/admin/promocode-statistics") => axum::Json(json!({
            "totalUsages": 2,
            "totalRevenue": 158.0,
            "totalDiscountGiven": 22.0,
            "totalPromocodes": 2,
            "promocodes": [
                {
                    "promocodeText": "SAVE10", "discountPercent": 10.0,
                    "usageCount": 1, "uniqueUsers": 1, "totalRevenue": 90.0,
                    "lastUsedDate": "2024-03-01T10:00:00"
                },
                {
                    "promocodeText": "WINTER", "discountPercent": 15.0,
                    "usageCount": 1, "uniqueUsers": 1, "totalRevenue": 68.0,
                    "lastUsedDate": "2024-03-02T11:00:00"
                }
            ]
        }))
        .into_response(),
        ("GET", "/api/v1/Cart/admin/promocode-usages/50") => axum::Json(json!({
            "usages": [{
                "id": 1, "userName": "Anna", "userEmail": "anna@example.com",
                "promocodeText": "SAVE10"
            }],
            "totalUsages": 1,
            "totalRevenue": 90.0,
            "totalDiscountGiven": 10.0
        }))
        .into_response(),
        ("GET", "/api/v1/Cart/admin/user-promocode-history/7") => axum::Json(json!({
            "usages": [{
                "id": 1, "userName": "Anna", "userEmail": "anna@example.com",
                "promocodeText": "SAVE10"
            }],
            "totalUsages": 1,
            "totalRevenue": 90.0,
            "totalDiscountGiven": 10.0
        }))
        .into_response(),

        _ => (StatusCode::NOT_FOUND, "no such route").into_response(),
    }
}

/// Notifier that records every notification for assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<(&'static str, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(&'static str, String)> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.events.lock().unwrap().push(("success", message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.events.lock().unwrap().push(("warning", message.to_string()));
    }

    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(("error", message.to_string()));
    }
}

/// Gate with a fixed answer.
pub struct StaticGate(pub bool);

impl ConfirmGate for StaticGate {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
