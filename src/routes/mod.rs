pub mod api;
pub mod auth_middleware;
pub mod ws;

pub use api::create_api_routes;
pub use ws::create_ws_routes;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{cors::{AllowOrigin, CorsLayer}, trace::TraceLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{docs::ApiDoc, AppState};

/// Full application router: API, both socket channels, Swagger UI.
pub fn create_app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origin_list()
        .into_iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();

    let mut app = Router::new()
        .nest("/api", create_api_routes(state.clone()))
        .merge(create_ws_routes(state))
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    if !origins.is_empty() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true),
        );
    }

    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::relay::BroadcastRelay;
    use crate::services::auth_service::{test_tokens::{mint, SECRET}, Role};
    use axum::{body::Body, http::{Request, StatusCode}};
    use futures_util::{SinkExt, StreamExt};
    use std::{sync::Arc, time::Duration};
    use tokio_tungstenite::tungstenite::{client::IntoClientRequest, Message};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = Config {
            auth_jwt_secret: Some(SECRET.to_string()),
            ..Config::default()
        };
        AppState {
            relay: Arc::new(BroadcastRelay::new(config.teacher_channel_capacity)),
            config: Arc::new(config),
        }
    }

    fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let app = create_app(test_state());

        let response = app.oneshot(request("GET", "/api/health", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_or_bad_tokens() {
        let state = test_state();

        let missing = create_app(state.clone())
            .oneshot(request("GET", "/api/v1/students", None))
            .await
            .unwrap();
        let bad = create_app(state)
            .oneshot(request("GET", "/api/v1/students", Some("not-a-jwt")))
            .await
            .unwrap();

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_secret_is_a_server_error() {
        let mut state = test_state();
        state.config = Arc::new(Config::default());

        let response = create_app(state)
            .oneshot(request("GET", "/api/v1/students", Some(&mint("t", Role::Teacher))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn login_routes_by_role_and_registers_students() {
        let state = test_state();

        let student = create_app(state.clone())
            .oneshot(request("POST", "/api/v1/login", Some(&mint("s1", Role::Student))))
            .await
            .unwrap();
        let teacher = create_app(state.clone())
            .oneshot(request("POST", "/api/v1/login", Some(&mint("t1", Role::Teacher))))
            .await
            .unwrap();

        assert_eq!(json_body(student).await, serde_json::json!({"view": "code"}));
        assert_eq!(json_body(teacher).await, serde_json::json!({"view": "teach"}));
        assert_eq!(state.relay.student_count().await, 1);
    }

    #[tokio::test]
    async fn roster_is_teacher_only_and_hides_code() {
        let state = test_state();
        create_app(state.clone())
            .oneshot(request("POST", "/api/v1/login", Some(&mint("s1", Role::Student))))
            .await
            .unwrap();
        state.relay.handle_code("s1", "private".into()).await;

        let as_student = create_app(state.clone())
            .oneshot(request("GET", "/api/v1/students", Some(&mint("s1", Role::Student))))
            .await
            .unwrap();
        let as_teacher = create_app(state.clone())
            .oneshot(request("GET", "/api/v1/students", Some(&mint("t1", Role::Teacher))))
            .await
            .unwrap();

        let profiles = create_app(state.clone())
            .oneshot(request("GET", "/api/v1/students/profiles", Some(&mint("t1", Role::Teacher))))
            .await
            .unwrap();
        assert_eq!(
            json_body(profiles).await,
            serde_json::json!([{"displayName": "Name s1", "username": "user-s1"}])
        );

        assert_eq!(as_student.status(), StatusCode::FORBIDDEN);
        assert_eq!(as_teacher.status(), StatusCode::OK);
        assert_eq!(
            json_body(as_teacher).await,
            serde_json::json!([{"id": "s1", "displayName": "Name s1", "username": "user-s1"}])
        );
    }

    #[tokio::test]
    async fn logout_clears_selection() {
        let state = test_state();
        let token = mint("s1", Role::Student);
        create_app(state.clone())
            .oneshot(request("POST", "/api/v1/login", Some(&token)))
            .await
            .unwrap();
        state.relay.handle_select("s1").await.unwrap();

        let response = create_app(state.clone())
            .oneshot(request("POST", "/api/v1/logout", Some(&token)))
            .await
            .unwrap();
        let selection = create_app(state.clone())
            .oneshot(request("GET", "/api/v1/selection", Some(&mint("t1", Role::Teacher))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(json_body(selection).await, serde_json::json!({"id": null}));
        assert_eq!(state.relay.student_count().await, 0);
    }

    async fn wait_until(relay: &BroadcastRelay, students: usize, teachers: usize) {
        for _ in 0..200 {
            if relay.student_count().await == students && relay.teacher_subscriber_count() == teachers {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("relay never reached {students} students / {teachers} teachers");
    }

    fn editor_of(frame: Option<Result<Message, tokio_tungstenite::tungstenite::Error>>) -> String {
        let frame = frame.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(frame.to_text().unwrap()).unwrap();
        assert_eq!(value["type"], "code");
        value["editor"].as_str().unwrap().to_string()
    }

    fn assert_pong(frame: Option<Result<Message, tokio_tungstenite::tungstenite::Error>>) {
        let frame = frame.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(frame.to_text().unwrap()).unwrap();
        assert_eq!(value["type"], "pong");
        let date = value["date"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok(), "bad date {date}");
    }

    #[tokio::test]
    async fn relays_code_between_sockets() {
        let state = test_state();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = create_app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let connect = |path: &str, token: String| {
            let mut req = format!("ws://{addr}{path}").into_client_request().unwrap();
            req.headers_mut()
                .insert(header::AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
            tokio_tungstenite::connect_async(req)
        };

        // Roles are enforced per channel
        assert!(connect("/ws", mint("t1", Role::Teacher)).await.is_err());
        assert!(connect("/ws/teach", mint("s1", Role::Student)).await.is_err());

        let (mut student, _) = connect("/ws", mint("s1", Role::Student)).await.unwrap();
        let (mut teacher, _) = connect("/ws/teach", mint("t1", Role::Teacher)).await.unwrap();
        wait_until(&state.relay, 1, 1).await;

        teacher
            .send(Message::text(r#"{"type":"select","id":"s1"}"#.to_string()))
            .await
            .unwrap();
        let first = tokio::time::timeout(Duration::from_secs(5), teacher.next()).await.unwrap();
        assert_eq!(editor_of(first), "");

        // Pings are answered on both channels
        teacher.send(Message::text(r#"{"type":"ping"}"#.to_string())).await.unwrap();
        let pong = tokio::time::timeout(Duration::from_secs(5), teacher.next()).await.unwrap();
        assert_pong(pong);
        student.send(Message::text(r#"{"type":"ping"}"#.to_string())).await.unwrap();
        let pong = tokio::time::timeout(Duration::from_secs(5), student.next()).await.unwrap();
        assert_pong(pong);

        student
            .send(Message::text(r#"{"type":"code","editor":"x=1"}"#.to_string()))
            .await
            .unwrap();
        let second = tokio::time::timeout(Duration::from_secs(5), teacher.next()).await.unwrap();
        assert_eq!(editor_of(second), "x=1");

        // Garbage does not close the socket
        student.send(Message::text("not json".to_string())).await.unwrap();
        student
            .send(Message::text(r#"{"type":"code","id":"s1","editor":"x=2"}"#.to_string()))
            .await
            .unwrap();
        let third = tokio::time::timeout(Duration::from_secs(5), teacher.next()).await.unwrap();
        assert_eq!(editor_of(third), "x=2");

        // Binary frames are skipped, the socket stays open
        student.send(Message::binary(vec![0u8, 1, 2])).await.unwrap();
        student
            .send(Message::text(r#"{"type":"code","editor":"x=3"}"#.to_string()))
            .await
            .unwrap();
        let fourth = tokio::time::timeout(Duration::from_secs(5), teacher.next()).await.unwrap();
        assert_eq!(editor_of(fourth), "x=3");
        assert_eq!(state.relay.student_count().await, 1);

        student.close(None).await.unwrap();
        wait_until(&state.relay, 0, 1).await;
        assert_eq!(state.relay.current_selection_id().await, None);
    }
}
