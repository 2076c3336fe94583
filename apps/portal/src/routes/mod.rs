pub mod health;

use axum::{routing::get, Router};

use crate::state::AppState;
use crate::{admin, board, candidate, quest};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public job board
        .nest("/jobs", board::handlers::router())
        // Developer Quest
        .nest("/quest", quest::handlers::router())
        // Candidate portal
        .nest("/candidate", candidate::handlers::router())
        // Admin console
        .nest("/console", admin::handlers::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        extract::Multipart,
        http::{header, Request, StatusCode},
        response::Response,
        routing::{delete, get, post},
        Json,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::admin::handlers::SESSION_HEADER;
    use crate::admin::role::token_with_claims;
    use crate::api_client::testing::spawn_backend;
    use crate::config::Config;
    use crate::quest::wizard::{ResumeMeta, Screen, Wizard};

    async fn app(backend: Router) -> Router {
        let api = spawn_backend(backend).await;
        let config = Config {
            backend_url: api.base_url().to_string(),
            backend_timeout: Duration::from_secs(5),
            console_session_ttl: chrono::Duration::minutes(30),
            port: 0,
            rust_log: "info".to_string(),
        };
        build_router(AppState::new(api, config))
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Router::new()).await.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["console_sessions"], 0);
        assert_eq!(body["console_session_ttl_minutes"], 30);
        assert!(body["api_base"].as_str().unwrap().ends_with("/api"));
    }

    #[tokio::test]
    async fn test_job_board_lists_published_postings() {
        let backend = Router::new()
            .route(
                "/api/jobs",
                get(|| async {
                    Json(json!({"items": [
                        {"id": "1", "slug": "backend-intern", "title": "Backend Intern", "type": "job"},
                        {"id": "2", "slug": "draft", "title": "Draft", "is_published": false}
                    ]}))
                }),
            )
            .route(
                "/api/jobs/:slug",
                get(|| async { Json(json!({"id": "1", "slug": "backend-intern", "title": "Backend Intern"})) }),
            );
        let app = app(backend).await;

        let response = app.clone().oneshot(get_req("/jobs")).await.unwrap();
        let cards = json_body(response).await;
        assert_eq!(cards.as_array().unwrap().len(), 1);
        assert_eq!(cards[0]["badge"], "Job");

        let response = app.oneshot(get_req("/jobs/backend-intern")).await.unwrap();
        let detail = json_body(response).await;
        assert_eq!(detail["apply_href"], "/quest?job=backend-intern");
        assert_eq!(detail["team"], "Engineering");
    }

    #[tokio::test]
    async fn test_quest_step_starts_quiz() {
        let wizard = serde_json::to_value(Wizard::new(None)).unwrap();
        let response = app(Router::new())
            .await
            .oneshot(json_req("POST", "/quest/step", json!({"wizard": wizard, "action": {"type": "start"}})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let view = json_body(response).await;
        assert_eq!(view["wizard"]["screen"], "quiz");
        assert_eq!(view["xp"], 180);
        assert_eq!(view["persona"], "Clean Code Paladin");
    }

    #[tokio::test]
    async fn test_quest_step_clamps_tampered_state() {
        let wizard = json!({
            "screen": "wizard",
            "level": 255,
            "quiz_answers": {
                "style": "A", "bug": "B", "team": "C", "vibe": "A",
                "x1": "Z", "x2": "Z", "x3": "Z", "x4": "Z", "x5": "Z", "x6": "Z"
            }
        });
        let response = app(Router::new())
            .await
            .oneshot(json_req("POST", "/quest/step", json!({"wizard": wizard, "action": {"type": "next"}})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let view = json_body(response).await;
        assert_eq!(view["wizard"]["level"], 5);
        assert_eq!(view["xp"], 460);
        assert_eq!(view["wizard"]["quiz_answers"].as_object().unwrap().len(), 4);
    }

    fn multipart_request(wizard: &Wizard, resume: Option<&[u8]>) -> Request<Body> {
        let boundary = "portal-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"wizard\"\r\n\r\n{}\r\n",
                serde_json::to_string(wizard).unwrap()
            )
            .as_bytes(),
        );
        if let Some(bytes) = resume {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/quest/applications")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn finale_wizard() -> Wizard {
        let mut wizard = Wizard::new(Some("backend-intern".into()));
        wizard.screen = Screen::Wizard;
        wizard.level = 5;
        wizard
    }

    #[tokio::test]
    async fn test_quest_submission_revalidates_every_level() {
        let response = app(Router::new())
            .await
            .oneshot(multipart_request(&finale_wizard(), Some(b"%PDF-1.4")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let view = json_body(response).await;
        assert_eq!(view["wizard"]["level"], 1);
        assert!(view["wizard"]["errors"]["email"].is_string());
        assert_eq!(view["notice"]["title"], "Quest blocked");
    }

    #[tokio::test]
    async fn test_quest_submission_reaches_backend() {
        async fn receive(mut multipart: Multipart) -> Json<Value> {
            let mut payload = Value::Null;
            let mut resume_len = 0;
            while let Some(field) = multipart.next_field().await.unwrap() {
                match field.name() {
                    Some("payload") => payload = serde_json::from_str(&field.text().await.unwrap()).unwrap(),
                    Some("resume") => resume_len = field.bytes().await.unwrap().len(),
                    _ => {}
                }
            }
            Json(json!({"id": "app-1", "persona": payload["persona"], "job": payload["job_slug"], "resume_len": resume_len}))
        }

        let mut wizard = finale_wizard();
        wizard.form.name = "Asha".into();
        wizard.form.email = "asha@example.com".into();
        wizard.form.phone = "9999999999".into();
        wizard.form.college = "IIT".into();
        wizard.form.grad_year = "2026".into();
        wizard.form.skills = vec!["Rust".into()];
        wizard.form.projects = "Built a ray tracer in Rust".into();
        wizard.form.resume = Some(ResumeMeta {
            file_name: "old.pdf".into(),
            size: None,
        });
        wizard.form.strengths_text = "- curious\n- calm\n- fast".into();
        wizard.form.weaknesses_text = "- impatient\n- verbose".into();

        let backend = Router::new().route("/api/developer-applications", post(receive));
        let response = app(backend)
            .await
            .oneshot(multipart_request(&wizard, Some(b"%PDF-1.4")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let view = json_body(response).await;
        assert_eq!(view["wizard"]["screen"], "success");
        assert_eq!(view["wizard"]["form"]["resume"]["file_name"], "cv.pdf");
        let result = &view["wizard"]["submit_state"]["result"];
        assert_eq!(result["job"], "backend-intern");
        assert_eq!(result["resume_len"], 8);
    }

    #[tokio::test]
    async fn test_candidate_task_pages_redirect_without_token() {
        let app = app(Router::new()).await;
        for uri in ["/candidate/quiz", "/candidate/coding"] {
            let response = app.clone().oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[header::LOCATION], "/candidate");
        }
        let response = app.oneshot(get_req("/candidate/portal")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_candidate_login_sets_cookie_and_portal_reads_it() {
        let backend = Router::new()
            .route(
                "/api/candidate/auth/login",
                post(|| async { Json(json!({"token": "cand-token"})) }),
            )
            .route(
                "/api/candidate/me",
                get(|headers: axum::http::HeaderMap| async move {
                    assert_eq!(headers[header::AUTHORIZATION], "Bearer cand-token");
                    Json(json!({
                        "candidate": {"candidate_id": "c-1", "full_name": "Asha", "status": "Pending"},
                        "round": {"round_id": "round-2", "round_name": "Quiz", "is_quiz": true}
                    }))
                }),
            );
        let app = app(backend).await;

        let response = app
            .clone()
            .oneshot(json_req("POST", "/candidate/auth/login", json!({"email": "a@b.co", "password": "pw"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with("pixwik_candidate_token=cand-token"));

        let request = Request::builder()
            .uri("/candidate/portal")
            .header(header::COOKIE, "pixwik_candidate_token=cand-token")
            .body(Body::empty())
            .unwrap();
        let view = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(view["status_message"], "This round includes an online quiz.");
        assert_eq!(view["affordances"]["start_quiz"], true);
    }

    #[tokio::test]
    async fn test_quiz_submission_checks_the_sheet_it_was_given() {
        let backend = Router::new().route(
            "/api/candidate/quiz/submit",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["selected_answers"]["q-2"], "D");
                Json(json!({"ok": true}))
            }),
        );
        let app = app(backend).await;
        let submit = |answers: Value| {
            Request::builder()
                .method("POST")
                .uri("/candidate/quiz/submit")
                .header(header::COOKIE, "pixwik_candidate_token=t")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"question_ids": ["q-1", "q-2"], "selected_answers": answers, "confirm": true})
                        .to_string(),
                ))
                .unwrap()
        };

        let response = app.clone().oneshot(submit(json!({"q-1": "A"}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(submit(json!({"q-1": "A", "q-2": "D"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_code_submission_needs_confirmation() {
        let request = Request::builder()
            .method("POST")
            .uri("/candidate/coding/submit")
            .header(header::COOKIE, "pixwik_candidate_token=t")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"language": "python", "code": "print(1)"}).to_string()))
            .unwrap();
        let response = app(Router::new()).await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Submit final solution? You can only submit once."
        );
    }

    #[tokio::test]
    async fn test_console_requires_session() {
        let response = app(Router::new()).await.oneshot(get_req("/console")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_console_login_then_confirmed_delete() {
        let token = token_with_claims(&json!({"role": "super_admin"}));
        let backend = Router::new()
            .route(
                "/api/admin/login",
                post(move || {
                    let token = token.clone();
                    async move { Json(json!({ "token": token })) }
                }),
            )
            .route(
                "/api/admin/jobs",
                get(|| async { Json(json!({"items": [{"id": "j-1", "title": "SDE"}]})) }),
            )
            .route("/api/admin/jobs/:id", delete(|| async { Json(json!({})) }));
        let app = app(backend).await;

        let response = app
            .clone()
            .oneshot(json_req("POST", "/console/login", json!({"username": "root", "password": "pw"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let login = json_body(response).await;
        let session = login["session"].as_str().unwrap().to_string();
        assert_eq!(login["console"]["role"], "super_admin");
        assert_eq!(login["console"]["jobs"]["rows"][0]["id"], "j-1");

        let request = Request::builder()
            .method("DELETE")
            .uri("/console/jobs/j-1")
            .header(SESSION_HEADER, &session)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let prompt = json_body(response).await;
        assert_eq!(prompt["prompt"], "Delete this job posting?");

        let request = Request::builder()
            .method("POST")
            .uri(format!("/console/confirmations/{}", prompt["token"].as_str().unwrap()))
            .header(SESSION_HEADER, &session)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = json_body(response).await;
        assert_eq!(snapshot["pending_confirmations"], 0);

        let request = Request::builder()
            .method("POST")
            .uri("/console/logout")
            .header(SESSION_HEADER, &session)
            .body(Body::empty())
            .unwrap();
        assert_eq!(app.clone().oneshot(request).await.unwrap().status(), StatusCode::NO_CONTENT);

        let request = Request::builder()
            .uri("/console")
            .header(SESSION_HEADER, &session)
            .body(Body::empty())
            .unwrap();
        assert_eq!(app.oneshot(request).await.unwrap().status(), StatusCode::UNAUTHORIZED);
    }
}
