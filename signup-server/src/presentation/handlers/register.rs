use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, get, http::StatusCode, post, web};
use tracing::{info, warn};

use crate::application::registration_service::RegistrationService;
use crate::data::user_repository::JsonFileUserRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::RegistrationForm;
use crate::presentation::html;
use crate::presentation::middleware::RequestId;

const SUCCESS_MESSAGE: &str = "User saved successfully!";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(registration_form).service(register);
}

#[get("/")]
async fn index() -> HttpResponse {
    page(StatusCode::OK, "", "", "")
}

#[get("/register")]
async fn registration_form() -> HttpResponse {
    page(StatusCode::OK, "", "", "")
}

#[post("/register")]
async fn register(
    req: HttpRequest,
    service: web::Data<RegistrationService<JsonFileUserRepository>>,
    payload: Result<web::Form<RegistrationForm>, actix_web::Error>,
) -> HttpResponse {
    // A body that is not a readable form is answered like an empty form.
    let form = match payload {
        Ok(form) => form.into_inner(),
        Err(err) => {
            info!(request_id = %request_id(&req), error = %err, "unreadable registration body");
            RegistrationForm::default()
        }
    };
    let name = form.name.trim().to_string();
    let email = form.email.trim().to_string();

    match service.register(form).await {
        Ok(user) => {
            info!(request_id = %request_id(&req), email = %user.email, "user registered");
            let feedback = html::feedback(&[], Some(SUCCESS_MESSAGE));
            page(StatusCode::OK, &feedback, "", "")
        }
        Err(err) => {
            log_failure(&req, &err);
            let feedback = html::feedback(&err.messages(), None);
            page(err.status_code(), &feedback, &name, &email)
        }
    }
}

fn log_failure(req: &HttpRequest, err: &DomainError) {
    match err {
        DomainError::Validation(_) => {
            info!(request_id = %request_id(req), error = %err, "registration rejected")
        }
        DomainError::Storage(detail) => {
            warn!(request_id = %request_id(req), detail = %detail, "user store write failed")
        }
        DomainError::Internal(_) => {
            warn!(request_id = %request_id(req), error = %err, "registration failed")
        }
    }
}

fn page(status: StatusCode, feedback: &str, name: &str, email: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(html::registration_page(feedback, name, email))
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::user_repository::UserRepository;
    use crate::infrastructure::security::verify_password;
    use actix_web::{App, test};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("signup-handler-{}.json", Uuid::new_v4()))
    }

    async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(resp).await;
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn data(path: &Path) -> (
        web::Data<RegistrationService<JsonFileUserRepository>>,
        Arc<JsonFileUserRepository>,
    ) {
        let repo = Arc::new(JsonFileUserRepository::new(path));
        let service = RegistrationService::new(Arc::clone(&repo));
        (web::Data::new(service), repo)
    }

    #[actix_web::test]
    async fn initial_page_is_clean() {
        let path = temp_path();
        let (service, _) = data(&path);
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/register").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_text(resp).await;
        assert!(body.contains("<form"));
        assert!(!body.contains("color:red"));
    }

    #[actix_web::test]
    async fn valid_submission_is_persisted_hashed() {
        let path = temp_path();
        let (service, repo) = data(&path);
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("name", " Ada "),
                ("email", "ada@example.com"),
                ("password", "correct horse"),
                ("confirm_password", "correct horse"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("<p style='color:green;'>User saved successfully!</p>"));

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ada");
        assert_ne!(users[0].password_hash, "correct horse");
        assert!(verify_password("correct horse", &users[0].password_hash).unwrap());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[actix_web::test]
    async fn empty_fields_report_every_error_and_keep_store() {
        let path = temp_path();
        tokio::fs::write(&path, "[\n  {\"name\": \"x\"}\n]").await.unwrap();
        let before = tokio::fs::read(&path).await.unwrap();

        let (service, _) = data(&path);
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form([("name", ""), ("email", ""), ("password", ""), ("confirm_password", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_text(resp).await;
        for message in ["Name required", "Email required", "Invalid email", "Password required"] {
            assert!(body.contains(&format!("<p style='color:red;'>{message}</p>")), "{message}");
        }
        assert!(!body.contains("Passwords do not match"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), before);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[actix_web::test]
    async fn rejected_values_are_echoed_escaped() {
        let path = temp_path();
        let (service, _) = data(&path);
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("name", "<script>x</script>"),
                ("email", "not-an-email"),
                ("password", "pw"),
                ("confirm_password", "pw"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body = body_text(resp).await;

        assert!(body.contains("Invalid email"));
        assert!(body.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!body.contains("<script>"));
        assert!(!tokio::fs::try_exists(&path).await.unwrap());
    }

    #[actix_web::test]
    async fn non_form_body_gets_the_error_page() {
        let path = temp_path();
        let (service, _) = data(&path);
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(serde_json::json!({"name": "Ada"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_text(resp).await;
        assert!(body.contains("<p style='color:red;'>Name required</p>"));
        assert!(body.contains("<form"));
        assert!(!tokio::fs::try_exists(&path).await.unwrap());
    }

    #[actix_web::test]
    async fn write_failure_shows_generic_message() {
        let path = std::env::temp_dir()
            .join(format!("signup-absent-{}", Uuid::new_v4()))
            .join("users.json");
        let (service, _) = data(&path);
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form([
                ("name", "Ada"),
                ("email", "ada@example.com"),
                ("password", "pw"),
                ("confirm_password", "pw"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(resp).await.contains("<p style='color:red;'>Could not write to JSON file</p>"));
    }
}
