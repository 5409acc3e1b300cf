use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::ApiClient;
use crate::auth::session::{SessionContext, is_logged_in};
use crate::auth::{csrf, validate};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::user::LoginForm;
use crate::templates_structs::{AccountTemplate, LoginTemplate, PageContext};

const LOGIN_FAILED: &str = "Login failed, please check your credentials";

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, config: &AppConfig, email: &str, error: Option<String>) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error,
        email: email.to_string(),
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
    };
    render(tmpl)
}

pub async fn login_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // If already logged in, redirect to dashboard
    if is_logged_in(&session) {
        return Ok(see_other("/dashboard"));
    }
    login_form(&session, &config, "", None)
}

pub async fn login_submit(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let email = form.email.trim();
    let missing: Vec<String> = validate::validate_email(email)
        .into_iter()
        .chain(form.password.is_empty().then(|| "Password is required".to_string()))
        .collect();
    if !missing.is_empty() {
        return login_form(&session, &config, email, Some(missing.join(". ")));
    }

    log::info!("Login attempt for {email}");
    match api.login(email, &form.password).await {
        Ok(response) if response.success => match response.user {
            Some(user) => {
                log::info!("User {} logged in", user.id);
                session.renew();
                SessionContext { user, token: response.token }.store(&session)?;
                Ok(see_other("/dashboard"))
            }
            None => {
                log::warn!("Login for {email} succeeded without a user record");
                login_form(&session, &config, email, Some(LOGIN_FAILED.to_string()))
            }
        },
        Ok(response) => {
            let message = response.message.unwrap_or_else(|| LOGIN_FAILED.to_string());
            login_form(&session, &config, email, Some(message))
        }
        Err(e) => {
            log::warn!("Login request for {email} failed: {e}");
            login_form(&session, &config, email, Some(LOGIN_FAILED.to_string()))
        }
    }
}

/// Clears the session even when the remote logout call fails.
pub async fn logout(
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Ok(current) = SessionContext::load(&session) {
        if let Err(e) = api.logout(current.token()).await {
            log::warn!("Remote logout for {} failed: {e}", current.user.id);
        }
    }
    session.purge();
    Ok(see_other("/login"))
}

/// Profile page. Refreshes the stored user from `/auth/me`; a rejected token
/// ends the session.
pub async fn account(
    config: web::Data<AppConfig>,
    api: web::Data<ApiClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut current = SessionContext::load(&session)?;
    let mut notice = None;

    if let Some(token) = current.token.clone() {
        match api.current_user(&token).await {
            Ok(user) => {
                current.user = user;
                current.store(&session)?;
            }
            Err(e) if e.status() == Some(401) => {
                log::info!("Token for {} rejected, ending session", current.user.id);
                session.purge();
                return Ok(see_other("/login"));
            }
            Err(e) => {
                log::warn!("Profile refresh failed: {e}");
                notice = Some("Could not refresh your profile; showing the stored copy.".to_string());
            }
        }
    }

    let ctx = PageContext::from_parts(&session, &config, &current, "/account");
    render(AccountTemplate { ctx, user: current.user, notice })
}
