use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    http::header::{self, ContentType},
    web, HttpRequest, HttpResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::SESSION_COOKIE;
use crate::models::{CurrentAccount, LoginForm, RegisterForm};
use crate::services::{AccountService, SessionService};
use crate::utils::{
    consume_flash, create_token, read_flash, redirect_with_flash, removal_cookie, see_other, Flash,
};
use crate::views;

/// GET /
pub async fn index() -> HttpResponse {
    see_other("/dashboard")
}

/// GET /register
pub async fn register_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::register_page(None, ""))
}

/// POST /register
pub async fn register(
    db: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner().trimmed();

    if let Err(errors) = form.validate() {
        return Ok(HttpResponse::BadRequest()
            .content_type(ContentType::html())
            .body(views::register_page(Some(&errors.to_string()), &form.username)));
    }

    match AccountService::register(&db, &form.username, &form.password, config.bcrypt_cost).await {
        Ok(_) => Ok(redirect_with_flash("/login", Flash::AccountCreated)),
        Err(AppError::DuplicateUsername) => Ok(HttpResponse::Conflict()
            .content_type(ContentType::html())
            .body(views::register_page(
                Some(&AppError::DuplicateUsername.to_string()),
                &form.username,
            ))),
        Err(e) => Err(e),
    }
}

/// GET /login
pub async fn login_form(req: HttpRequest) -> HttpResponse {
    let flash = read_flash(&req);
    let mut response = HttpResponse::Ok();
    consume_flash(&mut response, flash);
    response
        .content_type(ContentType::html())
        .body(views::login_page(None, flash, ""))
}

/// POST /login
pub async fn login(
    db: web::Data<SqlitePool>,
    config: web::Data<AppConfig>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let username = form.username.trim();

    let account = match AccountService::authenticate(&db, username, &form.password).await {
        Ok(account) => account,
        Err(AppError::InvalidCredentials) => {
            return Ok(HttpResponse::Unauthorized()
                .content_type(ContentType::html())
                .body(views::login_page(
                    Some(&AppError::InvalidCredentials.to_string()),
                    None,
                    username,
                )));
        }
        Err(e) => return Err(e),
    };

    SessionService::prune_expired(&db, account.id, config.jwt_expiration).await?;
    let session = SessionService::create(&db, account.id).await?;
    let token = create_token(&config, account.id, &account.username, &session.id)?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(config.jwt_expiration))
        .finish();

    log::info!("Account {} logged in", account.username);

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/dashboard"))
        .cookie(cookie)
        .finish())
}

/// GET /logout
pub async fn logout(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
) -> AppResult<HttpResponse> {
    let account = account.into_inner();
    SessionService::delete(&db, &account.session_id).await?;

    log::info!("Account {} logged out", account.username);

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .cookie(removal_cookie(SESSION_COOKIE))
        .cookie(Flash::LoggedOut.cookie())
        .finish())
}
