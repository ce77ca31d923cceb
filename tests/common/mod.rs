// Common test utilities for server integration tests

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, web, App, Error,
};
use server::{config::AppConfig, configure, db, middleware::SESSION_COOKIE};
use sqlx::SqlitePool;

pub const PASSWORD: &str = "correct-horse";

/// Fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    db::init_db("sqlite::memory:")
        .await
        .expect("in-memory database should open")
}

/// The full application wired to `pool`
pub async fn test_app(
    pool: SqlitePool,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(AppConfig::for_tests()))
            .configure(configure),
    )
    .await
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn register<S, B>(app: &S, username: &str, password: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([("username", username), ("password", password)])
        .to_request();
    test::call_service(app, req).await
}

pub async fn login<S, B>(app: &S, username: &str, password: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", username), ("password", password)])
        .to_request();
    test::call_service(app, req).await
}

/// Register `username` and return a live session cookie
pub async fn sign_in<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let resp = register(app, username, PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "register {}", username);

    let resp = login(app, username, PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login {}", username);
    session_cookie(&resp).expect("login sets a session cookie")
}

pub async fn get<S, B>(app: &S, uri: &str, cookie: &Cookie<'static>) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    test::call_service(app, req).await
}

pub async fn post_form<S, B>(
    app: &S,
    uri: &str,
    cookie: &Cookie<'static>,
    form: &[(&str, &str)],
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_form(form)
        .to_request();
    test::call_service(app, req).await
}

pub async fn latest_id(pool: &SqlitePool, table: &str) -> i64 {
    let sql = format!("SELECT MAX(id) FROM {}", table);
    sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(pool)
        .await
        .expect("table has rows")
}
