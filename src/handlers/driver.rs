use actix_web::{http::header::ContentType, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::error::AppResult;
use crate::models::{CurrentAccount, DriverForm};
use crate::services::DriverService;
use crate::utils::{redirect_with_flash, Flash};
use crate::views;

/// GET /add_driver
pub async fn add_driver_form(account: web::ReqData<CurrentAccount>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::driver_form_page(&account, None))
}

/// POST /add_driver
pub async fn add_driver(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    form: web::Form<DriverForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner().trimmed();
    form.validate()?;

    DriverService::create(&db, account.id, &form).await?;
    Ok(redirect_with_flash("/dashboard", Flash::DriverAdded))
}

/// GET /edit_driver/{id}
pub async fn edit_driver_form(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    driver_id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let driver = DriverService::get_owned(db.get_ref(), account.id, driver_id.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::driver_form_page(&account, Some(&driver))))
}

/// POST /edit_driver/{id}
pub async fn edit_driver(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    driver_id: web::Path<i64>,
    form: web::Form<DriverForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner().trimmed();
    form.validate()?;

    DriverService::update(&db, account.id, driver_id.into_inner(), &form).await?;
    Ok(redirect_with_flash("/dashboard", Flash::DriverUpdated))
}

/// GET|POST /delete_driver/{id}
pub async fn delete_driver(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    driver_id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    DriverService::delete(&db, account.id, driver_id.into_inner()).await?;
    Ok(redirect_with_flash("/dashboard", Flash::DriverDeleted))
}
