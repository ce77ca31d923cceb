use actix_web::{http::header::ContentType, web, HttpResponse};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::{CurrentAccount, LoadForm};
use crate::services::{DriverService, LoadService};
use crate::utils::{redirect_with_flash, Flash};
use crate::views;

/// GET /add_load
pub async fn add_load_form(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
) -> AppResult<HttpResponse> {
    let drivers = DriverService::list(&db, account.id).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::load_form_page(&account, None, &drivers)))
}

/// POST /add_load
pub async fn add_load(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    form: web::Form<LoadForm>,
) -> AppResult<HttpResponse> {
    let input = form.into_inner().into_input()?;

    LoadService::create(&db, account.id, &input).await?;
    Ok(redirect_with_flash("/dashboard", Flash::LoadAdded))
}

/// GET /edit_load/{id}
pub async fn edit_load_form(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    load_id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let load = LoadService::get_owned(db.get_ref(), account.id, load_id.into_inner()).await?;
    let drivers = DriverService::list(&db, account.id).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::load_form_page(&account, Some(&load), &drivers)))
}

/// POST /edit_load/{id}
pub async fn edit_load(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    load_id: web::Path<i64>,
    form: web::Form<LoadForm>,
) -> AppResult<HttpResponse> {
    let input = form.into_inner().into_input()?;

    LoadService::update(&db, account.id, load_id.into_inner(), &input).await?;
    Ok(redirect_with_flash("/dashboard", Flash::LoadUpdated))
}

/// GET|POST /delete_load/{id}
pub async fn delete_load(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    load_id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    LoadService::delete(&db, account.id, load_id.into_inner()).await?;
    Ok(redirect_with_flash("/dashboard", Flash::LoadDeleted))
}
