use actix_web::{http::header, web, HttpResponse};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::{CurrentAccount, LoadFilter};
use crate::services::export::EXPORT_FILENAME;
use crate::services::{ExportService, LoadService};

/// GET /export_loads
pub async fn export_loads(
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
) -> AppResult<HttpResponse> {
    let loads = LoadService::list(&db, account.id, &LoadFilter::default()).await?;
    let csv = ExportService::loads_to_csv(&loads)?;

    log::info!("Account {} exported {} loads", account.username, loads.len());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
        ))
        .body(csv))
}
