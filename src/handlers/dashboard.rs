use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::{CurrentAccount, DashboardQuery, LoadFilter};
use crate::services::{DriverService, LoadService};
use crate::utils::{consume_flash, read_flash};
use crate::views::{self, DashboardView};

/// GET /dashboard?status=&search=
pub async fn dashboard(
    req: HttpRequest,
    db: web::Data<SqlitePool>,
    account: web::ReqData<CurrentAccount>,
    query: web::Query<DashboardQuery>,
) -> AppResult<HttpResponse> {
    let account = account.into_inner();
    let filter = LoadFilter::from_query(&query);

    let loads = LoadService::list(&db, account.id, &filter).await?;
    let drivers = DriverService::list(&db, account.id).await?;
    let summary = LoadService::summarize(&db, account.id).await?;

    let flash = read_flash(&req);
    let html = views::dashboard_page(&DashboardView {
        account: &account,
        loads: &loads,
        drivers: &drivers,
        summary: &summary,
        filter: &filter,
        flash,
    });

    let mut response = HttpResponse::Ok();
    consume_flash(&mut response, flash);
    Ok(response.content_type(ContentType::html()).body(html))
}
