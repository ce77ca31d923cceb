use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use sqlx::SqlitePool;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::config::AppConfig;
use crate::models::CurrentAccount;
use crate::services::SessionService;
use crate::utils::{removal_cookie, verify_token};

pub const SESSION_COOKIE: &str = "session";

/// Gate for every route that needs a logged-in account.
///
/// A request passes when its `session` cookie holds a valid token whose
/// session row still exists; the account is then available to handlers as
/// `web::ReqData<CurrentAccount>`. Anything else is redirected to `/login`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

fn login_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .cookie(removal_cookie(SESSION_COOKIE))
        .finish()
}

/// Resolve the session cookie to an account, or `None` if it does not check out
async fn authenticate(req: &ServiceRequest) -> Option<CurrentAccount> {
    let token = req.cookie(SESSION_COOKIE)?.value().to_string();
    let config = req.app_data::<web::Data<AppConfig>>()?.clone();
    let db = req.app_data::<web::Data<SqlitePool>>()?.clone();

    let claims = match verify_token(&config, &token) {
        Ok(claims) => claims,
        Err(e) => {
            log::debug!("Rejected session token: {}", e);
            return None;
        }
    };
    let account_id = claims.account_id()?;

    match SessionService::find(&db, &claims.sid, account_id).await {
        Ok(Some(_)) => Some(CurrentAccount {
            id: account_id,
            username: claims.username,
            session_id: claims.sid,
        }),
        Ok(None) => {
            log::debug!("Session {} no longer exists", claims.sid);
            None
        }
        Err(e) => {
            log::error!("Session lookup failed: {}", e);
            None
        }
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req).await {
                Some(account) => {
                    req.extensions_mut().insert(account);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                None => Ok(req.into_response(login_redirect()).map_into_right_body()),
            }
        })
    }
}
