/// One-shot messages carried across a redirect in a cookie
use actix_web::{
    cookie::{time::Duration, Cookie},
    http::header,
    HttpRequest, HttpResponse, HttpResponseBuilder,
};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    AccountCreated,
    LoggedOut,
    DriverAdded,
    DriverUpdated,
    DriverDeleted,
    LoadAdded,
    LoadUpdated,
    LoadDeleted,
}

impl Flash {
    const ALL: [Flash; 8] = [
        Self::AccountCreated,
        Self::LoggedOut,
        Self::DriverAdded,
        Self::DriverUpdated,
        Self::DriverDeleted,
        Self::LoadAdded,
        Self::LoadUpdated,
        Self::LoadDeleted,
    ];

    fn key(&self) -> &'static str {
        match self {
            Self::AccountCreated => "account_created",
            Self::LoggedOut => "logged_out",
            Self::DriverAdded => "driver_added",
            Self::DriverUpdated => "driver_updated",
            Self::DriverDeleted => "driver_deleted",
            Self::LoadAdded => "load_added",
            Self::LoadUpdated => "load_updated",
            Self::LoadDeleted => "load_deleted",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::AccountCreated => "Account created. Welcome aboard.",
            Self::LoggedOut => "You have been logged out.",
            Self::DriverAdded => "Driver added.",
            Self::DriverUpdated => "Driver updated successfully!",
            Self::DriverDeleted => "Driver removed.",
            Self::LoadAdded => "Load added.",
            Self::LoadUpdated => "Load updated successfully.",
            Self::LoadDeleted => "Load removed.",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, self.key())
            .path("/")
            .http_only(true)
            .finish()
    }
}

/// Flash set by the previous response, if any
pub fn read_flash(req: &HttpRequest) -> Option<Flash> {
    req.cookie(FLASH_COOKIE)
        .and_then(|c| Flash::from_key(c.value()))
}

/// Expire the flash cookie once its message has been shown
pub fn consume_flash(builder: &mut HttpResponseBuilder, flash: Option<Flash>) {
    if flash.is_some() {
        builder.cookie(removal_cookie(FLASH_COOKIE));
    }
}

pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .max_age(Duration::ZERO)
        .finish()
}

/// 303 redirect, so the browser follows a POST with a GET
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

pub fn redirect_with_flash(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .cookie(flash.cookie())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_round_trip_through_cookie() {
        let resp = redirect_with_flash("/dashboard", Flash::LoadAdded);
        let cookie = resp
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .unwrap()
            .into_owned();

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(read_flash(&req), Some(Flash::LoadAdded));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let req = TestRequest::default()
            .cookie(Cookie::new(FLASH_COOKIE, "<script>"))
            .to_http_request();
        assert_eq!(read_flash(&req), None);
    }
}
