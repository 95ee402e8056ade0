use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use std::future::Ready;
use std::future::ready;

/// Extractor for authenticated requests.
///
/// Admits everything when no tokens are configured; otherwise requires
/// `Authorization: Bearer <token>` with a known token.
pub struct Auth(pub Grant);

impl Auth {
    pub fn grant(&self) -> &Grant {
        &self.0
    }
    pub fn db_path(&self) -> Option<&str> {
        self.0.db_path()
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Auth, actix_web::Error> {
    let tokens = req
        .app_data::<web::Data<Tokens>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("token table not configured"))?;
    if !tokens.enabled() {
        return Ok(Auth(Grant::anonymous()));
    }
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Invalid or missing token"))?;
    tokens
        .lookup(token)
        .cloned()
        .map(Auth)
        .ok_or_else(|| {
            log::debug!("rejected unknown bearer token");
            actix_web::error::ErrorUnauthorized("Invalid or missing token")
        })
}
