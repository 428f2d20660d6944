use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::AuthenticatedUser;
use crate::error::AppError;

/// Identity of the caller, as resolved by the `RequireAuth` gate.
///
/// Only the subject is trusted. Handlers that need the user's record look it
/// up by `sub`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub sub: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Absent only when a route was mounted outside the gate
        let user = req
            .extensions()
            .get::<AuthenticatedUser>()
            .map(|user| CurrentUser {
                sub: user.sub.clone(),
            })
            .ok_or_else(AppError::unauthorized);
        ready(user)
    }
}
