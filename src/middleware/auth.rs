use actix_web::{dev::Payload, error::InternalError, Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use std::future::{ready, Ready};

use super::session::Session;
use crate::api::redirect;

/// Extractor for routes that require a logged-in user.
///
/// Without a session user the request is answered with a redirect to `/login`.
#[derive(Debug, Clone, Copy)]
pub struct LoggedIn {
    pub user_id: ObjectId,
}

impl FromRequest for LoggedIn {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user_id = req
            .extensions()
            .get::<Session>()
            .and_then(|s| s.user_id())
            .and_then(|id| ObjectId::parse_str(&id).ok());

        ready(match user_id {
            Some(user_id) => Ok(LoggedIn { user_id }),
            None => {
                log::info!("🔒 {} {} requires login", req.method(), req.path());
                Err(InternalError::from_response("login required", redirect("/login")).into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::header::LOCATION, http::StatusCode, test};

    #[actix_web::test]
    async fn session_user_passes_the_gate() {
        let req = test::TestRequest::with_uri("/blog").to_http_request();
        let session = Session::default();
        session.set_user_id("64b7f0c2a1b2c3d4e5f60718".to_string());
        req.extensions_mut().insert(session);

        let user = LoggedIn::extract(&req).await.unwrap();
        assert_eq!(user.user_id.to_hex(), "64b7f0c2a1b2c3d4e5f60718");
    }

    #[actix_web::test]
    async fn anonymous_request_redirects_to_login() {
        let req = test::TestRequest::with_uri("/blog").to_http_request();
        req.extensions_mut().insert(Session::default());

        let resp = LoggedIn::extract(&req).await.unwrap_err().error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/login");
    }
}
