use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error,
};
use futures::future::LocalBoxFuture;
use serde::Deserialize;
use std::future::{ready, Ready};

/// Lets HTML forms reach PUT/PATCH/DELETE routes: `POST /blog/1?_method=DELETE`
pub struct MethodOverride;

#[derive(Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_method(req.query_string()) {
                log::debug!("↪️  {} overridden to {}", req.path(), method);
                req.head_mut().method = method;
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}

fn override_method(query: &str) -> Option<Method> {
    let query = web::Query::<OverrideQuery>::from_query(query).ok()?;
    match query.method.as_deref()?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
