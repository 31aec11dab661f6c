//! Middleware pinning the JSON content type on API responses.
//!
//! actix-web labels JSON bodies `application/json` without a charset and
//! leaves empty bodies untyped. API clients expect every `/api` response,
//! errors included, to declare `application/json; charset=utf-8`.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{CONTENT_TYPE, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};

/// Value written to the `Content-Type` header.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Middleware overwriting `Content-Type` with [`JSON_UTF8`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::middleware::JsonContentType;
///
/// let app = App::new().service(web::scope("/api").wrap(JsonContentType));
/// ```
#[derive(Clone, Copy, Default)]
pub struct JsonContentType;

impl<S, B> Transform<S, ServiceRequest> for JsonContentType
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JsonContentTypeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JsonContentTypeMiddleware { service }))
    }
}

/// Service wrapper produced by [`JsonContentType`].
pub struct JsonContentTypeMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JsonContentTypeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            res.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    #[rstest]
    #[case("/api/json")]
    #[case("/api/empty")]
    #[actix_web::test]
    async fn api_responses_declare_utf8_json(#[case] uri: &str) {
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(JsonContentType)
                    .route(
                        "/json",
                        web::get().to(|| async { HttpResponse::Ok().json(["a"]) }),
                    )
                    .route("/empty", web::get().to(|| async { HttpResponse::NotFound().finish() })),
            ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(
            res.headers().get(CONTENT_TYPE).map(HeaderValue::as_bytes),
            Some(JSON_UTF8.as_bytes())
        );
    }
}
