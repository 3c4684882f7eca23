//! Access logging middleware.
//!
//! Emits one `tracing` event per completed request. Development builds log a
//! compact line; production builds add the peer address, user agent and
//! referrer so the JSON log stream can be queried without a reverse proxy.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::body::{BodySize, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, REFERER, USER_AGENT};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::info;

/// Request fields captured before the inner service consumes the request.
struct RequestLine {
    method: String,
    path: String,
    peer: Option<String>,
    user_agent: Option<String>,
    referrer: Option<String>,
}

impl RequestLine {
    fn capture(req: &ServiceRequest, detailed: bool) -> Self {
        let header = |name: HeaderName| {
            req.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        Self {
            method: req.method().to_string(),
            path: req.path().to_owned(),
            peer: detailed
                .then(|| req.connection_info().peer_addr().map(str::to_owned))
                .flatten(),
            user_agent: detailed.then(|| header(USER_AGENT)).flatten(),
            referrer: detailed.then(|| header(REFERER)).flatten(),
        }
    }
}

fn body_length(size: BodySize) -> Option<u64> {
    match size {
        BodySize::Sized(length) => Some(length),
        BodySize::None => Some(0),
        BodySize::Stream => None,
    }
}

/// Middleware logging method, path, status, latency and response length.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use adoptme::middleware::AccessLog;
///
/// let app = App::new().wrap(AccessLog::new(false));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AccessLog {
    detailed: bool,
}

impl AccessLog {
    /// Build the middleware; `production` switches to the detailed format.
    pub fn new(production: bool) -> Self {
        Self {
            detailed: production,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddleware {
            service,
            detailed: self.detailed,
        }))
    }
}

/// Service wrapper produced by [`AccessLog`].
pub struct AccessLogMiddleware<S> {
    service: S,
    detailed: bool,
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let line = RequestLine::capture(&req, self.detailed);
        let detailed = self.detailed;
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;
            let status = res.status().as_u16();
            let length = body_length(res.response().body().size());
            if detailed {
                info!(
                    method = %line.method,
                    path = %line.path,
                    status,
                    latency_ms,
                    length = ?length,
                    peer = line.peer.as_deref().unwrap_or("-"),
                    user_agent = line.user_agent.as_deref().unwrap_or("-"),
                    referrer = line.referrer.as_deref().unwrap_or("-"),
                    "request completed"
                );
            } else {
                info!(
                    method = %line.method,
                    path = %line.path,
                    status,
                    latency_ms,
                    length = ?length,
                    "request completed"
                );
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(BodySize::Sized(42), Some(42))]
    #[case(BodySize::None, Some(0))]
    #[case(BodySize::Stream, None)]
    fn reports_body_length(#[case] size: BodySize, #[case] expected: Option<u64>) {
        assert_eq!(body_length(size), expected);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    #[actix_web::test]
    async fn passes_responses_through(#[case] production: bool) {
        let app = actix_test::init_service(
            App::new()
                .wrap(AccessLog::new(production))
                .route("/", web::get().to(|| async { HttpResponse::Created().body("ok") })),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((USER_AGENT, "rstest"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status().as_u16(), 201);
        assert_eq!(actix_test::read_body(res).await, "ok");
    }

    #[actix_web::test]
    async fn detailed_capture_reads_headers() {
        let req = actix_test::TestRequest::get()
            .uri("/pets?x=1")
            .insert_header((USER_AGENT, "curl/8"))
            .insert_header((REFERER, "http://localhost/"))
            .peer_addr("127.0.0.1:9000".parse().expect("socket address"))
            .to_srv_request();

        let line = RequestLine::capture(&req, true);

        assert_eq!(line.method, "GET");
        assert_eq!(line.path, "/pets");
        assert_eq!(line.user_agent.as_deref(), Some("curl/8"));
        assert_eq!(line.referrer.as_deref(), Some("http://localhost/"));
        assert!(line.peer.as_deref().is_some_and(|peer| peer.starts_with("127.0.0.1")));
    }

    #[actix_web::test]
    async fn compact_capture_skips_client_details() {
        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((USER_AGENT, "curl/8"))
            .to_srv_request();

        let line = RequestLine::capture(&req, false);

        assert!(line.user_agent.is_none());
        assert!(line.peer.is_none());
    }
}
