//! Stub upstream servers shared by the integration tests.

use std::net::TcpListener;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use url::Url;

/// Path the stub serves the employee collection on.
pub const EMPLOYEE_PATH: &str = "/api/v1/employee";

/// Start a single-worker actix server on an ephemeral port.
///
/// Returns the employee endpoint URL and a handle the caller must stop.
pub fn spawn_stub<F>(configure: F) -> (Url, ServerHandle)
where
    F: Fn(&mut web::ServiceConfig) + Clone + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener addr");
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen stub")
        .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    let url = Url::parse(&format!("http://{addr}{EMPLOYEE_PATH}")).expect("stub url");
    (url, handle)
}
