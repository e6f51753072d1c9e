//! Shared utilities for integration tests.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use wirerouter::{App, HeaderMap, Request, Response};

/// Build a request from fields, the way handlers see them.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str) -> Request {
    Request::new(method, uri, "HTTP/1.1", "", HeaderMap::new())
}

/// App with the home/submit/item routes used across tests.
pub fn sample_app() -> App {
    let mut app = App::new();
    app.register_route("GET", "/home", |_: &Request| {
        Response::text(200, "OK", "Welcome to the home page!")
    })
    .unwrap();
    app.register_route("POST", "/submit", |req: &Request| {
        Response::text(200, "OK", format!("Hello, {}!", req.input_parameter("name")))
    })
    .unwrap();
    app.register_route("GET", "/item/:id", |req: &Request| {
        Response::text(200, "OK", format!("item {}", req.path()))
    })
    .unwrap();
    app
}

/// Send raw bytes to `addr` and read until the server closes the socket.
#[allow(dead_code)]
pub async fn send_raw(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}
