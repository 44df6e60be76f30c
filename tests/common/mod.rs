//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread::JoinHandle;

/// The request a [`OneShotServer`] received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Local HTTP responder that answers exactly one request with a canned response.
pub struct OneShotServer {
    pub url: String,
    handle: JoinHandle<RecordedRequest>,
}

impl OneShotServer {
    /// Listen on an ephemeral port; `path` is appended to the returned URL.
    pub fn start(path: &str, status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            reason(status),
            body.len()
        );

        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    headers.push((k.trim().to_string(), v.trim().to_string()));
                }
            }

            let length = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0);
            let mut body = vec![0u8; length];
            reader.read_exact(&mut body).expect("body");

            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).expect("respond");
            stream.flush().expect("flush");

            RecordedRequest {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(body).expect("utf8 body"),
            }
        });

        Self {
            url: format!("http://{addr}{path}"),
            handle,
        }
    }

    /// Wait for the request to be served and return what was received.
    pub fn finish(self) -> RecordedRequest {
        self.handle.join().expect("server thread")
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        _ => "Unknown",
    }
}

/// Path of the bundled demo model.
pub fn demo_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/demo_model.json")
}
