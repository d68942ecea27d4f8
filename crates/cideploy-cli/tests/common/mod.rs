//! One-file HTTP server for driving the `cideploy` binary end to end.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serves `body` at `path` (404 elsewhere) until the test process exits.
/// Returns the full URL of the file.
pub fn serve_file(path: &'static str, body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let requested = request.split_whitespace().nth(1).unwrap_or("/");
            let (status, payload): (&str, &[u8]) = if requested == path {
                ("200 OK", body)
            } else {
                ("404 Not Found", b"not found")
            };
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                payload.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(payload);
        }
    });
    format!("http://127.0.0.1:{}{}", port, path)
}
