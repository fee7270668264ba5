//! Minimal threaded HTTP/1.1 server for exercising the remote handle.
//!
//! Serves one static body. HEAD answers with Content-Length and
//! Accept-Ranges; GET with a Range header answers 206 with the requested
//! slice. Options let a test misbehave on purpose: refuse HEAD, hide range
//! support, fail ranged GETs, or pad the body past the requested interval.
//! Every response carries `Connection: close` so the blocking client opens
//! a fresh connection per request.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// Status for HEAD requests; anything outside 2xx makes the probe fail.
    pub head_status: u16,
    /// Advertise `Accept-Ranges: bytes` on HEAD responses.
    pub advertise_ranges: bool,
    /// Status for ranged GET requests; 206 is the well-behaved answer.
    pub get_status: u16,
    /// Bytes of garbage appended after the requested slice, to simulate a
    /// server overshooting the range.
    pub pad_body: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            head_status: 200,
            advertise_ranges: true,
            get_status: 206,
            pad_body: 0,
        }
    }
}

/// Serve `body` on a background thread and return the URL to fetch it from.
/// The server lives until the test process exits.
pub fn serve(body: Vec<u8>) -> String {
    serve_with(body, ServerOptions::default())
}

pub fn serve_with(body: Vec<u8>, opts: ServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}/archive.zip", port)
}

fn handle(mut stream: TcpStream, body: &[u8], opts: ServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let method = request.split_whitespace().next().unwrap_or("");
    let total = body.len();

    if method.eq_ignore_ascii_case("HEAD") {
        if !(200..300).contains(&opts.head_status) {
            let _ = write!(
                stream,
                "HTTP/1.1 {} Probe Refused\r\nConnection: close\r\n\r\n",
                opts.head_status
            );
            return;
        }
        let accept_ranges = if opts.advertise_ranges {
            "Accept-Ranges: bytes\r\n"
        } else {
            ""
        };
        let _ = write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
            total, accept_ranges
        );
        return;
    }

    if method.eq_ignore_ascii_case("GET") {
        if opts.get_status != 206 {
            let _ = write!(
                stream,
                "HTTP/1.1 {} Injected Failure\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                opts.get_status
            );
            return;
        }
        let Some((start, end_incl)) = parse_range(request) else {
            let _ = write!(
                stream,
                "HTTP/1.1 416 Range Not Satisfiable\r\nConnection: close\r\n\r\n"
            );
            return;
        };
        let start = start.min(total);
        let end_excl = (end_incl + 1).min(total);
        let slice = body.get(start..end_excl).unwrap_or(&[]);

        let mut payload = slice.to_vec();
        payload.extend(std::iter::repeat(0xAAu8).take(opts.pad_body));

        let _ = write!(
            stream,
            "HTTP/1.1 206 Partial Content\r\nContent-Length: {}\r\nContent-Range: bytes {}-{}/{}\r\nConnection: close\r\n\r\n",
            payload.len(),
            start,
            end_excl.saturating_sub(1),
            total
        );
        let _ = stream.write_all(&payload);
    }
}

/// Extract `(start, inclusive_end)` from a `Range: bytes=a-b` header.
fn parse_range(request: &str) -> Option<(usize, usize)> {
    let line = request
        .lines()
        .find(|l| l.to_ascii_lowercase().starts_with("range:"))?;
    let value = line.split('=').nth(1)?.trim();
    let (start, end) = value.split_once('-')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}
