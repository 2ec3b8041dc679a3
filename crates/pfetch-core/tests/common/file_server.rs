//! Minimal HTTP/1.1 server for fetch integration tests.
//!
//! Serves one static body on any GET path. Can fail the first N requests
//! with 503 and counts how many GETs it saw.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, Default)]
pub struct FileServerOptions {
    /// Answer this many initial requests with 503 Service Unavailable.
    pub fail_first: usize,
    /// Answer every request with 404.
    pub not_found: bool,
}

pub struct FileServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl FileServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn start(body: Vec<u8>) -> FileServer {
    start_with_options(body, FileServerOptions::default())
}

/// Starts a server thread serving `body`. The URL points at `/traceconv`.
pub fn start_with_options(body: Vec<u8>, opts: FileServerOptions) -> FileServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let n = hits_srv.fetch_add(1, Ordering::SeqCst);
            thread::spawn(move || handle(stream, &body, n, opts));
        }
    });
    FileServer {
        url: format!("http://127.0.0.1:{}/traceconv", port),
        hits,
    }
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], index: usize, opts: FileServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    if opts.not_found {
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    if index < opts.fail_first {
        let _ = stream.write_all(
            b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
