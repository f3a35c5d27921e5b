// Shared fake daemon for integration tests.
//
// Binds a Unix socket in a temp directory, accepts exactly one connection,
// reads one length-prefixed request and then follows a script.

#![allow(
    dead_code,
    reason = "each test binary uses a different subset of these helpers"
)]

use std::io::{Read, Write};
use std::os::unix::net::UnixListener;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

/// What the fake daemon does after reading the request.
pub enum Script {
    /// Reply with `body` as one frame, then a zero terminator.
    Reply(&'static str),
    /// Reply with `body` as one frame and close without a terminator.
    ReplyNoTerminator(&'static str),
    /// Write raw bytes as-is.
    Raw(Vec<u8>),
    /// Close without replying.
    HangUp,
    /// Keep the connection open without replying for a while.
    Stall(Duration),
}

pub struct FakeDaemon {
    _dir: TempDir,
    pub socket_path: PathBuf,
    handle: thread::JoinHandle<Vec<u8>>,
}

impl FakeDaemon {
    pub fn start(script: Script) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("speak-test.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);

            match script {
                Script::Reply(body) => {
                    let _ = stream.write_all(&frame(body.as_bytes()));
                    let _ = stream.write_all(&0u32.to_be_bytes());
                }
                Script::ReplyNoTerminator(body) => {
                    let _ = stream.write_all(&frame(body.as_bytes()));
                }
                Script::Raw(bytes) => {
                    let _ = stream.write_all(&bytes);
                }
                Script::HangUp => {}
                Script::Stall(duration) => thread::sleep(duration),
            }
            request
        });

        Self {
            _dir: dir,
            socket_path,
            handle,
        }
    }

    /// Wait for the daemon thread and return the request payload it read.
    pub fn request(self) -> Vec<u8> {
        self.handle.join().unwrap()
    }

    /// The request payload parsed as JSON.
    pub fn request_json(self) -> serde_json::Value {
        serde_json::from_slice(&self.request()).unwrap()
    }
}

/// A path inside a fresh temp dir with nothing listening on it.
pub fn dead_socket() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nobody-home.sock");
    (dir, path)
}

pub fn frame(body: &[u8]) -> Vec<u8> {
    let mut out = (body.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(body);
    out
}

fn read_request(stream: &mut impl Read) -> Vec<u8> {
    let mut header = [0u8; 4];
    stream.read_exact(&mut header).unwrap();
    let mut payload = vec![0u8; u32::from_be_bytes(header) as usize];
    stream.read_exact(&mut payload).unwrap();
    payload
}
