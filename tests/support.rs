use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server answering 200 with a small JSON body.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server() -> Result<(String, ServerHandle), String> {
    spawn_server(respond_ok)
}

/// Spawn a server that accepts connections but never responds, so every
/// attempt runs into the per-request timeout.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_stalled_server() -> Result<(String, ServerHandle), String> {
    spawn_server(stall_client)
}

/// Like `spawn_http_server`, but skips (returns `None`) when the sandbox
/// forbids binding a local socket.
///
/// # Errors
///
/// Returns an error for failures other than being unable to bind.
pub fn spawn_http_server_or_skip() -> Result<Option<(String, ServerHandle)>, String> {
    or_skip(spawn_http_server())
}

/// Like `spawn_stalled_server`, but skips (returns `None`) when the sandbox
/// forbids binding a local socket.
///
/// # Errors
///
/// Returns an error for failures other than being unable to bind.
pub fn spawn_stalled_server_or_skip() -> Result<Option<(String, ServerHandle)>, String> {
    or_skip(spawn_stalled_server())
}

fn or_skip(
    result: Result<(String, ServerHandle), String>,
) -> Result<Option<(String, ServerHandle)>, String> {
    match result {
        Ok(server) => Ok(Some(server)),
        Err(message) if message.contains("bind test server failed") => Ok(None),
        Err(message) => Err(message),
    }
}

fn spawn_server(
    handle_client: fn(TcpStream),
) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn respond_ok(mut stream: TcpStream) {
    let mut buffer = [0u8; 1024];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    let response = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 11\r\nConnection: close\r\n\r\n{\"ok\":true}";
    if stream.write_all(response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn stall_client(mut stream: TcpStream) {
    let mut buffer = [0u8; 1024];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    thread::sleep(Duration::from_secs(10));
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `apiprobe` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_apiprobe<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_apiprobe_with_env(args, &[])
}

/// Run the `apiprobe` binary with extra environment variables.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_apiprobe_with_env<I, S>(args: I, envs: &[(&str, &str)]) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = apiprobe_bin()?;
    let mut command = Command::new(bin);
    command.args(args).env("RUST_LOG", "error");
    for (key, value) in envs {
        command.env(key, value);
    }
    command
        .output()
        .map_err(|err| format!("run apiprobe failed: {}", err))
}

fn apiprobe_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_apiprobe").map_or_else(
        || Err("CARGO_BIN_EXE_apiprobe missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
