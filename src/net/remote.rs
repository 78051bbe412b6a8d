//! src/net/remote.rs
//!
//! Tiny line-based TCP control server.
//!
//! Connection threads never touch chart state: each parsed control is sent
//! over a channel and applied by the UI loop between frames.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc::Sender;
use std::thread;

use crate::control::{Command, Control, parse_command};

/// Bind `addr` and serve clients until the process exits.
pub fn remote_server(addr: &str, controls: Sender<Control>) {
    let listener = match TcpListener::bind(addr) {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error = %e, "remote control bind failed");
            return;
        }
    };
    tracing::info!(%addr, "remote control listening");
    serve(listener, controls);
}

/// Accept loop; a handler thread per client.
pub fn serve(listener: TcpListener, controls: Sender<Control>) {
    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let tx = controls.clone();
                thread::spawn(move || handle_remote_client(s, tx));
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote accept failed");
            }
        }
    }
}

/// Handle a single client: one command per line, one reply line per command.
///
/// Replies are `OK`, `OK bye` for `quit`, or `ERR <reason>`. See
/// `control::parse_command` for the command set.
pub fn handle_remote_client(mut s: TcpStream, controls: Sender<Control>) {
    let peer = s
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<peer?>".into());
    let reader = match s.try_clone() {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(%peer, error = %e, "remote client setup failed");
            return;
        }
    };
    tracing::debug!(%peer, "remote client connected");
    let mut rdr = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        match rdr.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        let (reply, done) = match parse_command(raw) {
            Ok(Command::Quit) => ("OK bye\n".to_string(), true),
            Ok(Command::Apply(control)) => match controls.send(control) {
                Ok(()) => ("OK\n".to_string(), false),
                Err(_) => ("ERR closed\n".to_string(), true),
            },
            Err(e) => (format!("ERR {}\n", e), false),
        };
        if s.write_all(reply.as_bytes()).is_err() || done {
            break;
        }
    }

    tracing::debug!(%peer, "remote client disconnected");
    let _ = s.shutdown(Shutdown::Both);
}
