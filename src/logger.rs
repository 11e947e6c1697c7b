//! Logger module
//!
//! Logging helpers for the stub server. Info and access lines go to stdout,
//! warnings and errors to stderr.

use crate::config::Config;
use crate::mocks::MockStore;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config, mocks: &MockStore) {
    println!("======================================");
    println!("gamestub started successfully");
    println!("Listening on: http://{addr}");
    println!("Content root: {}", config.root);
    println!("Mock responses loaded: {}/4", mocks.loaded_count());
    if let Some(workers) = config.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &hyper::Method, uri: &hyper::Uri) {
    println!("[Request] {method} {uri}");
}

pub fn log_response(status: u16) {
    println!("[Response] {status}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
