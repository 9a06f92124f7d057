//! Integration tests: services and router over in-memory stores

mod router;
mod live_server;
