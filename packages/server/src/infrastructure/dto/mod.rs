//! Data Transfer Objects for the WebSocket and HTTP wire formats.

pub mod conversion;
pub mod http;
pub mod websocket;
