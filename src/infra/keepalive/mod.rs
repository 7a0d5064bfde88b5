// Keepalive collaborators. Neither feeds into the relay logic.
// - `liveness_server.rs` answers uptime checks on `/`.
// - `self_ping.rs` periodically hits our own public URL so the host keeps us awake.

#[path = "liveness_server.rs"]
pub mod liveness_server;

#[path = "self_ping.rs"]
pub mod self_ping;
