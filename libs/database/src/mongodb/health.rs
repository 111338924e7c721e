use mongodb::{Client, bson::doc};
use std::time::Instant;

use crate::common::Context;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the server answered the ping
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    /// Round trip time in milliseconds
    pub response_time_ms: u64,
}

/// Ping the server through the `admin` database
///
/// Returns `false` on any failure, including `ctx` finishing first.
pub async fn check_health(ctx: &Context, client: &Client) -> bool {
    check_health_detailed(ctx, client).await.healthy
}

/// Ping the server and report latency and error details
pub async fn check_health_detailed(ctx: &Context, client: &Client) -> HealthStatus {
    let start = Instant::now();

    let outcome = ctx
        .run(client.database("admin").run_command(doc! { "ping": 1 }))
        .await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    let message = match outcome {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(e) => Some(e.to_string()),
    };

    HealthStatus {
        healthy: message.is_none(),
        message,
        response_time_ms,
    }
}
