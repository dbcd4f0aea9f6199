/*
 * Responsibility
 * - tokio runtime entry point
 * - delegates to app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    access_gate::app::run().await
}
