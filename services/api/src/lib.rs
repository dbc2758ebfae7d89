mod cli;
mod infra;
mod progress;
mod routes;
mod server;

use case_flow::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
