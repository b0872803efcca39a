use tokio::io::{BufReader, stdin, stdout};
use tracing::info;

use todo_app::client::TodoApiClient;
use todo_app::config::api_url_from_env;
use todo_app::dashboard::Dashboard;
use todo_app::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("todo_app=warn");

    let client = TodoApiClient::new(api_url_from_env())?;
    info!("dashboard talking to {}", client.base_url());

    let mut dashboard = Dashboard::new(client, BufReader::new(stdin()), stdout());
    dashboard.run().await?;

    Ok(())
}
