use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;

use crate::config::ScoutConfig;
use crate::tools::GitScoutTools;

pub async fn run_stdio_server(config: &ScoutConfig) -> Result<()> {
    let service = GitScoutTools::new(config)?;

    let server = service.serve(stdio()).await?;

    server.waiting().await?;
    Ok(())
}
