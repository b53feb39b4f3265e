use std::net::SocketAddr;

use anyhow::Result;
use rmcp::transport::sse_server::SseServer;

use crate::config::ScoutConfig;
use crate::tools::GitScoutTools;

pub struct SseServerApp {
    bind_addr: SocketAddr,
    config: ScoutConfig,
}

impl SseServerApp {
    pub fn new(bind_addr: SocketAddr, config: ScoutConfig) -> Self {
        Self { bind_addr, config }
    }

    pub async fn serve(self) -> Result<()> {
        // Every SSE session shares the global scout; building it up front
        // surfaces configuration errors before the listener starts.
        let tools = GitScoutTools::new(&self.config)?;

        let sse_server = SseServer::serve(self.bind_addr).await?;
        let cancellation_token = sse_server.with_service(move || tools.clone());

        tokio::signal::ctrl_c().await?;
        cancellation_token.cancel();

        Ok(())
    }
}
