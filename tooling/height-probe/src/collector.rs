use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid rpc response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can report a node's latest block number as a hex quantity.
#[async_trait::async_trait]
pub trait BlockNumberSource: Send + Sync {
    async fn block_number_hex(&self) -> Result<String, CollectorError>;
}

#[derive(Debug, Clone)]
pub struct RpcCollector {
    client: Client,
    rpc_url: String,
}

impl RpcCollector {
    pub fn new(rpc_url: String, timeout: Duration) -> Result<Self, CollectorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, rpc_url })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait::async_trait]
impl BlockNumberSource for RpcCollector {
    async fn block_number_hex(&self) -> Result<String, CollectorError> {
        let body = self
            .client
            .post(&self.rpc_url)
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "eth_blockNumber",
                "params": []
            }))
            .send()
            .await?
            .bytes()
            .await?;

        let response = serde_json::from_slice::<BlockNumberResponse>(&body)?;
        Ok(response.result)
    }
}

// `jsonrpc` and `id` are only checked for shape.
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct BlockNumberResponse {
    #[serde(default)]
    jsonrpc: String,
    result: String,
    #[serde(default)]
    id: i64,
}
