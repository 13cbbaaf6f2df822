use crate::{
    collector::{DEFAULT_RPC_TIMEOUT, DEFAULT_RPC_URL},
    detector::DEFAULT_CRITICAL_THRESHOLD,
};
use clap::Parser;
use std::{net::IpAddr, time::Duration};
use tracing::Level;

pub const DEFAULT_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 10001;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ethrex-height-probe",
    author = "Lambdaclass",
    about = "Block height stall probe for Ethereum JSON-RPC nodes"
)]
pub struct Options {
    #[arg(
        long = "addr",
        value_name = "ADDRESS",
        default_value = DEFAULT_ADDR,
        help = "Listening address",
        help_heading = "Plugin options",
        env = "HEIGHT_PROBE_ADDR"
    )]
    pub addr: IpAddr,
    #[arg(
        long = "port",
        value_name = "PORT",
        default_value_t = DEFAULT_PORT,
        help = "Listening port",
        help_heading = "Plugin options",
        env = "HEIGHT_PROBE_PORT"
    )]
    pub port: u16,
    #[arg(
        long = "critical",
        value_name = "COUNT",
        default_value_t = DEFAULT_CRITICAL_THRESHOLD,
        help = "Block height stuck count to raise critical level of alert",
        help_heading = "Check options",
        env = "HEIGHT_PROBE_CRITICAL"
    )]
    pub critical: u32,
    #[arg(
        long = "rpc-url",
        value_name = "URL",
        default_value = DEFAULT_RPC_URL,
        help = "JSON-RPC endpoint of the node to watch",
        help_heading = "Check options",
        env = "HEIGHT_PROBE_RPC_URL"
    )]
    pub rpc_url: String,
    #[arg(
        long = "rpc-timeout-ms",
        value_name = "MILLISECONDS",
        default_value_t = default_rpc_timeout_ms(),
        help = "Timeout for a single eth_blockNumber call",
        help_heading = "Check options",
        env = "HEIGHT_PROBE_RPC_TIMEOUT_MS"
    )]
    pub rpc_timeout_ms: u64,
    #[arg(
        long = "log.level",
        default_value_t = Level::INFO,
        value_name = "LOG_LEVEL",
        help = "The verbosity level used for logs.",
        long_help = "Possible values: info, debug, trace, warn, error",
        help_heading = "Plugin options",
        env = "HEIGHT_PROBE_LOG_LEVEL"
    )]
    pub log_level: Level,
}

impl Options {
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }
}

fn default_rpc_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_RPC_TIMEOUT.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn defaults_match_plugin_conventions() {
        let Ok(options) = Options::try_parse_from(["ethrex-height-probe"]) else {
            unreachable!("default options must parse");
        };

        assert_eq!(options.addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(options.port, 10001);
        assert_eq!(options.critical, 3);
        assert_eq!(options.rpc_url, "http://localhost:8545");
        assert_eq!(options.rpc_timeout(), Duration::from_secs(10));
        assert_eq!(options.log_level, Level::INFO);
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = Options::try_parse_from([
            "ethrex-height-probe",
            "--addr",
            "0.0.0.0",
            "--port",
            "9000",
            "--critical",
            "5",
            "--rpc-url",
            "http://node:8545",
            "--rpc-timeout-ms",
            "250",
            "--log.level",
            "debug",
        ]);
        let Ok(options) = parsed else {
            unreachable!("explicit flags must parse");
        };

        assert_eq!(options.addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(options.port, 9000);
        assert_eq!(options.critical, 5);
        assert_eq!(options.rpc_url, "http://node:8545");
        assert_eq!(options.rpc_timeout(), Duration::from_millis(250));
        assert_eq!(options.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_negative_threshold() {
        assert!(Options::try_parse_from(["ethrex-height-probe", "--critical", "-1"]).is_err());
    }
}
