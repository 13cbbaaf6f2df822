use clap::Parser;
use ethrex_height_probe::{
    check::BlockHeightCheck, collector::RpcCollector, config::Options,
    detector::StalenessDetector, server,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, filter::Directive};

#[tokio::main]
async fn main() {
    let options = Options::parse();
    init_tracing(&options);

    if let Err(error) = run(options).await {
        error!(error = %error, "height-probe exited with error");
        std::process::exit(1);
    }
}

fn init_tracing(options: &Options) {
    let log_filter = EnvFilter::builder()
        .with_default_directive(Directive::from(options.log_level))
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(log_filter).init();
}

async fn run(options: Options) -> Result<(), String> {
    let collector = RpcCollector::new(options.rpc_url.clone(), options.rpc_timeout())
        .map_err(|error| error.to_string())?;
    let detector = StalenessDetector::new(options.critical);
    let check = Arc::new(BlockHeightCheck::new(collector, detector));

    info!(
        rpc_url = %options.rpc_url,
        critical = options.critical,
        "height-probe started"
    );

    server::serve(check, options.addr, options.port)
        .await
        .map_err(|error| error.to_string())
}
