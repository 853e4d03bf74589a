use clap::Parser;
use tracing::{debug, info, warn};

use tutorgate::config::Config;

#[derive(Parser)]
#[command(version)]
struct Args {
    /// Set config file path
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let cfg = Config::parse(args.config);
    tutorgate::log::set(format!(
        "tutorgate={},http_log={}",
        cfg.log.level, cfg.log.level
    ));
    warn!("set log level : {}", cfg.log.level);
    debug!("config : {:?}", cfg);
    tutorgate::metrics_register();

    let listener = tokio::net::TcpListener::bind(cfg.http.listen).await.unwrap();
    info!("Server listening on {}", listener.local_addr().unwrap());
    tutorgate::serve(cfg, listener, shutdown()).await;
    info!("Server shutdown");
}

async fn shutdown() {
    let signal = tutorgate::shutdown::wait().await;
    debug!("Received signal: {}", signal);
}
