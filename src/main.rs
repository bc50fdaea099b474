use anyhow::Result;
use clap::Parser;

use leadlinker::config::{Args, StaticConfig, get_config, init_config};
use leadlinker::runtime::modes::run_server;
use leadlinker::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    // .env 优先于配置加载
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if args.generate_config {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    init_config(args.config.as_deref());
    let config = get_config();

    // guard 必须存活到进程结束
    let _log_guard = init_logging(&config.logging)?;
    tracing::info!(
        "leadlinker {} starting (config: {})",
        env!("CARGO_PKG_VERSION"),
        args.config.as_deref().unwrap_or("config.toml")
    );

    run_server().await
}
