//! Command-line argument parsing

use clap::Parser;

/// leadlinker 命令行参数
#[derive(Debug, Clone, Parser)]
#[command(name = "leadlinker", version, about)]
pub struct Args {
    /// 配置文件路径（默认 ./config.toml）
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// 输出示例配置并退出
    #[arg(long = "generate-config")]
    pub generate_config: bool,
}
