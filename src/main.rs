use anyhow::Result;
use clap::Parser;
use paper_agent::orchestrator::error_document;
use paper_agent::utils::logging;
use paper_agent::{Agent, Config};
use std::path::PathBuf;

/// 按指令文件执行的论文智能体
#[derive(Debug, Parser)]
#[command(name = "paper-agent", version, about = "AI Agent that follows instructions")]
struct Cli {
    /// 指令文件路径
    instructions_file: PathBuf,

    /// TOML 配置文件（可选，环境变量优先）
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", error_document(&e.to_string()));
            return Ok(());
        }
    };

    // 初始化日志
    if let Err(e) = logging::init(&config) {
        eprintln!("日志初始化失败: {:#}", e);
    }

    // 错误在结果中报告，退出码始终为 0
    let output = match Agent::from_config(&config) {
        Ok(agent) => agent.run(&cli.instructions_file).await,
        Err(e) => error_document(&e.to_string()),
    };
    println!("{}", output);

    Ok(())
}
