use anyhow::{Context, Result};
use clap::Parser;
use signup_card_reader::utils::logging;
use signup_card_reader::{App, Config, RunOptions};
use std::path::PathBuf;

/// 从报名卡片照片中识别联系人并导出 CSV
#[derive(Debug, Parser)]
#[command(name = "signup_card_reader", version, about)]
struct Cli {
    /// 图片文件或文件夹，每个路径作为一批处理
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// CSV 导出目录（默认读取 EXPORT_DIR）
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// 不导出 CSV，只打印表格
    #[arg(long)]
    no_export: bool,

    /// 显示详细日志
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env 文件是可选的
    let _ = dotenvy::dotenv();

    // 加载配置
    let config = Config::from_env().context("加载配置失败")?;

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    let options = RunOptions {
        export_dir: cli.output_dir,
        skip_export: cli.no_export,
    };

    // 初始化并运行应用
    App::initialize(config).run(&cli.paths, &options).await?;

    Ok(())
}
