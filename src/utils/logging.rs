//! 日志工具模块
//!
//! 提供日志初始化以及格式化输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::BatchProgress;
use crate::orchestrator::batch_uploader::BatchStats;

/// 初始化 tracing 订阅器
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(model: &str, batches: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 报名卡片识别");
    info!("🤖 模型: {}", model);
    info!("📦 待处理批次: {}", batches);
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `source`: 批次来源（命令行路径）
pub fn log_batch_start(batch_num: usize, total_batches: usize, source: &str) {
    info!("{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批: {}", batch_num, total_batches, source);
    info!("{}", "=".repeat(60));
}

/// 记录组开始信息
pub fn log_group_start(
    group_num: usize,
    total_groups: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!(
        "🔍 第 {}/{} 组: 图片 {}-{} / 共 {} 张",
        group_num, total_groups, start, end, total
    );
}

/// 记录组完成信息
pub fn log_group_complete(group_num: usize, contacts: usize, images: usize) {
    info!("✓ 第 {} 组完成: 识别出 {}/{}", group_num, contacts, images);
}

/// 记录进度
pub fn log_progress(progress: &BatchProgress) {
    if progress.in_progress {
        info!(
            "⏳ {} de {} concluídas ({:.0}%)",
            progress.processed,
            progress.total,
            progress.percent()
        );
    } else {
        info!("🏁 {} de {} concluídas", progress.processed, progress.total);
    }
}

/// 记录一批的统计
pub fn log_batch_stats(stats: &BatchStats) {
    info!("{}", "─".repeat(60));
    info!(
        "📊 本批统计: 文件 {} | 图片 {} | 联系人 {} | 无信息 {} | 失败 {}",
        stats.total, stats.images, stats.contacts, stats.discarded, stats.failed
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `contacts`: 累积的联系人数
/// - `export_path`: 导出文件路径（未导出时为 `None`）
pub fn print_final_stats(contacts: usize, export_path: Option<&str>) {
    info!("{}", "=".repeat(60));
    info!("📊 全部处理完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 联系人: {}", contacts);
    match export_path {
        Some(path) => info!("💾 CSV 已保存至: {}", path),
        None => info!("💡 未导出 CSV"),
    }
    info!("{}", "=".repeat(60));
}
