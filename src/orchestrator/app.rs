//! 应用会话 - 编排层
//!
//! ## 职责
//!
//! 对应一次使用会话：每个命令行路径是一批，结果在会话内累积，
//! 最后展示表格并导出 CSV。
//!
//! ## 设计特点
//!
//! - **结果所有者**：唯一持有 `ContactBook` 的模块
//! - **向下委托**：分组、并发、节流都交给 `BatchUploader`
//! - **批次隔离**：某个路径读取失败只跳过该批

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::Config;
use crate::models::load_batch;
use crate::orchestrator::batch_uploader::BatchUploader;
use crate::services::{ContactBook, ContactExtractor, OpenAiExtractor};
use crate::utils::logging;

/// 运行选项
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// CSV 导出目录，`None` 时使用配置中的目录
    pub export_dir: Option<PathBuf>,
    /// 是否跳过导出
    pub skip_export: bool,
}

/// 应用主结构
pub struct App {
    config: Config,
    uploader: BatchUploader,
    book: ContactBook,
}

impl App {
    /// 初始化应用（使用真实的推理服务）
    pub fn initialize(config: Config) -> Self {
        let extractor = Arc::new(OpenAiExtractor::new(&config));
        Self::with_extractor(config, extractor)
    }

    /// 使用指定的识别服务初始化
    pub fn with_extractor(config: Config, extractor: Arc<dyn ContactExtractor>) -> Self {
        let book = ContactBook::new(config.phone_area_code.clone());
        Self {
            config,
            uploader: BatchUploader::new(extractor),
            book,
        }
    }

    /// 替换编排器（用于调整分组和节流）
    pub fn with_uploader(mut self, uploader: BatchUploader) -> Self {
        self.uploader = uploader;
        self
    }

    /// 运行应用主逻辑
    ///
    /// # 返回
    /// 返回导出的 CSV 路径；跳过导出或没有联系人时为 `None`
    pub async fn run(
        &mut self,
        paths: &[PathBuf],
        options: &RunOptions,
    ) -> Result<Option<PathBuf>> {
        logging::log_startup(&self.config.llm_model_name, paths.len());

        for (index, path) in paths.iter().enumerate() {
            logging::log_batch_start(index + 1, paths.len(), &path.display().to_string());
            if let Err(e) = self.process_path(path).await {
                error!("[批次 {}] ❌ 无法处理 {}: {:#}", index + 1, path.display(), e);
            }
        }

        let table = self.book.render();
        if table.is_empty() {
            warn!("⚠️ 没有识别到任何联系人");
        } else {
            println!("\n{}\n", table);
        }

        let export_path = if options.skip_export || self.book.is_empty() {
            None
        } else {
            let dir = options
                .export_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&self.config.export_dir));
            Some(self.export(&dir).await?)
        };

        logging::print_final_stats(
            self.book.len(),
            export_path.as_ref().map(|p| p.display().to_string()).as_deref(),
        );

        Ok(export_path)
    }

    /// 处理一个路径（一批），结果追加到会话
    pub async fn process_path(&mut self, path: &Path) -> Result<()> {
        let files = load_batch(path).await?;

        let book = &mut self.book;
        self.uploader
            .process_batch(
                files,
                |contacts| book.append(contacts),
                |progress| logging::log_progress(&progress),
            )
            .await;

        Ok(())
    }

    /// 按当前本地时间导出 CSV
    pub async fn export(&self, dir: &Path) -> Result<PathBuf> {
        let now = chrono::Local::now().naive_local();
        self.book.export(dir, &now).await
    }

    pub fn contacts(&self) -> &ContactBook {
        &self.book
    }

    /// 清空会话中的结果
    pub fn clear(&mut self) {
        self.book.clear();
    }
}
