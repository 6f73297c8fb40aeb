//! # Signup Card Reader
//!
//! 从手写报名卡片的照片中识别联系人（姓名、电话、得知渠道），并导出 CSV
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - `ImageFile`、`ExtractedContact`、`BatchProgress`
//! - `models::loaders` - 从文件系统加载一批图片
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单张图片或单个结果集
//! - `ContactExtractor` / `OpenAiExtractor` - 多模态识别能力
//! - `ContactBook` - 结果累积、表格展示、CSV 导出
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_uploader` - 分组并发、组间节流、逐组回调
//! - `orchestrator/app` - 会话：多批累积、展示、导出
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{ConfigError, ExtractionError, ParseError, SkipReason};
pub use models::{BatchProgress, ExtractedContact, ImageFile};
pub use orchestrator::{App, BatchUploader, Pacer, RunOptions, UploadSettings};
pub use services::{ContactBook, ContactExtractor, OpenAiExtractor};
