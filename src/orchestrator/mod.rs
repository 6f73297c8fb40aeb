//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用会话
//! - 把每个命令行路径加载成一批文件
//! - 持有会话内累积的 `ContactBook`
//! - 展示表格、导出 CSV、输出最终统计
//!
//! ### `batch_uploader` - 批量上传编排器
//! - 过滤非图片、按固定大小分组
//! - 组内并发调用识别服务，组间节流
//! - 逐组回调结果，汇报进度
//!
//! ## 层次关系
//!
//! ```text
//! app (处理 Vec<路径>)
//!     ↓
//! batch_uploader (处理 Vec<ImageFile>)
//!     ↓
//! services::ContactExtractor (处理单张图片)
//! ```

pub mod app;
pub mod batch_uploader;

// 重新导出主要类型
pub use app::{App, RunOptions};
pub use batch_uploader::{BatchStats, BatchUploader, Pacer, TokioPacer, UploadSettings};
