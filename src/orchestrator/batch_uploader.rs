//! 批量上传编排器 - 编排层
//!
//! ## 职责
//!
//! 接收一批文件，驱动识别服务逐组并发处理，并通过回调汇报结果和进度。
//!
//! ## 处理流程
//!
//! 1. **汇报开始**：`(0, 文件总数, true)`，总数包含非图片文件
//! 2. **过滤**：只保留 `image/*` 类型的文件
//! 3. **分组**：按顺序每 `BATCH_SIZE` 个一组
//! 4. **组内并发**：每个文件一个任务，等待全组结束（join barrier）
//! 5. **即时回调**：本组有可用联系人就立即回调一次，保持文件顺序
//! 6. **推进进度**：`min(组起点 + BATCH_SIZE, 图片数)`
//! 7. **节流**：还有下一组时等待 `DELAY_MS`，最后一组之后不等待
//! 8. **汇报结束**：`(文件总数, 文件总数, false)`
//!
//! ## 失败语义
//!
//! 单张图片失败（包括任务 panic）只记录日志，不影响同组其他图片和后续组。
//! 编排器本身没有失败路径，总会跑完并发出结束进度。

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::SkipReason;
use crate::models::{BatchProgress, ExtractedContact, ImageFile};
use crate::services::ContactExtractor;
use crate::utils::logging;

/// 每组的图片数
pub const BATCH_SIZE: usize = 3;

/// 组间等待时间（毫秒）
pub const DELAY_MS: u64 = 300;

/// 分组和节流参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSettings {
    pub group_size: usize,
    pub pacing_delay: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            group_size: BATCH_SIZE,
            pacing_delay: Duration::from_millis(DELAY_MS),
        }
    }
}

/// 组间节流
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// 基于 `tokio::time::sleep` 的节流
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// 一批的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    /// 文件总数（包含非图片）
    pub total: usize,
    /// 图片数
    pub images: usize,
    /// 识别出的可用联系人
    pub contacts: usize,
    /// 识别失败
    pub failed: usize,
    /// 回复合法但没有可用信息
    pub discarded: usize,
}

/// 单组结果
#[derive(Debug, Default)]
struct GroupResult {
    contacts: Vec<ExtractedContact>,
    failed: usize,
    discarded: usize,
}

/// 批量上传编排器
pub struct BatchUploader {
    extractor: Arc<dyn ContactExtractor>,
    pacer: Arc<dyn Pacer>,
    settings: UploadSettings,
}

impl BatchUploader {
    pub fn new(extractor: Arc<dyn ContactExtractor>) -> Self {
        Self {
            extractor,
            pacer: Arc::new(TokioPacer),
            settings: UploadSettings::default(),
        }
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_settings(mut self, settings: UploadSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> UploadSettings {
        self.settings
    }

    /// 处理一批文件
    ///
    /// # 参数
    /// - `files`: 用户选择的文件（可能混有非图片）
    /// - `on_partial_result`: 每组结束且有可用联系人时调用一次
    /// - `on_progress`: 开始、每组结束、全部结束时调用
    ///
    /// 两个回调都在当前任务中串行调用，不会并发
    pub async fn process_batch<R, P>(
        &self,
        files: Vec<ImageFile>,
        mut on_partial_result: R,
        mut on_progress: P,
    ) where
        R: FnMut(Vec<ExtractedContact>),
        P: FnMut(BatchProgress),
    {
        let total = files.len();
        on_progress(BatchProgress::started(total));

        let images: Vec<ImageFile> = files.into_iter().filter(ImageFile::is_image).collect();
        let group_size = self.settings.group_size.max(1);
        let total_groups = images.len().div_ceil(group_size);

        let mut stats = BatchStats {
            total,
            images: images.len(),
            ..Default::default()
        };

        if images.len() < total {
            debug!("忽略 {} 个非图片文件", total - images.len());
        }

        for (group_index, group) in images.chunks(group_size).enumerate() {
            let group_start = group_index * group_size;
            let group_num = group_index + 1;

            logging::log_group_start(
                group_num,
                total_groups,
                group_start + 1,
                group_start + group.len(),
                images.len(),
            );

            let result = self.process_group(group).await;

            stats.failed += result.failed;
            stats.discarded += result.discarded;
            stats.contacts += result.contacts.len();

            logging::log_group_complete(group_num, result.contacts.len(), group.len());

            if !result.contacts.is_empty() {
                on_partial_result(result.contacts);
            }

            let processed = (group_start + group_size).min(images.len());
            on_progress(BatchProgress::advanced(processed, total));

            if group_num < total_groups {
                self.pacer.pause(self.settings.pacing_delay).await;
            }
        }

        logging::log_batch_stats(&stats);
        on_progress(BatchProgress::finished(total));
    }

    /// 并发处理一组图片，等待全部结束
    ///
    /// 结果按文件顺序收集，与完成先后无关
    async fn process_group(&self, group: &[ImageFile]) -> GroupResult {
        let handles = group.iter().cloned().map(|image| {
            let extractor = Arc::clone(&self.extractor);
            tokio::spawn(async move { extractor.extract(&image).await })
        });

        // join_all 按输入顺序返回
        let outcomes = join_all(handles).await;

        let mut result = GroupResult::default();

        for (image, joined) in group.iter().zip(outcomes) {
            let name = image.name();
            let outcome = match joined {
                Ok(outcome) => SkipReason::classify(outcome),
                Err(e) => Err(SkipReason::TaskAborted(e.to_string())),
            };

            match outcome {
                Ok(contact) => {
                    debug!("✓ {} → {:?}", name, contact);
                    result.contacts.push(contact);
                }
                Err(reason) if reason.is_failure() => {
                    warn!("❌ 处理 {} 出错: {}", name, reason);
                    result.failed += 1;
                }
                Err(reason) => {
                    info!("⏭️ {}: {}", name, reason);
                    result.discarded += 1;
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 按文件名前缀决定结果的桩
    struct NameExtractor;

    #[async_trait]
    impl ContactExtractor for NameExtractor {
        async fn extract(
            &self,
            image: &ImageFile,
        ) -> Result<Option<ExtractedContact>, ExtractionError> {
            match image.name() {
                n if n.starts_with("fail") => Err(ExtractionError::EmptyReply {
                    model: "stub".to_string(),
                }),
                n if n.starts_with("none") => Ok(None),
                n if n.starts_with("blank") => Ok(Some(ExtractedContact::default())),
                n => Ok(Some(ExtractedContact::new(n, "99999999", "TV"))),
            }
        }
    }

    #[derive(Default)]
    struct CountingPacer {
        pauses: AtomicUsize,
    }

    #[async_trait]
    impl Pacer for CountingPacer {
        async fn pause(&self, _delay: Duration) {
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn image(name: &str) -> ImageFile {
        ImageFile::new(name, "image/jpeg", vec![0u8])
    }

    #[test]
    fn test_default_settings() {
        let uploader = BatchUploader::new(Arc::new(NameExtractor));
        assert_eq!(uploader.settings().group_size, 3);
        assert_eq!(uploader.settings().pacing_delay, Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_group_classification() {
        let uploader = BatchUploader::new(Arc::new(NameExtractor));
        let group = vec![image("ana"), image("fail"), image("blank"), image("none")];

        let result = uploader.process_group(&group).await;

        assert_eq!(result.contacts.len(), 1);
        assert_eq!(result.contacts[0].name, "ana");
        assert_eq!(result.failed, 1);
        assert_eq!(result.discarded, 2);
    }

    #[tokio::test]
    async fn test_empty_batch_reports_start_and_finish() {
        let pacer = Arc::new(CountingPacer::default());
        let uploader = BatchUploader::new(Arc::new(NameExtractor)).with_pacer(pacer.clone());
        let mut progress = Vec::new();
        let mut partials = 0;

        uploader
            .process_batch(Vec::new(), |_| partials += 1, |p| progress.push(p))
            .await;

        assert_eq!(
            progress,
            vec![BatchProgress::started(0), BatchProgress::finished(0)]
        );
        assert_eq!(partials, 0);
        assert_eq!(pacer.pauses.load(Ordering::SeqCst), 0);
    }
}
