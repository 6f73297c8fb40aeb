/// 批次进度
///
/// 只由编排层修改。一次批处理内 `processed` 单调不减：
/// 开始时为 `(0, total, true)`，结束时为 `(total, total, false)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// 已处理的图片数
    pub processed: usize,
    /// 本批文件总数（包含被过滤掉的非图片文件）
    pub total: usize,
    /// 批处理是否仍在进行
    pub in_progress: bool,
}

impl BatchProgress {
    pub fn started(total: usize) -> Self {
        Self {
            processed: 0,
            total,
            in_progress: true,
        }
    }

    pub fn advanced(processed: usize, total: usize) -> Self {
        Self {
            processed,
            total,
            in_progress: true,
        }
    }

    pub fn finished(total: usize) -> Self {
        Self {
            processed: total,
            total,
            in_progress: false,
        }
    }

    /// 完成百分比，`total` 为 0 时视为 100%
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed as f64 / self.total as f64 * 100.0
    }
}
