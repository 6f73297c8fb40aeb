//! 待识别的图片文件

use std::fmt;
use std::sync::Arc;

/// 一张待上传的图片
///
/// 内容用 `Arc<[u8]>` 共享，克隆只增加引用计数，
/// 同一组内的并发任务各自持有一份句柄。
#[derive(Clone)]
pub struct ImageFile {
    name: String,
    mime_type: String,
    data: Arc<[u8]>,
}

impl ImageFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// 显示名称（一般是文件名）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 声明的 MIME 类型
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// 声明类型是否为图片（`image/*`）
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}
