//! 集成测试共用的桩实现

#![allow(dead_code)]

use async_trait::async_trait;
use signup_card_reader::{ContactExtractor, ExtractedContact, ExtractionError, ImageFile, Pacer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 单张图片的预设行为
#[derive(Clone)]
pub enum Behavior {
    Contact(ExtractedContact),
    Nothing,
    Fail,
    Panic,
    /// 等待一段时间后返回联系人
    Delayed(Duration, ExtractedContact),
}

/// 按文件名返回预设结果的识别服务
///
/// 未登记的文件名返回以文件名为姓名的联系人
#[derive(Default)]
pub struct ScriptedExtractor {
    behaviors: HashMap<String, Behavior>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, name: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(name.to_string(), behavior);
        self
    }

    /// 被调用过的文件名（按调用顺序）
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// 同时进行中的最大调用数
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactExtractor for ScriptedExtractor {
    async fn extract(&self, image: &ImageFile) -> Result<Option<ExtractedContact>, ExtractionError> {
        self.calls.lock().unwrap().push(image.name().to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let behavior = self
            .behaviors
            .get(image.name())
            .cloned()
            .unwrap_or_else(|| Behavior::Contact(contact(image.name())));

        // 让同组的其他任务有机会开始
        tokio::time::sleep(Duration::from_millis(5)).await;

        let outcome = match behavior {
            Behavior::Contact(c) => Ok(Some(c)),
            Behavior::Nothing => Ok(None),
            Behavior::Fail => Err(ExtractionError::EmptyReply {
                model: "stub".to_string(),
            }),
            Behavior::Panic => {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                panic!("识别桩故意 panic: {}", image.name());
            }
            Behavior::Delayed(delay, c) => {
                tokio::time::sleep(delay).await;
                Ok(Some(c))
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

/// 只计数、不等待的节流
#[derive(Default)]
pub struct CountingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl CountingPacer {
    pub fn count(&self) -> usize {
        self.pauses.lock().unwrap().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}

pub fn contact(name: &str) -> ExtractedContact {
    ExtractedContact::new(name, "99999999", "Facebook")
}

pub fn image(name: &str) -> ImageFile {
    ImageFile::new(name, "image/jpeg", vec![0xFFu8, 0xD8])
}

pub fn document(name: &str) -> ImageFile {
    ImageFile::new(name, "application/pdf", vec![0x25u8])
}

pub fn images(count: usize) -> Vec<ImageFile> {
    (1..=count).map(|i| image(&format!("card{}.jpg", i))).collect()
}
