use async_openai::error::OpenAIError;
use thiserror::Error;

use crate::models::ExtractedContact;

/// 单张图片识别失败
///
/// 只在单张图片的范围内处理，不会越过编排层向上传播
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 构建请求失败
    #[error("构建识别请求失败: {source}")]
    RequestBuild {
        #[source]
        source: OpenAIError,
    },

    /// 网络或推理服务失败
    #[error("推理服务调用失败 (模型: {model}): {source}")]
    Service {
        model: String,
        #[source]
        source: OpenAIError,
    },

    /// 返回结果或内容为空
    #[error("推理服务返回内容为空 (模型: {model})")]
    EmptyReply { model: String },

    /// 返回内容不符合联系人结构
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// 推理服务的回复无法解析为联系人结构
#[derive(Debug, Error)]
#[error("无法解析识别结果 (响应: {reply}): {source}")]
pub struct ParseError {
    pub reply: String,
    #[source]
    pub source: serde_json::Error,
}

/// 一张图片没有产出联系人的原因
///
/// `NoInformation` 不是真正的错误：回复合法，但姓名和电话都为空
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("识别失败: {0}")]
    Failed(#[from] ExtractionError),

    #[error("识别任务异常终止: {0}")]
    TaskAborted(String),

    #[error("没有识别到可用信息")]
    NoInformation,
}

impl SkipReason {
    /// 把一次识别结果归类为可用联系人或跳过原因
    pub fn classify(
        outcome: Result<Option<ExtractedContact>, ExtractionError>,
    ) -> Result<ExtractedContact, SkipReason> {
        match outcome {
            Ok(Some(contact)) if contact.is_usable() => Ok(contact),
            Ok(_) => Err(SkipReason::NoInformation),
            Err(e) => Err(SkipReason::Failed(e)),
        }
    }

    /// 是否属于失败（区别于"没有信息"）
    pub fn is_failure(&self) -> bool {
        !matches!(self, SkipReason::NoInformation)
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
}
