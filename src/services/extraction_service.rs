//! 联系人识别服务 - 业务能力层
//!
//! 只负责"从一张图片里识别出一个联系人"，不关心批次和并发
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 调用兼容 OpenAI 的多模态接口
//! - 图片以 base64 data URL 内嵌在请求中
//! - 通过 `json_schema` 返回格式约束回复结构

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
        ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ExtractionError, ParseError};
use crate::models::{ExtractedContact, ImageFile};
use crate::services::prompt::{build_extraction_prompt, contact_schema, CONTACT_SCHEMA_NAME};

/// 单次回复的 token 上限
const MAX_REPLY_TOKENS: u32 = 300;

/// 联系人识别能力
///
/// 编排层只依赖这个 trait，测试时可以换成桩实现
#[async_trait]
pub trait ContactExtractor: Send + Sync {
    /// 识别一张图片
    ///
    /// # 返回
    /// - `Ok(Some(contact))`：识别成功，未识别的字段为空字符串
    /// - `Ok(None)`：服务拒绝回答
    /// - `Err(_)`：网络、服务或解析失败
    async fn extract(&self, image: &ImageFile) -> Result<Option<ExtractedContact>, ExtractionError>;
}

/// 基于 OpenAI 兼容接口的识别服务
pub struct OpenAiExtractor {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl OpenAiExtractor {
    /// 创建新的识别服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 构建识别请求：一段文字说明 + 一张图片 + 返回结构约束
    fn build_request(
        &self,
        image: &ImageFile,
    ) -> Result<CreateChatCompletionRequest, ExtractionError> {
        let content_parts = vec![
            ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText {
                    text: build_extraction_prompt(),
                },
            ),
            ChatCompletionRequestUserMessageContentPart::ImageUrl(
                ChatCompletionRequestMessageContentPartImage {
                    image_url: ImageUrl {
                        url: encode_data_url(image),
                        detail: Some(ImageDetail::Auto),
                    },
                },
            ),
        ];

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
            .build()
            .map_err(|source| ExtractionError::RequestBuild { source })?;

        CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: CONTACT_SCHEMA_NAME.to_string(),
                    schema: Some(contact_schema()),
                    strict: Some(true),
                },
            })
            .max_tokens(MAX_REPLY_TOKENS)
            .build()
            .map_err(|source| ExtractionError::RequestBuild { source })
    }
}

#[async_trait]
impl ContactExtractor for OpenAiExtractor {
    async fn extract(&self, image: &ImageFile) -> Result<Option<ExtractedContact>, ExtractionError> {
        debug!(
            "识别图片 {} ({}, {} 字节)，模型: {}",
            image.name(),
            image.mime_type(),
            image.data().len(),
            self.model_name
        );

        let request = self.build_request(image)?;

        let response = self.client.chat().create(request).await.map_err(|source| {
            warn!("推理服务调用失败 ({}): {}", image.name(), source);
            ExtractionError::Service {
                model: self.model_name.clone(),
                source,
            }
        })?;

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| ExtractionError::EmptyReply {
                model: self.model_name.clone(),
            })?;

        if let Some(refusal) = message.refusal.filter(|r| !r.trim().is_empty()) {
            debug!("模型拒绝识别 {}: {}", image.name(), refusal);
            return Ok(None);
        }

        let content = message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ExtractionError::EmptyReply {
                model: self.model_name.clone(),
            })?;

        Ok(Some(parse_reply(&content)?))
    }
}

/// 回复结构，缺失的字段按空字符串处理
#[derive(Debug, Deserialize)]
struct ContactReply {
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    source: String,
}

/// 解析推理服务的 JSON 回复
///
/// 回复必须是 JSON 对象；字段类型不对（例如 `null` 或数字）视为解析失败。
/// 字段按原样保留，不做裁剪
pub fn parse_reply(content: &str) -> Result<ExtractedContact, ParseError> {
    let parse_error = |source| ParseError {
        reply: content.to_string(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(content.trim()).map_err(parse_error)?;

    // 派生的 Deserialize 也接受数组形式的结构体，这里只认对象
    if !value.is_object() {
        return Err(parse_error(serde::de::Error::custom(format!(
            "回复不是 JSON 对象: {}",
            json_kind(&value)
        ))));
    }

    let reply: ContactReply = serde_json::from_value(value).map_err(parse_error)?;

    Ok(ExtractedContact::new(reply.name, reply.phone, reply.source))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// 把图片编码成 `data:<mime>;base64,...` 形式
pub fn encode_data_url(image: &ImageFile) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type(),
        BASE64_STANDARD.encode(image.data())
    )
}
