use crate::error::ConfigError;

/// API 密钥的环境变量名（唯一必填项）
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- 推理服务配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// CSV 导出目录
    pub export_dir: String,
    /// 8-9 位电话号码补上的区号
    pub phone_area_code: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o".to_string(),
            export_dir: ".".to_string(),
            phone_area_code: "32".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，除 API 密钥外都有默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();

        let llm_api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::EnvVarNotFound {
                var_name: API_KEY_VAR.to_string(),
            })?;

        let verbose_logging = match lookup("VERBOSE_LOGGING") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::EnvVarParseFailed {
                    var_name: "VERBOSE_LOGGING".to_string(),
                    value,
                    expected_type: "bool".to_string(),
                })?,
            None => default.verbose_logging,
        };

        Ok(Self {
            llm_api_key,
            llm_api_base_url: lookup("OPENAI_API_BASE").unwrap_or(default.llm_api_base_url),
            llm_model_name: lookup("OPENAI_MODEL").unwrap_or(default.llm_model_name),
            export_dir: lookup("EXPORT_DIR").unwrap_or(default.export_dir),
            phone_area_code: lookup("PHONE_AREA_CODE").unwrap_or(default.phone_area_code),
            verbose_logging,
        })
    }
}
