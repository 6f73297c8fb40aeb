//! 识别请求的提示词和返回结构

use serde_json::{json, Value as JsonValue};

/// 卡片上可勾选的渠道
///
/// 只写进提示词，不对返回值做校验
pub const SOURCE_CHANNELS: &[&str] = &[
    "Passando por aqui",
    "Facebook",
    "TV",
    "Youtube",
    "Um amigo me falou",
    "Rádio",
    "Cartaz no ônibus",
    "Instagram",
    "Carro de som",
];

/// 返回结构的名称
pub const CONTACT_SCHEMA_NAME: &str = "contact";

/// 构建用户消息
pub fn build_extraction_prompt() -> String {
    let channels = SOURCE_CHANNELS
        .iter()
        .map(|c| format!("- \"{}\"", c))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Extraia o nome, número de telefone e como a pessoa conheceu desta anotação manuscrita.

Para o nome: extraia apenas o primeiro nome e último sobrenome (ex: "João Silva").

Para o campo "source", identifique qual checkbox está marcado com X entre as opções:
{}

Se não conseguir encontrar claramente alguma informação, deixe o campo vazio."#,
        channels
    )
}

/// 联系人的 JSON Schema（三个字段都必填，值可以为空字符串）
pub fn contact_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "Nome e sobrenome da pessoa extraído da imagem (apenas primeiro nome e último sobrenome)"
            },
            "phone": {
                "type": "string",
                "description": "Número de telefone extraído da imagem"
            },
            "source": {
                "type": "string",
                "description": "Como conheceu a pessoa/empresa - identifique qual checkbox está marcado com X"
            }
        },
        "required": ["name", "phone", "source"],
        "additionalProperties": false
    })
}
