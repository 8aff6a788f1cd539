//! Style Reference - 风格参考
//!
//! `style_wav` 查询参数有两种含义：
//! - 服务器本地的 `.wav` 参考音频路径
//! - GST token 权重字典，例如 `{"0": 0.3, "5": -0.1}`

use std::collections::BTreeMap;
use std::path::Path;

use super::StyleError;

/// 风格参考
#[derive(Debug, Clone, PartialEq)]
pub enum StyleReference {
    /// 本地参考音频路径（原样保留输入字符串）
    Wav(String),
    /// GST token id -> 权重
    Tokens(BTreeMap<String, f64>),
}

impl StyleReference {
    /// 解析 `style_wav` 参数
    ///
    /// 空字符串表示不使用风格参考。指向已存在 `.wav` 文件的路径按原样返回；
    /// 其余输入一律按 JSON 对象解析，解析失败时返回错误。
    pub fn from_uri(uri: &str) -> Result<Option<Self>, StyleError> {
        if uri.is_empty() {
            return Ok(None);
        }

        if uri.ends_with(".wav") && Path::new(uri).is_file() {
            return Ok(Some(Self::Wav(uri.to_string())));
        }

        let value: serde_json::Value = serde_json::from_str(uri)?;
        let object = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Array(_) => return Err(StyleError::NotAMapping("an array")),
            serde_json::Value::String(_) => return Err(StyleError::NotAMapping("a string")),
            serde_json::Value::Number(_) => return Err(StyleError::NotAMapping("a number")),
            serde_json::Value::Bool(_) => return Err(StyleError::NotAMapping("a boolean")),
            serde_json::Value::Null => return Err(StyleError::NotAMapping("null")),
        };

        let mut tokens = BTreeMap::new();
        for (token, weight) in object {
            let weight = weight
                .as_f64()
                .ok_or_else(|| StyleError::InvalidWeight { token: token.clone() })?;
            tokens.insert(token, weight);
        }

        Ok(Some(Self::Tokens(tokens)))
    }
}
