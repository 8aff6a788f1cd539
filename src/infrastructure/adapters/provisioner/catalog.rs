//! Model Catalog - 预训练模型目录
//!
//! 目录格式：`{type: {language: {dataset: {model: {description, default_vocoder, license}}}}}`

use serde_json::Value;
use std::path::Path;

use crate::application::ports::{CatalogEntry, ProvisionError};

/// 内置目录
const BUILTIN_CATALOG: &str = include_str!("../../../../catalog/models.json");

/// 解析后的模型名 `<type>/<language>/<dataset>/<model>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName {
    pub model_type: String,
    pub language: String,
    pub dataset: String,
    pub model: String,
}

impl ModelName {
    pub fn parse(name: &str) -> Result<Self, ProvisionError> {
        let parts: Vec<&str> = name.split('/').collect();
        let valid = parts.len() == 4
            && parts.iter().all(|part| {
                !part.is_empty() && *part != "." && *part != ".." && !part.contains('\\')
            });
        if !valid {
            return Err(ProvisionError::InvalidName(name.to_string()));
        }

        Ok(Self {
            model_type: parts[0].to_string(),
            language: parts[1].to_string(),
            dataset: parts[2].to_string(),
            model: parts[3].to_string(),
        })
    }

    /// 缓存目录名，例如 `tts_models--en--ljspeech--tacotron2-DDC`
    pub fn cache_dir_name(&self) -> String {
        format!(
            "{}--{}--{}--{}",
            self.model_type, self.language, self.dataset, self.model
        )
    }
}

/// 模型目录
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    entries: Vec<CatalogEntry>,
}

impl ModelCatalog {
    pub fn builtin() -> Result<Self, ProvisionError> {
        Self::parse(BUILTIN_CATALOG)
    }

    pub fn from_file(path: &Path) -> Result<Self, ProvisionError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProvisionError::InvalidCatalog(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ProvisionError> {
        let root: Value = serde_json::from_str(content)
            .map_err(|e| ProvisionError::InvalidCatalog(e.to_string()))?;

        let mut entries = Vec::new();
        for (model_type, languages) in object(&root, "catalog root")? {
            for (language, datasets) in object(languages, model_type)? {
                for (dataset, models) in object(datasets, language)? {
                    for (model, info) in object(models, dataset)? {
                        let info = object(info, model)?;
                        let text = |key: &str| {
                            info.get(key).and_then(Value::as_str).map(str::to_string)
                        };
                        entries.push(CatalogEntry {
                            name: format!("{}/{}/{}/{}", model_type, language, dataset, model),
                            model_type: model_type.clone(),
                            language: language.clone(),
                            dataset: dataset.clone(),
                            model: model.clone(),
                            description: text("description"),
                            default_vocoder: text("default_vocoder"),
                            license: text("license"),
                        });
                    }
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

fn object<'a>(
    value: &'a Value,
    context: &str,
) -> Result<&'a serde_json::Map<String, Value>, ProvisionError> {
    value.as_object().ok_or_else(|| {
        ProvisionError::InvalidCatalog(format!("expected an object under {:?}", context))
    })
}

/// `--list_models` 输出，每行一个带序号的模型名
pub fn format_model_list(entries: &[CatalogEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!(" {}: {}\n", i + 1, entry.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_name() {
        let name = ModelName::parse("tts_models/en/ljspeech/tacotron2-DDC").unwrap();
        assert_eq!(name.model_type, "tts_models");
        assert_eq!(name.model, "tacotron2-DDC");
        assert_eq!(name.cache_dir_name(), "tts_models--en--ljspeech--tacotron2-DDC");
    }

    #[test]
    fn test_reject_malformed_names() {
        for name in ["", "tts_models/en/ljspeech", "a/b/c/d/e", "a//c/d", "a/../c/d", "a/b\\x/c/d"] {
            assert!(
                matches!(ModelName::parse(name), Err(ProvisionError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = ModelCatalog::builtin().unwrap();

        let entry = catalog.get("tts_models/en/ljspeech/tacotron2-DDC").unwrap();
        assert_eq!(entry.language, "en");
        assert_eq!(
            entry.default_vocoder.as_deref(),
            Some("vocoder_models/en/ljspeech/hifigan_v2")
        );

        let vits = catalog.get("tts_models/en/ljspeech/vits").unwrap();
        assert_eq!(vits.default_vocoder, None);

        // 每个默认声码器都在目录中
        for entry in catalog.entries() {
            if let Some(vocoder) = &entry.default_vocoder {
                assert!(catalog.get(vocoder).is_some(), "missing {vocoder}");
            }
        }
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(matches!(
            ModelCatalog::parse(r#"{"tts_models": {"en": []}}"#),
            Err(ProvisionError::InvalidCatalog(_))
        ));
        assert!(ModelCatalog::parse("nope").is_err());
    }

    #[test]
    fn test_format_model_list() {
        let catalog = ModelCatalog::parse(
            r#"{"tts_models": {"en": {"ds": {"a": {}, "b": {"description": "x"}}}}}"#,
        )
        .unwrap();

        assert_eq!(
            format_model_list(catalog.entries()),
            " 1: tts_models/en/ds/a\n 2: tts_models/en/ds/b\n"
        );
    }
}
