use crate::error::{Result, SheetFilterError};
use serde::{Deserialize, Serialize};
use sheet_filter_common::defaults::{DEFAULT_PREVIEW_LIMIT, EXPORT_FILE_NAME, EXPORT_SHEET_NAME};
use std::path::PathBuf;

const OUTPUT_ENV: &str = "SHEET_FILTER_OUTPUT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 出力ファイル名（出力先にディレクトリを指定した場合に使用）
    pub output_file_name: String,
    pub sheet_name: String,
    pub preview_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file_name: EXPORT_FILE_NAME.into(),
            sheet_name: EXPORT_SHEET_NAME.into(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SheetFilterError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sheet-filter").join("config.json"))
    }

    /// 出力ファイル名（環境変数を優先）
    pub fn output_file_name(&self) -> String {
        match std::env::var(OUTPUT_ENV) {
            Ok(name) if !name.trim().is_empty() => name,
            _ => self.output_file_name.clone(),
        }
    }

    pub fn set_output_file_name(&mut self, name: String) -> Result<()> {
        if name.trim().is_empty() {
            return Err(SheetFilterError::Config("出力ファイル名が空です".into()));
        }
        self.output_file_name = name;
        Ok(())
    }

    pub fn set_sheet_name(&mut self, name: String) -> Result<()> {
        if name.trim().is_empty() {
            return Err(SheetFilterError::Config("シート名が空です".into()));
        }
        self.sheet_name = name;
        Ok(())
    }

    pub fn set_preview_limit(&mut self, limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(SheetFilterError::Config("プレビュー行数は1以上を指定してください".into()));
        }
        self.preview_limit = limit;
        Ok(())
    }
}
