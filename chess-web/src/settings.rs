//! 演示设置
//!
//! 以 JSON 保存在配置目录中，缺失或无效时使用默认设置。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::DEFAULT_LAYOUT;
use serde::{Deserialize, Serialize};

/// 演示设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// 初始文本棋盘
    pub layout: String,
    /// 白方先走
    pub white_to_move: bool,
    /// 是否渲染所有后继棋盘
    pub show_successors: bool,
    /// 只渲染合法后继（过滤让己方王被将军的走法）
    pub legal_only: bool,
    /// 连续走子的步数
    pub walk_plies: u32,
    /// 随机选择后继的种子；None 时总是选第一个
    pub walk_seed: Option<u64>,
    /// 为初始棋盘搜索最佳走法的深度，0 表示不搜索
    pub search_depth: u32,
    /// 日志过滤（RUST_LOG 优先）
    pub log_filter: String,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
            white_to_move: true,
            show_successors: true,
            legal_only: false,
            walk_plies: 0,
            walk_seed: None,
            search_depth: 0,
            log_filter: "info".to_string(),
        }
    }
}

impl DemoSettings {
    /// 获取默认设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("chess-web");
            path.push("settings.json");
            path
        })
    }

    /// 加载设置；指定路径优先，失败时使用默认设置
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::settings_path) else {
            tracing::warn!("无法获取配置目录，使用默认设置");
            return Self::default();
        };

        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置: {:?}", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("已加载设置: {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("设置文件无效: {:#}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 从指定文件读取设置
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取设置文件失败: {:?}", path))?;
        serde_json::from_str(&content).context("解析设置文件失败")
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        std::fs::write(path, content)
            .with_context(|| format!("写入设置文件失败: {:?}", path))?;

        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = DemoSettings {
            legal_only: true,
            walk_plies: 4,
            walk_seed: Some(7),
            ..DemoSettings::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(DemoSettings::load_from(&path).unwrap(), settings);
        assert_eq!(DemoSettings::load(Some(&path)), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "white_to_move": false }"#).unwrap();

        let settings = DemoSettings::load(Some(&path));
        assert!(!settings.white_to_move);
        assert_eq!(settings.layout, DEFAULT_LAYOUT);
        assert!(settings.show_successors);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(DemoSettings::load_from(&path).is_err());
        assert_eq!(DemoSettings::load(Some(&path)), DemoSettings::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert_eq!(DemoSettings::load(Some(&path)), DemoSettings::default());
    }
}
