//! 自动创建白名单

use infrastructure_common::InjectorError;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use tracing::info;

/// 允许注入器递归自动创建的类名模式
///
/// 每个模式整体匹配完整类名，不区分大小写。
#[derive(Debug, Default)]
pub struct AutoCreateAllowList {
    patterns: RwLock<Vec<(String, Regex)>>,
}

impl AutoCreateAllowList {
    /// 创建空白名单
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加模式；无法编译的模式返回 [`InjectorError::InvalidPattern`]
    pub fn add(&self, pattern: &str) -> Result<(), InjectorError> {
        let regex = RegexBuilder::new(&format!("^(?:{})$", pattern))
            .case_insensitive(true)
            .multi_line(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|error| InjectorError::InvalidPattern {
                pattern: pattern.to_string(),
                message: error.to_string(),
            })?;

        info!("添加自动创建模式: {}", pattern);
        self.patterns.write().push((pattern.to_string(), regex));
        Ok(())
    }

    /// 任一模式匹配即可自动创建
    pub fn matches(&self, class: &str) -> bool {
        self.patterns
            .read()
            .iter()
            .any(|(_, regex)| regex.is_match(class))
    }

    /// 按添加顺序返回原始模式
    pub fn patterns(&self) -> Vec<String> {
        self.patterns
            .read()
            .iter()
            .map(|(pattern, _)| pattern.clone())
            .collect()
    }

    /// 已添加的模式数量
    pub fn len(&self) -> usize {
        self.patterns.read().len()
    }

    /// 白名单是否为空
    pub fn is_empty(&self) -> bool {
        self.patterns.read().is_empty()
    }
}
