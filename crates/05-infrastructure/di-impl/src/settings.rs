//! 注入器配置
//!
//! 配置来源依次为可选的配置文件和 `INJECTOR_` 前缀的环境变量，后者覆盖前者。
//! 嵌套键使用 `__` 分隔，`auto_create` 可以用逗号分隔多个模式。

use crate::factory::DEFAULT_REFLECTION_CLASS_CACHE_SIZE;
use infrastructure_common::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "INJECTOR";

/// 需要预热的方法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmTarget {
    pub class: String,
    pub method: String,
}

/// 注入器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectorSettings {
    /// 描述符缓存容量，至少为 1
    pub reflection_class_cache_size: usize,
    /// 自动创建白名单模式
    pub auto_create: Vec<String>,
    /// 自动创建的最大递归深度，为空时不限制
    pub max_auto_create_depth: Option<usize>,
    /// 启动时预热的方法
    pub warm: Vec<WarmTarget>,
}

impl Default for InjectorSettings {
    fn default() -> Self {
        Self {
            reflection_class_cache_size: DEFAULT_REFLECTION_CLASS_CACHE_SIZE,
            auto_create: Vec::new(),
            max_auto_create_depth: None,
            warm: Vec::new(),
        }
    }
}

impl InjectorSettings {
    /// 从配置文件（可选）和环境变量加载
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(path, None)
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reflection_class_cache_size == 0 {
            return Err(ConfigError::validation(
                "reflection_class_cache_size must be at least 1",
            ));
        }

        if let Some(target) = self
            .warm
            .iter()
            .find(|target| target.class.is_empty() || target.method.is_empty())
        {
            return Err(ConfigError::validation(format!(
                "warm target '{}::{}' needs both a class and a method",
                target.class, target.method
            )));
        }

        Ok(())
    }

    /// `env` 为空时读取进程环境变量
    fn load_from(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileReadError {
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("配置文件不存在: {}", path.display()),
                    ),
                });
            }
            debug!("加载注入器配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("auto_create")
                    .source(env),
            )
            .build()
            .map_err(|e| {
                error!("注入器配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        let settings: Self = settings.try_deserialize().map_err(|e| {
            error!("注入器配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        settings.validate()?;
        debug!("注入器配置加载完成: {:?}", settings);
        Ok(settings)
    }
}
