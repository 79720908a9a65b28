//! 服务容器适配器

use di_abstractions::ServiceContainer;
use infrastructure_common::{ContainerError, Value};
use parking_lot::RwLock;
use std::collections::HashMap;

/// 以普通映射充当服务容器
#[derive(Debug, Default)]
pub struct ArrayContainerAdapter {
    services: RwLock<HashMap<String, Value>>,
}

impl ArrayContainerAdapter {
    /// 以已有的服务表创建容器
    pub fn new(services: HashMap<String, Value>) -> Self {
        Self {
            services: RwLock::new(services),
        }
    }

    /// 创建空容器
    pub fn empty() -> Self {
        Self::default()
    }

    /// 注册或替换服务
    pub fn set(&self, id: impl Into<String>, service: impl Into<Value>) {
        self.services.write().insert(id.into(), service.into());
    }

    /// 以 `T` 的完整路径作为键
    pub fn set_typed<T: ?Sized + 'static>(&self, service: impl Into<Value>) {
        self.set(std::any::type_name::<T>(), service);
    }

    /// 链式注册服务
    pub fn with(self, id: impl Into<String>, service: impl Into<Value>) -> Self {
        self.set(id, service);
        self
    }

    /// 已注册的服务数量
    pub fn len(&self) -> usize {
        self.services.read().len()
    }

    /// 容器是否为空
    pub fn is_empty(&self) -> bool {
        self.services.read().is_empty()
    }
}

impl ServiceContainer for ArrayContainerAdapter {
    fn has(&self, id: &str) -> bool {
        self.services.read().contains_key(id)
    }

    fn get(&self, id: &str) -> Result<Value, ContainerError> {
        self.services
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::ServiceNotFound { id: id.to_string() })
    }
}

impl FromIterator<(String, Value)> for ArrayContainerAdapter {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
