//! 类目录
//!
//! 按完整类名登记 [`ClassDefinition`]，充当注入器的"反射设施"。

use crate::reflection::{ClassDefinition, ClassDescriptor, Reflect};
use infrastructure_common::ReflectionError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 类目录
#[derive(Debug, Default)]
pub struct ClassCatalog {
    classes: RwLock<HashMap<String, Arc<ClassDefinition>>>,
}

impl ClassCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记类定义，同名定义会被替换
    pub fn register(&self, definition: ClassDefinition) {
        debug!("登记类定义: {}", definition.name());
        self.classes
            .write()
            .insert(definition.name().to_string(), Arc::new(definition));
    }

    /// 登记实现了 [`Reflect`] 的类型
    pub fn register_type<T: Reflect>(&self) {
        self.register(T::class_definition());
    }

    /// 链式登记
    pub fn with(self, definition: ClassDefinition) -> Self {
        self.register(definition);
        self
    }

    /// 目录中是否有该类
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.read().contains_key(class)
    }

    /// 类定义
    pub fn definition(&self, class: &str) -> Option<Arc<ClassDefinition>> {
        self.classes.read().get(class).cloned()
    }

    /// 冷反射：由定义构建新的描述符
    pub fn reflect(&self, class: &str) -> Result<ClassDescriptor, ReflectionError> {
        self.definition(class)
            .map(ClassDescriptor::reflect)
            .ok_or_else(|| ReflectionError::class_not_found(class))
    }

    /// 已登记的类名（按名称排序）
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// 已注册的类数量
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }
}
