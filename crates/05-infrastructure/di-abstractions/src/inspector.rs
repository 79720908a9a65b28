//! 类内省抽象接口

use crate::reflection::ClassDescriptor;
use crate::signature::MethodSignature;
use infrastructure_common::ReflectionError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 内省统计
///
/// 冷反射（新建描述符）次数，用于评估描述符缓存容量是否足够。
#[derive(Debug, Default)]
pub struct ClassInspectorStats {
    reflection_classes_created: AtomicU64,
}

impl ClassInspectorStats {
    /// 创建计数为零的统计
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次冷反射
    pub fn increment_reflection_classes_created(&self) {
        self.reflection_classes_created.fetch_add(1, Ordering::Relaxed);
    }

    /// 累计冷反射次数
    pub fn reflection_classes_created(&self) -> u64 {
        self.reflection_classes_created.load(Ordering::Relaxed)
    }

    /// 计数清零
    pub fn reset(&self) {
        self.reflection_classes_created.store(0, Ordering::Relaxed);
    }
}

/// 类内省 trait
pub trait ClassInspector: Send + Sync {
    /// 取得（必要时冷构建）类描述符
    fn reflect(&self, class: &str) -> Result<Arc<ClassDescriptor>, ReflectionError>;

    /// 类是否声明了该方法；类不存在时返回错误
    fn class_has_method(&self, class: &str, method: &str) -> Result<bool, ReflectionError>;

    /// 方法是否公开；方法不存在时返回错误，调用方应先检查存在性
    fn method_is_public(&self, class: &str, method: &str) -> Result<bool, ReflectionError>;

    /// 方法签名
    fn get_method_signature(
        &self,
        class: &str,
        method: &str,
    ) -> Result<Arc<MethodSignature>, ReflectionError>;

    fn stats(&self) -> &ClassInspectorStats;
}

impl<I: ClassInspector + ?Sized> ClassInspector for Arc<I> {
    fn reflect(&self, class: &str) -> Result<Arc<ClassDescriptor>, ReflectionError> {
        (**self).reflect(class)
    }

    fn class_has_method(&self, class: &str, method: &str) -> Result<bool, ReflectionError> {
        (**self).class_has_method(class, method)
    }

    fn method_is_public(&self, class: &str, method: &str) -> Result<bool, ReflectionError> {
        (**self).method_is_public(class, method)
    }

    fn get_method_signature(
        &self,
        class: &str,
        method: &str,
    ) -> Result<Arc<MethodSignature>, ReflectionError> {
        (**self).get_method_signature(class, method)
    }

    fn stats(&self) -> &ClassInspectorStats {
        (**self).stats()
    }
}
