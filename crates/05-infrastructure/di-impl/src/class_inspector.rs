//! 类内省器实现

use crate::parameter_inspector::ParameterInspector;
use crate::reflection_class_cache::ReflectionClassCache;
use di_abstractions::{
    ClassCatalog, ClassDescriptor, ClassInspector, ClassInspectorStats, MethodSignature,
};
use infrastructure_common::ReflectionError;
use std::sync::Arc;
use tracing::debug;

/// 类内省器
///
/// 所有描述符都经由同一个 [`ReflectionClassCache`] 获取，冷反射次数记录在
/// [`ClassInspectorStats`] 中。结果本身不缓存。
#[derive(Debug)]
pub struct ClassInspectorImpl {
    catalog: Arc<ClassCatalog>,
    reflection_class_cache: ReflectionClassCache,
    parameter_inspector: ParameterInspector,
    stats: Arc<ClassInspectorStats>,
}

impl ClassInspectorImpl {
    /// 创建类内省器，类目录取自参数检查器
    pub fn new(
        reflection_class_cache: ReflectionClassCache,
        parameter_inspector: ParameterInspector,
        stats: Arc<ClassInspectorStats>,
    ) -> Self {
        Self {
            catalog: parameter_inspector.catalog().clone(),
            reflection_class_cache,
            parameter_inspector,
            stats,
        }
    }

    /// 内部的描述符缓存
    pub fn reflection_class_cache(&self) -> &ReflectionClassCache {
        &self.reflection_class_cache
    }

    /// 依次检查存在性、可见性和签名；前一步不满足时跳过后续步骤
    pub fn inspect_method(&self, class: &str, method: &str) -> Result<(), ReflectionError> {
        if self.class_has_method(class, method)? && self.method_is_public(class, method)? {
            self.get_method_signature(class, method)?;
        }
        Ok(())
    }
}

impl ClassInspector for ClassInspectorImpl {
    fn reflect(&self, class: &str) -> Result<Arc<ClassDescriptor>, ReflectionError> {
        self.reflection_class_cache
            .get_or_try_insert_with::<ReflectionError, _>(class, || {
                let descriptor = Arc::new(self.catalog.reflect(class)?);
                self.stats.increment_reflection_classes_created();
                debug!(
                    "冷反射类: {} (累计 {})",
                    class,
                    self.stats.reflection_classes_created()
                );
                Ok(descriptor)
            })
    }

    fn class_has_method(&self, class: &str, method: &str) -> Result<bool, ReflectionError> {
        Ok(self.reflect(class)?.has_method(method))
    }

    fn method_is_public(&self, class: &str, method: &str) -> Result<bool, ReflectionError> {
        Ok(self.reflect(class)?.get_method(method)?.visibility().is_public())
    }

    fn get_method_signature(
        &self,
        class: &str,
        method: &str,
    ) -> Result<Arc<MethodSignature>, ReflectionError> {
        let descriptor = self.reflect(class)?;
        self.parameter_inspector
            .signature_by_descriptor(&descriptor, method)
            .map(Arc::new)
    }

    fn stats(&self) -> &ClassInspectorStats {
        &self.stats
    }
}
