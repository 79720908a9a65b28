//! 带结果缓存的类内省器

use di_abstractions::{
    CacheEntry, ClassDescriptor, ClassInspector, ClassInspectorStats, MethodSignature, ServiceCache,
};
use infrastructure_common::ReflectionError;
use std::sync::Arc;
use tracing::trace;

/// 类内省器装饰器
///
/// 以 `"类::方法::exists"`、`"类::方法::is_public"`、`"类::方法::signature"`
/// 为键缓存三类查询结果。命中时原样返回；未命中时委托给内层内省器，
/// 只有成功的结果会被写入缓存。
pub struct CachingClassInspector {
    class_inspector: Arc<dyn ClassInspector>,
    service_cache: Arc<dyn ServiceCache>,
}

impl CachingClassInspector {
    /// 包装内层内省器和结果缓存
    pub fn new(
        class_inspector: Arc<dyn ClassInspector>,
        service_cache: Arc<dyn ServiceCache>,
    ) -> Self {
        Self {
            class_inspector,
            service_cache,
        }
    }

    /// 结果缓存
    pub fn service_cache(&self) -> &Arc<dyn ServiceCache> {
        &self.service_cache
    }

    /// 预热三项缓存；方法不存在时不再查询可见性，方法不公开时不再查询签名
    pub fn warm_cache(&self, class: &str, method: &str) -> Result<(), ReflectionError> {
        if self.class_has_method(class, method)? && self.method_is_public(class, method)? {
            self.get_method_signature(class, method)?;
        }
        Ok(())
    }

    fn cached_flag<F>(&self, key: String, lookup: F) -> Result<bool, ReflectionError>
    where
        F: FnOnce() -> Result<bool, ReflectionError>,
    {
        if let Some(flag) = self.service_cache.get(&key).and_then(|entry| entry.as_flag()) {
            return Ok(flag);
        }

        trace!("结果缓存未命中: {}", key);
        let flag = lookup()?;
        self.service_cache.set(&key, CacheEntry::Flag(flag));
        Ok(flag)
    }
}

impl ClassInspector for CachingClassInspector {
    fn reflect(&self, class: &str) -> Result<Arc<ClassDescriptor>, ReflectionError> {
        self.class_inspector.reflect(class)
    }

    fn class_has_method(&self, class: &str, method: &str) -> Result<bool, ReflectionError> {
        self.cached_flag(format!("{}::{}::exists", class, method), || {
            self.class_inspector.class_has_method(class, method)
        })
    }

    fn method_is_public(&self, class: &str, method: &str) -> Result<bool, ReflectionError> {
        self.cached_flag(format!("{}::{}::is_public", class, method), || {
            self.class_inspector.method_is_public(class, method)
        })
    }

    fn get_method_signature(
        &self,
        class: &str,
        method: &str,
    ) -> Result<Arc<MethodSignature>, ReflectionError> {
        let key = format!("{}::{}::signature", class, method);
        if let Some(CacheEntry::Signature(signature)) = self.service_cache.get(&key) {
            return Ok(signature);
        }

        trace!("结果缓存未命中: {}", key);
        let signature = self.class_inspector.get_method_signature(class, method)?;
        self.service_cache
            .set(&key, CacheEntry::Signature(signature.clone()));
        Ok(signature)
    }

    fn stats(&self) -> &ClassInspectorStats {
        self.class_inspector.stats()
    }
}

impl std::fmt::Debug for CachingClassInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingClassInspector")
            .field(
                "reflection_classes_created",
                &self.stats().reflection_classes_created(),
            )
            .finish()
    }
}
