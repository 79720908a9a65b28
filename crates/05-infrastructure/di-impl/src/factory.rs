//! 注入器构建器与工厂

use crate::adapter::ArrayContainerAdapter;
use crate::cache::ArrayServiceCache;
use crate::caching_class_inspector::CachingClassInspector;
use crate::class_inspector::ClassInspectorImpl;
use crate::injector::InjectorImpl;
use crate::parameter_inspector::ParameterInspector;
use crate::reflection_class_cache::ReflectionClassCache;
use crate::settings::InjectorSettings;
use di_abstractions::{ClassCatalog, ClassInspectorStats, ServiceCache, ServiceContainer};
use infrastructure_common::InjectorError;
use std::sync::Arc;
use tracing::info;

/// 描述符缓存的默认容量
pub const DEFAULT_REFLECTION_CLASS_CACHE_SIZE: usize = 50;

/// 注入器构建器
///
/// 组装 描述符缓存 → 类内省器 → 带缓存的内省器 → 注入器。
pub struct InjectorBuilder {
    catalog: Arc<ClassCatalog>,
    container: Option<Arc<dyn ServiceContainer>>,
    service_cache: Option<Arc<dyn ServiceCache>>,
    reflection_class_cache_size: usize,
    auto_create: Vec<String>,
    max_auto_create_depth: Option<usize>,
    warm: Vec<(String, String)>,
}

impl InjectorBuilder {
    /// 以类目录创建构建器，其余组件使用默认值
    pub fn new(catalog: Arc<ClassCatalog>) -> Self {
        Self {
            catalog,
            container: None,
            service_cache: None,
            reflection_class_cache_size: DEFAULT_REFLECTION_CLASS_CACHE_SIZE,
            auto_create: Vec::new(),
            max_auto_create_depth: None,
            warm: Vec::new(),
        }
    }

    /// 设置服务容器，未设置时使用空容器
    pub fn container(mut self, container: Arc<dyn ServiceContainer>) -> Self {
        self.container = Some(container);
        self
    }

    /// 设置结果缓存，未设置时使用 [`ArrayServiceCache`]
    pub fn service_cache(mut self, service_cache: Arc<dyn ServiceCache>) -> Self {
        self.service_cache = Some(service_cache);
        self
    }

    /// 描述符缓存容量
    pub fn reflection_class_cache_size(mut self, size: usize) -> Self {
        self.reflection_class_cache_size = size;
        self
    }

    /// 添加自动创建模式
    pub fn auto_create(mut self, pattern: impl Into<String>) -> Self {
        self.auto_create.push(pattern.into());
        self
    }

    /// 自动创建的最大递归深度
    pub fn max_auto_create_depth(mut self, depth: Option<usize>) -> Self {
        self.max_auto_create_depth = depth;
        self
    }

    /// 构建完成后预热该方法的内省缓存
    pub fn warm(mut self, class: impl Into<String>, method: impl Into<String>) -> Self {
        self.warm.push((class.into(), method.into()));
        self
    }

    /// 应用配置
    pub fn settings(mut self, settings: &InjectorSettings) -> Self {
        self.reflection_class_cache_size = settings.reflection_class_cache_size;
        self.auto_create.extend(settings.auto_create.iter().cloned());
        self.max_auto_create_depth = settings.max_auto_create_depth;
        self.warm.extend(
            settings
                .warm
                .iter()
                .map(|target| (target.class.clone(), target.method.clone())),
        );
        self
    }

    /// 组装注入器，添加白名单模式并执行预热
    pub fn build(self) -> Result<InjectorImpl, InjectorError> {
        let class_inspector = ClassInspectorImpl::new(
            ReflectionClassCache::new(self.reflection_class_cache_size)?,
            ParameterInspector::new(self.catalog),
            Arc::new(ClassInspectorStats::new()),
        );
        let service_cache = self
            .service_cache
            .unwrap_or_else(|| Arc::new(ArrayServiceCache::new()) as Arc<dyn ServiceCache>);
        let inspector = CachingClassInspector::new(Arc::new(class_inspector), service_cache);
        let container = self.container.unwrap_or_else(|| {
            Arc::new(ArrayContainerAdapter::empty()) as Arc<dyn ServiceContainer>
        });

        let injector = InjectorImpl::new(container, Arc::new(inspector))
            .with_max_auto_create_depth(self.max_auto_create_depth);
        for pattern in &self.auto_create {
            injector.add_auto_create(pattern)?;
        }
        for (class, method) in &self.warm {
            injector.warm(class, method)?;
        }

        info!(
            "注入器构建完成: 描述符缓存容量 {}, 自动创建模式 {} 个, 预热 {} 个方法",
            self.reflection_class_cache_size,
            self.auto_create.len(),
            self.warm.len()
        );
        Ok(injector)
    }
}

/// 注入器工厂
pub struct InjectorFactory;

impl InjectorFactory {
    /// 以默认组件创建注入器；`service_cache` 为空时使用内存结果缓存
    pub fn create(
        container: Arc<dyn ServiceContainer>,
        catalog: Arc<ClassCatalog>,
        reflection_class_cache_size: usize,
        service_cache: Option<Arc<dyn ServiceCache>>,
    ) -> Result<InjectorImpl, InjectorError> {
        let builder = InjectorBuilder::new(catalog)
            .container(container)
            .reflection_class_cache_size(reflection_class_cache_size);

        match service_cache {
            Some(service_cache) => builder.service_cache(service_cache).build(),
            None => builder.build(),
        }
    }

    /// 按配置创建注入器
    pub fn from_settings(
        container: Arc<dyn ServiceContainer>,
        catalog: Arc<ClassCatalog>,
        settings: &InjectorSettings,
    ) -> Result<InjectorImpl, InjectorError> {
        InjectorBuilder::new(catalog)
            .container(container)
            .settings(settings)
            .build()
    }
}
