//! # 依赖注入具体实现
//!
//! 提供即时依赖注入器及其内省、缓存组件的具体实现。
//!
//! ## 组件
//!
//! - [`ParameterInspector`] - 从类描述符提取方法签名
//! - [`ReflectionClassCache`] - 按插入顺序淘汰的有界描述符缓存
//! - [`ClassInspectorImpl`] - 类内省器
//! - [`CachingClassInspector`] - 带结果缓存的类内省器
//! - [`InjectorImpl`] - 注入器
//! - [`InjectorBuilder`] / [`InjectorFactory`] - 组装以上组件
//!
//! ## 示例
//!
//! ```
//! use di_abstractions::{ClassCatalog, ClassDefinition, Injector, Overrides};
//! use di_impl::{ArrayContainerAdapter, InjectorBuilder};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Clock;
//!
//! let catalog = ClassCatalog::new()
//!     .with(ClassDefinition::new("app::Clock").without_constructor(Clock::default));
//! let injector = InjectorBuilder::new(Arc::new(catalog))
//!     .container(Arc::new(ArrayContainerAdapter::empty()))
//!     .build()
//!     .unwrap();
//!
//! let clock = injector.create("app::Clock", Overrides::new()).unwrap();
//! assert!(clock.is::<Clock>());
//! ```

pub mod adapter;
pub mod auto_create;
pub mod cache;
pub mod caching_class_inspector;
pub mod class_inspector;
pub mod factory;
pub mod injector;
pub mod parameter_inspector;
pub mod reflection_class_cache;
pub mod settings;

pub use adapter::ArrayContainerAdapter;
pub use auto_create::AutoCreateAllowList;
pub use cache::{ArrayServiceCache, NoOpServiceCache};
pub use caching_class_inspector::CachingClassInspector;
pub use class_inspector::ClassInspectorImpl;
pub use factory::{InjectorBuilder, InjectorFactory, DEFAULT_REFLECTION_CLASS_CACHE_SIZE};
pub use injector::InjectorImpl;
pub use parameter_inspector::ParameterInspector;
pub use reflection_class_cache::ReflectionClassCache;
pub use settings::{InjectorSettings, WarmTarget, ENV_PREFIX};
