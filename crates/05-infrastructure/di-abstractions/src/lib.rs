//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义类元数据模型和注入引擎各个接缝处的接口。
//!
//! ## 核心类型
//!
//! - [`ClassCatalog`] - 类目录，充当反射设施
//! - [`ClassDescriptor`] - 类描述符及底层构造和调用机制
//! - [`MethodSignature`] - 方法签名
//! - [`Overrides`] - 调用方提供的覆盖值
//!
//! ## 核心接口
//!
//! - [`ServiceContainer`] - 服务容器接口
//! - [`ServiceCache`] - 内省结果缓存接口
//! - [`ClassInspector`] - 类内省接口
//! - [`Injector`] - 注入器接口

pub mod cache;
pub mod catalog;
pub mod container;
pub mod injector;
pub mod inspector;
pub mod overrides;
pub mod reflection;
pub mod signature;

pub use cache::*;
pub use catalog::*;
pub use container::*;
pub use injector::*;
pub use inspector::*;
pub use overrides::*;
pub use reflection::*;
pub use signature::*;
