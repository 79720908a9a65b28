//! 服务容器抽象接口
//!
//! 注入器只按声明的类型名查询容器，容器的注册和生命周期由外部负责。

use infrastructure_common::{ContainerError, Value};

/// 服务容器 trait
pub trait ServiceContainer: Send + Sync {
    /// 容器是否持有该键
    fn has(&self, id: &str) -> bool;

    /// 取出服务；键不存在时返回 [`ContainerError::ServiceNotFound`]
    fn get(&self, id: &str) -> Result<Value, ContainerError>;
}

impl<C: ServiceContainer + ?Sized> ServiceContainer for std::sync::Arc<C> {
    fn has(&self, id: &str) -> bool {
        (**self).has(id)
    }

    fn get(&self, id: &str) -> Result<Value, ContainerError> {
        (**self).get(id)
    }
}
