//! 注入器抽象接口

use crate::overrides::Overrides;
use infrastructure_common::{InjectorError, Object, Value};

/// 即时依赖注入器
///
/// 按构造函数或方法签名逐个解析参数（覆盖值、服务容器、默认值、自动创建），
/// 然后执行构造或调用。
pub trait Injector: Send + Sync {
    /// 创建类实例
    fn create(&self, class: &str, overrides: Overrides) -> Result<Object, InjectorError>;

    /// 在实例上调用方法；`instance` 不是对象时返回 [`InjectorError::InvalidArgument`]
    fn invoke(
        &self,
        instance: &Value,
        method: &str,
        overrides: Overrides,
    ) -> Result<Value, InjectorError>;
}
