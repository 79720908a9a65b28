//! 即时依赖注入器实现

use crate::auto_create::AutoCreateAllowList;
use di_abstractions::{
    Argument, ClassInspector, ClassInspectorStats, Injector, MethodSignature, OverrideKey,
    Overrides, ParameterDescriptor, ServiceContainer, CONSTRUCTOR,
};
use infrastructure_common::{
    InjectorError, InvocationError, MissingParameterError, Object, ReflectionError, Value,
};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 单个参数的解析结果
enum Resolved {
    Found(Value),
    NotFound,
}

/// 参数列表构建失败的原因
enum ResolutionError {
    /// 六个来源都没有找到参数
    Missing(MissingParameterError),
    /// 容器或递归创建返回的错误
    Failed(InjectorError),
}

impl From<InjectorError> for ResolutionError {
    fn from(error: InjectorError) -> Self {
        ResolutionError::Failed(error)
    }
}

/// 覆盖值及其消费状态
struct OverridePool {
    entries: Vec<(OverrideKey, Value)>,
    consumed: Vec<bool>,
}

impl OverridePool {
    fn new(overrides: Overrides) -> Self {
        let entries = overrides.into_entries();
        let consumed = vec![false; entries.len()];
        Self { entries, consumed }
    }

    fn take(&mut self, key: &OverrideKey) -> Option<Value> {
        let position = self.entries.iter().position(|(existing, _)| existing == key)?;
        self.consumed[position] = true;
        Some(self.entries[position].1.clone())
    }

    /// 按提供顺序取出所有未被消费的条目
    fn drain_unconsumed(&mut self) -> Vec<Argument> {
        self.entries
            .iter()
            .zip(self.consumed.iter_mut())
            .filter(|(_, consumed)| !**consumed)
            .map(|((key, value), consumed)| {
                *consumed = true;
                to_argument(key, value.clone())
            })
            .collect()
    }
}

fn to_argument(key: &OverrideKey, value: Value) -> Argument {
    match key {
        OverrideKey::Name(name) => Argument::named(name.clone(), value),
        OverrideKey::Index(_) => Argument::positional(value),
    }
}

/// 注入器
///
/// 对签名中的每个参数按以下顺序查找值：按名覆盖、按位置覆盖、按类型覆盖、
/// 服务容器、默认值、自动创建。可变参数不参与查找，而是接收所有未被消费的覆盖值。
pub struct InjectorImpl {
    container: Arc<dyn ServiceContainer>,
    inspector: Arc<dyn ClassInspector>,
    auto_create: AutoCreateAllowList,
    max_auto_create_depth: Option<usize>,
}

impl InjectorImpl {
    /// 创建注入器，自动创建白名单为空
    pub fn new(container: Arc<dyn ServiceContainer>, inspector: Arc<dyn ClassInspector>) -> Self {
        Self {
            container,
            inspector,
            auto_create: AutoCreateAllowList::new(),
            max_auto_create_depth: None,
        }
    }

    /// 限制自动创建的递归深度，默认不限制
    pub fn with_max_auto_create_depth(mut self, depth: Option<usize>) -> Self {
        self.max_auto_create_depth = depth;
        self
    }

    /// 自动创建的最大递归深度
    pub fn max_auto_create_depth(&self) -> Option<usize> {
        self.max_auto_create_depth
    }

    /// 注入器使用的类内省器
    pub fn inspector(&self) -> &Arc<dyn ClassInspector> {
        &self.inspector
    }

    /// 冷反射统计
    pub fn stats(&self) -> &ClassInspectorStats {
        self.inspector.stats()
    }

    /// 允许自动创建匹配该模式的类
    pub fn add_auto_create(&self, pattern: &str) -> Result<(), InjectorError> {
        self.auto_create.add(pattern)
    }

    /// 类名是否匹配自动创建白名单
    pub fn can_auto_create(&self, class: &str) -> bool {
        self.auto_create.matches(class)
    }

    /// 按添加顺序返回原始模式
    pub fn get_auto_create_allow_list(&self) -> Vec<String> {
        self.auto_create.patterns()
    }

    /// 创建实例并转换为具体类型
    pub fn create_as<T: Any + Send + Sync>(
        &self,
        class: &str,
        overrides: Overrides,
    ) -> Result<Arc<T>, InjectorError> {
        let object = self.create(class, overrides)?;
        object.downcast::<T>().ok_or_else(|| {
            InjectorError::invalid_argument(format!(
                "Created {} but it is not a {}",
                object.class_name(),
                std::any::type_name::<T>()
            ))
        })
    }

    /// 预先加载方法的存在性、可见性和签名
    pub fn warm(&self, class: &str, method: &str) -> Result<(), InjectorError> {
        debug!("预热内省缓存: {}::{}", class, method);
        if self.inspector.class_has_method(class, method)?
            && self.inspector.method_is_public(class, method)?
        {
            self.inspector.get_method_signature(class, method)?;
        }
        Ok(())
    }

    fn create_at_depth(
        &self,
        class: &str,
        overrides: Overrides,
        depth: usize,
    ) -> Result<Object, InjectorError> {
        if let Some(limit) = self.max_auto_create_depth {
            if depth > limit {
                return Err(InvocationError::new(format!(
                    "Can't create {} - auto-create depth limit of {} exceeded.",
                    class, limit
                ))
                .into());
            }
        }

        let descriptor = self.inspector.reflect(class)?;
        if !self.inspector.class_has_method(class, CONSTRUCTOR)? {
            trace!("{} 没有构造函数，直接创建实例", class);
            return Ok(descriptor.new_instance_without_constructor()?);
        }

        if !self.inspector.method_is_public(class, CONSTRUCTOR)? {
            return Err(InvocationError::new(format!(
                "Injector failed to create {} - constructor isn't public. \
                 Do you need to use a static factory method instead?",
                class
            ))
            .into());
        }

        let signature = self.inspector.get_method_signature(class, CONSTRUCTOR)?;
        match self.build_arguments(&signature, overrides, depth) {
            Ok(arguments) => Ok(descriptor.new_instance_args(arguments)?),
            Err(ResolutionError::Missing(missing)) => {
                let error = InvocationError::new(format!(
                    "Can't create {} - {}() missing parameter '{}' could not be found. \
                     Either register it as a service or pass it to create via parameters.",
                    class,
                    CONSTRUCTOR,
                    missing.parameter_string()
                ));
                warn!("{}", error);
                Err(error.into())
            }
            Err(ResolutionError::Failed(InjectorError::Invocation(error))) => {
                Err(error.called_when_creating(class).into())
            }
            Err(ResolutionError::Failed(error)) => Err(error),
        }
    }

    fn build_arguments(
        &self,
        signature: &MethodSignature,
        overrides: Overrides,
        depth: usize,
    ) -> Result<Vec<Argument>, ResolutionError> {
        let mut pool = OverridePool::new(overrides);

        if signature.is_dynamic() {
            return Ok(pool.drain_unconsumed());
        }

        let mut arguments = Vec::with_capacity(signature.len());
        for (position, parameter) in signature.iter().enumerate() {
            if parameter.variadic {
                arguments.extend(pool.drain_unconsumed());
                continue;
            }

            match self.resolve_parameter(position, parameter, &mut pool, depth)? {
                Resolved::Found(value) => arguments.push(Argument::positional(value)),
                Resolved::NotFound => {
                    return Err(ResolutionError::Missing(MissingParameterError::new(
                        parameter.name.clone(),
                        parameter.declared_type.clone(),
                    )))
                }
            }
        }

        Ok(arguments)
    }

    fn resolve_parameter(
        &self,
        position: usize,
        parameter: &ParameterDescriptor,
        pool: &mut OverridePool,
        depth: usize,
    ) -> Result<Resolved, InjectorError> {
        let name = &parameter.name;

        if let Some(value) = pool.take(&OverrideKey::Name(name.clone())) {
            trace!("参数 {} 使用按名覆盖值", name);
            return Ok(Resolved::Found(value));
        }

        if let Some(value) = pool.take(&OverrideKey::Index(position)) {
            trace!("参数 {} 使用按位置覆盖值 #{}", name, position);
            return Ok(Resolved::Found(value));
        }

        let declared_type = parameter.declared_type.as_deref();

        if let Some(declared_type) = declared_type {
            if let Some(value) = pool.take(&OverrideKey::Name(declared_type.to_string())) {
                trace!("参数 {} 使用按类型覆盖值 {}", name, declared_type);
                return Ok(Resolved::Found(value));
            }

            if self.container.has(declared_type) {
                trace!("参数 {} 从容器获取 {}", name, declared_type);
                return Ok(Resolved::Found(self.container.get(declared_type)?));
            }
        }

        if let Some(default) = &parameter.default {
            trace!("参数 {} 使用默认值", name);
            return Ok(Resolved::Found(default.clone()));
        }

        if let Some(declared_type) = declared_type {
            if self.can_auto_create(declared_type) {
                debug!("参数 {} 自动创建 {}", name, declared_type);
                let object = self.create_at_depth(declared_type, Overrides::new(), depth + 1)?;
                return Ok(Resolved::Found(Value::Object(object)));
            }
        }

        Ok(Resolved::NotFound)
    }
}

impl Injector for InjectorImpl {
    fn create(&self, class: &str, overrides: Overrides) -> Result<Object, InjectorError> {
        self.create_at_depth(class, overrides, 0)
    }

    fn invoke(
        &self,
        instance: &Value,
        method: &str,
        overrides: Overrides,
    ) -> Result<Value, InjectorError> {
        let object = instance.as_object().ok_or_else(|| {
            InjectorError::invalid_argument(format!(
                "Attempted Injector::invoke on a non-object: {}.",
                instance.kind()
            ))
        })?;
        let class = object.class_name();

        let signature = match self.inspector.get_method_signature(class, method) {
            Ok(signature) => signature,
            Err(ReflectionError::MethodNotFound { .. }) => {
                let error = InvocationError::new(format!(
                    "Failed to invoke {}::{} - method doesn't exist.",
                    class, method
                ));
                warn!("{}", error);
                return Err(error.into());
            }
            Err(error) => return Err(error.into()),
        };

        let arguments = match self.build_arguments(&signature, overrides, 0) {
            Ok(arguments) => arguments,
            Err(ResolutionError::Missing(missing)) => {
                let error = InvocationError::new(format!(
                    "Can't invoke method {}::{}() - missing parameter '{}' could not be found. \
                     Either register it as a service or pass it to invoke via parameters.",
                    class,
                    method,
                    missing.parameter_string()
                ));
                warn!("{}", error);
                return Err(error.into());
            }
            Err(ResolutionError::Failed(error)) => return Err(error),
        };

        let descriptor = self.inspector.reflect(class)?;
        Ok(descriptor.invoke_method(object, method, arguments)?)
    }
}

impl std::fmt::Debug for InjectorImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectorImpl")
            .field("auto_create", &self.auto_create)
            .field("max_auto_create_depth", &self.max_auto_create_depth)
            .finish()
    }
}
