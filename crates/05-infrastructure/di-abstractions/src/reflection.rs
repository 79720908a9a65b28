//! 类元数据模型
//!
//! Rust 没有运行时反射，因此类、方法和参数的元数据以 [`ClassDefinition`] 的形式
//! 登记到 [`ClassCatalog`](crate::ClassCatalog)（手写或由 `#[injectable]` 宏生成）。
//! 冷反射时由定义构建 [`ClassDescriptor`]，它同时承担底层的构造和调用机制：
//! 参数绑定、默认值填充和声明类型检查都在这里完成。

use infrastructure_common::{CallError, Object, ReflectionError, Value};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 构造函数的方法名
pub const CONSTRUCTOR: &str = "new";

/// 成员可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// 是否公开
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }

    /// 小写名称
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 参数声明的类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// 内建类型：`int`、`float`、`string`、`bool`、`array`、`object`、`mixed`
    Builtin(String),
    /// 类或接口的完整名称
    Class(String),
}

impl DeclaredType {
    /// 内置类型
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::Builtin(name.into())
    }

    /// 类或接口类型
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// 类型名称
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(name) | Self::Class(name) => name,
        }
    }

    /// 是否为内置类型
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    /// 非空值是否满足该类型
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Class(name) => value.as_object().is_some_and(|object| object.is_a(name)),
            Self::Builtin(name) => match name.to_ascii_lowercase().as_str() {
                "mixed" => true,
                "int" => matches!(value, Value::Int(_)),
                "float" => matches!(value, Value::Float(_) | Value::Int(_)),
                "string" => matches!(value, Value::String(_)),
                "bool" => matches!(value, Value::Bool(_)),
                "array" | "list" | "iterable" => matches!(value, Value::List(_)),
                "object" => value.is_object(),
                _ => true,
            },
        }
    }
}

/// 默认值生成器，在签名提取时求值
#[derive(Clone)]
pub struct DefaultValue(Arc<dyn Fn() -> Value + Send + Sync>);

impl DefaultValue {
    /// 由生成器创建默认值
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(producer))
    }

    /// 固定的默认值
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(move || value.clone())
    }

    /// 求出默认值
    pub fn evaluate(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultValue(<producer>)")
    }
}

/// 形式参数的定义
#[derive(Debug, Clone)]
pub struct ParameterDefinition {
    pub name: String,
    pub declared_type: Option<DeclaredType>,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
    pub variadic: bool,
}

impl ParameterDefinition {
    /// 创建无类型的必需参数
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            nullable: false,
            default: None,
            variadic: false,
        }
    }

    /// 声明为类类型
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.declared_type = Some(DeclaredType::class(class));
        self
    }

    /// 声明为内建类型
    pub fn with_builtin(mut self, builtin: impl Into<String>) -> Self {
        self.declared_type = Some(DeclaredType::builtin(builtin));
        self
    }

    /// 允许传入空值
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// 固定的默认值
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::constant(value));
        self
    }

    /// 每次提取签名时求值的默认值
    pub fn with_default_fn<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::new(producer));
        self
    }

    /// 标记为可变参数，必须是最后一个参数
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// 调用机制的类型检查
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.declared_type {
            None => true,
            Some(declared) if value.is_null() => {
                self.nullable || declared.name().eq_ignore_ascii_case("mixed")
            }
            Some(declared) => declared.accepts(value),
        }
    }

    fn type_label(&self) -> String {
        match &self.declared_type {
            None => "mixed".to_string(),
            Some(declared) if self.nullable => format!("?{}", declared.name()),
            Some(declared) => declared.name().to_string(),
        }
    }
}

/// 构造函数体
pub type ConstructorFn =
    Arc<dyn Fn(Arguments) -> Result<Arc<dyn Any + Send + Sync>, CallError> + Send + Sync>;
/// 实例方法体
pub type MethodFn = Arc<dyn Fn(&Object, Arguments) -> Result<Value, CallError> + Send + Sync>;
/// 无构造函数时生成空白实例
pub type BlankFn = Arc<dyn Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync>;
/// 动态分发处理器，接收方法名和原样传入的参数
pub type DynamicFn =
    Arc<dyn Fn(&Object, &str, Vec<Argument>) -> Result<Value, CallError> + Send + Sync>;

#[derive(Clone)]
pub enum MethodBody {
    Constructor(ConstructorFn),
    Method(MethodFn),
}

/// 方法（或构造函数）的定义
#[derive(Clone)]
pub struct MethodDefinition {
    name: String,
    visibility: Visibility,
    parameters: Vec<ParameterDefinition>,
    body: MethodBody,
}

impl MethodDefinition {
    /// 定义构造函数，方法体返回新实例
    pub fn constructor<T, F>(body: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> Result<T, CallError> + Send + Sync + 'static,
    {
        let body: ConstructorFn = Arc::new(move |arguments: Arguments| {
            body(arguments).map(|instance| Arc::new(instance) as Arc<dyn Any + Send + Sync>)
        });

        Self {
            name: CONSTRUCTOR.to_string(),
            visibility: Visibility::Public,
            parameters: Vec::new(),
            body: MethodBody::Constructor(body),
        }
    }

    /// 定义实例方法
    pub fn method<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Object, Arguments) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            parameters: Vec::new(),
            body: MethodBody::Method(Arc::new(body)),
        }
    }

    /// 设置可见性，默认为公开
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// 追加参数
    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// 追加多个参数
    pub fn with_parameters<I>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = ParameterDefinition>,
    {
        self.parameters.extend(parameters);
        self
    }

    /// 方法名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 可见性
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// 按声明顺序的参数
    pub fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    /// 是否为构造函数
    pub fn is_constructor(&self) -> bool {
        matches!(self.body, MethodBody::Constructor(_))
    }
}

impl fmt::Debug for MethodDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDefinition")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("parameters", &self.parameters)
            .field("body", &"<function>")
            .finish()
    }
}

/// 类的定义
#[derive(Clone)]
pub struct ClassDefinition {
    name: String,
    interfaces: Vec<String>,
    methods: Vec<MethodDefinition>,
    blank: Option<BlankFn>,
    dynamic: Option<DynamicFn>,
}

impl ClassDefinition {
    /// 创建没有方法的类定义
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interfaces: Vec::new(),
            methods: Vec::new(),
            blank: None,
            dynamic: None,
        }
    }

    /// 以类型的完整路径作为类名
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// 声明实现的接口
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// 添加方法；同名方法后者覆盖前者
    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.retain(|existing| existing.name != method.name);
        self.methods.push(method);
        self
    }

    /// 无构造函数的类通过该生成器得到空白实例
    pub fn without_constructor<T, F>(mut self, producer: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let blank: BlankFn = Arc::new(move || Arc::new(producer()) as Arc<dyn Any + Send + Sync>);
        self.blank = Some(blank);
        self
    }

    /// 为未声明的方法提供兜底处理
    pub fn with_dynamic_dispatch<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Object, &str, Vec<Argument>) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        self.dynamic = Some(Arc::new(handler));
        self
    }

    /// 类名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 实现的接口
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// 按添加顺序的方法
    pub fn methods(&self) -> &[MethodDefinition] {
        &self.methods
    }
}

impl fmt::Debug for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDefinition")
            .field("name", &self.name)
            .field("interfaces", &self.interfaces)
            .field("methods", &self.methods)
            .field("blank", &self.blank.is_some())
            .field("dynamic", &self.dynamic.is_some())
            .finish()
    }
}

/// 可以生成自身类定义的类型，由 `#[injectable]` 宏实现
pub trait Reflect: Any + Send + Sync {
    fn class_definition() -> ClassDefinition;
}

/// 传给调用机制的单个实参
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Value,
}

impl Argument {
    /// 位置实参
    pub fn positional(value: impl Into<Value>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    /// 命名实参
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }
}

/// 绑定后交给方法体的实参
#[derive(Debug, Clone)]
pub struct Arguments {
    callable: String,
    names: Vec<String>,
    values: Vec<Value>,
    variadic: Vec<Value>,
}

impl Arguments {
    /// 直接构造（不经过类型检查），参数按位置命名
    pub fn new(callable: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            callable: callable.into(),
            names: (0..values.len()).map(|position| format!("arg{}", position)).collect(),
            values,
            variadic: Vec::new(),
        }
    }

    /// 被调用的方法，用于错误消息
    pub fn callable(&self) -> &str {
        &self.callable
    }

    /// 固定参数的个数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否没有固定参数
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.variadic.is_empty()
    }

    /// 第 `position` 个固定参数
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// 第 `position` 个固定参数，缺失时报错
    pub fn value(&self, position: usize) -> Result<&Value, CallError> {
        self.values.get(position).ok_or_else(|| CallError::TooFewArguments {
            callable: self.callable.clone(),
            expected: position + 1,
            actual: self.values.len(),
        })
    }

    /// 取出对象实例
    pub fn object<T: Any + Send + Sync>(&self, position: usize) -> Result<Arc<T>, CallError> {
        let value = self.value(position)?;
        value
            .as_object()
            .and_then(Object::downcast::<T>)
            .ok_or_else(|| self.mismatch(position, std::any::type_name::<T>(), value))
    }

    /// 取出可空的对象实例
    pub fn optional_object<T: Any + Send + Sync>(
        &self,
        position: usize,
    ) -> Result<Option<Arc<T>>, CallError> {
        match self.value(position)? {
            Value::Null => Ok(None),
            _ => self.object::<T>(position).map(Some),
        }
    }

    /// 取出整数
    pub fn int(&self, position: usize) -> Result<i64, CallError> {
        let value = self.value(position)?;
        value.as_int().ok_or_else(|| self.mismatch(position, "int", value))
    }

    /// 取出浮点数
    pub fn float(&self, position: usize) -> Result<f64, CallError> {
        let value = self.value(position)?;
        value.as_float().ok_or_else(|| self.mismatch(position, "float", value))
    }

    /// 取出布尔值
    pub fn bool(&self, position: usize) -> Result<bool, CallError> {
        let value = self.value(position)?;
        value.as_bool().ok_or_else(|| self.mismatch(position, "bool", value))
    }

    /// 取出字符串
    pub fn string(&self, position: usize) -> Result<String, CallError> {
        let value = self.value(position)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(position, "string", value))
    }

    /// 可变参数部分
    pub fn variadic(&self) -> &[Value] {
        &self.variadic
    }

    /// 可变参数中的全部对象实例
    pub fn variadic_objects<T: Any + Send + Sync>(&self) -> Result<Vec<Arc<T>>, CallError> {
        self.variadic
            .iter()
            .enumerate()
            .map(|(offset, value)| {
                value
                    .as_object()
                    .and_then(Object::downcast::<T>)
                    .ok_or_else(|| CallError::TypeMismatch {
                        callable: self.callable.clone(),
                        position: self.values.len() + offset + 1,
                        parameter: "...".to_string(),
                        expected: std::any::type_name::<T>().to_string(),
                        actual: value.describe(),
                    })
            })
            .collect()
    }

    fn mismatch(&self, position: usize, expected: &str, actual: &Value) -> CallError {
        CallError::TypeMismatch {
            callable: self.callable.clone(),
            position: position + 1,
            parameter: self
                .names
                .get(position)
                .cloned()
                .unwrap_or_else(|| format!("arg{}", position)),
            expected: expected.to_string(),
            actual: actual.describe(),
        }
    }
}

/// 按参数定义绑定实参
///
/// 命名实参一律拒绝；多出的位置实参进入可变参数，缺少的固定参数使用默认值。
fn bind_arguments(
    callable: &str,
    parameters: &[ParameterDefinition],
    arguments: Vec<Argument>,
) -> Result<Arguments, CallError> {
    let fixed = parameters.iter().take_while(|parameter| !parameter.variadic).count();
    let variadic = parameters.get(fixed);
    let supplied = arguments.len();

    let mut values = Vec::with_capacity(fixed);
    let mut rest = Vec::new();

    for (position, argument) in arguments.into_iter().enumerate() {
        if let Some(name) = argument.name {
            return Err(CallError::UnknownNamedParameter {
                callable: callable.to_string(),
                name,
            });
        }

        let parameter = match parameters.get(position) {
            Some(parameter) if position < fixed => parameter,
            _ => variadic.ok_or_else(|| CallError::TooManyArguments {
                callable: callable.to_string(),
                expected: fixed,
                actual: supplied,
            })?,
        };

        if !parameter.accepts(&argument.value) {
            return Err(CallError::TypeMismatch {
                callable: callable.to_string(),
                position: position + 1,
                parameter: parameter.name.clone(),
                expected: parameter.type_label(),
                actual: argument.value.describe(),
            });
        }

        if position < fixed {
            values.push(argument.value);
        } else {
            rest.push(argument.value);
        }
    }

    for parameter in &parameters[values.len()..fixed] {
        match &parameter.default {
            Some(default) => values.push(default.evaluate()),
            None => {
                return Err(CallError::TooFewArguments {
                    callable: callable.to_string(),
                    expected: parameters[..fixed]
                        .iter()
                        .filter(|parameter| parameter.default.is_none())
                        .count(),
                    actual: supplied,
                })
            }
        }
    }

    Ok(Arguments {
        callable: callable.to_string(),
        names: parameters[..fixed]
            .iter()
            .map(|parameter| parameter.name.clone())
            .collect(),
        values,
        variadic: rest,
    })
}

/// 类描述符（反射句柄）
///
/// 由 [`ClassDefinition`] 冷构建，按方法名建立索引。
#[derive(Clone)]
pub struct ClassDescriptor {
    definition: Arc<ClassDefinition>,
    methods: HashMap<String, usize>,
}

impl ClassDescriptor {
    /// 由类定义构建描述符
    pub fn reflect(definition: Arc<ClassDefinition>) -> Self {
        let methods = definition
            .methods
            .iter()
            .enumerate()
            .map(|(index, method)| (method.name.clone(), index))
            .collect();

        Self {
            definition,
            methods,
        }
    }

    /// 类名
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// 底层的类定义
    pub fn definition(&self) -> &ClassDefinition {
        &self.definition
    }

    /// 是否声明了该方法
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// 方法定义
    pub fn get_method(&self, method: &str) -> Result<&MethodDefinition, ReflectionError> {
        self.methods
            .get(method)
            .map(|&index| &self.definition.methods[index])
            .ok_or_else(|| ReflectionError::method_not_found(self.name(), method))
    }

    /// 是否声明了构造函数
    pub fn has_constructor(&self) -> bool {
        self.get_method(CONSTRUCTOR)
            .map(MethodDefinition::is_constructor)
            .unwrap_or(false)
    }

    /// 是否有动态分发处理器
    pub fn has_dynamic_dispatch(&self) -> bool {
        self.definition.dynamic.is_some()
    }

    /// 不经过构造函数创建实例
    pub fn new_instance_without_constructor(&self) -> Result<Object, CallError> {
        let blank = self
            .definition
            .blank
            .as_ref()
            .ok_or_else(|| CallError::NotInstantiable {
                class: self.name().to_string(),
            })?;

        Ok(self.wrap(blank()))
    }

    /// 以给定实参调用构造函数
    pub fn new_instance_args(&self, arguments: Vec<Argument>) -> Result<Object, CallError> {
        let constructor = match self.get_method(CONSTRUCTOR) {
            Ok(method) => method,
            Err(_) => {
                return Err(CallError::NotInstantiable {
                    class: self.name().to_string(),
                })
            }
        };
        let callable = format!("{}::{}", self.name(), CONSTRUCTOR);

        if !constructor.visibility.is_public() {
            return Err(CallError::NotAccessible {
                callable,
                visibility: constructor.visibility.to_string(),
            });
        }

        match &constructor.body {
            MethodBody::Constructor(body) => {
                let arguments = bind_arguments(&callable, &constructor.parameters, arguments)?;
                body(arguments).map(|instance| self.wrap(instance))
            }
            MethodBody::Method(_) => Err(CallError::NotInstantiable {
                class: self.name().to_string(),
            }),
        }
    }

    /// 在实例上调用方法；未声明或不可访问的方法交给动态分发（如果有）
    pub fn invoke_method(
        &self,
        instance: &Object,
        method: &str,
        arguments: Vec<Argument>,
    ) -> Result<Value, CallError> {
        let callable = format!("{}::{}", self.name(), method);

        match self.get_method(method) {
            Ok(definition) if definition.visibility.is_public() => match &definition.body {
                MethodBody::Method(body) => {
                    let arguments = bind_arguments(&callable, &definition.parameters, arguments)?;
                    body(instance, arguments)
                }
                MethodBody::Constructor(_) => Err(CallError::failed(
                    callable,
                    "a constructor cannot be invoked on an existing instance",
                )),
            },
            Ok(definition) => match &self.definition.dynamic {
                Some(dynamic) => dynamic(instance, method, arguments),
                None => Err(CallError::NotAccessible {
                    callable,
                    visibility: definition.visibility.to_string(),
                }),
            },
            Err(_) => match &self.definition.dynamic {
                Some(dynamic) => dynamic(instance, method, arguments),
                None => Err(CallError::UndefinedMethod { callable }),
            },
        }
    }

    fn wrap(&self, instance: Arc<dyn Any + Send + Sync>) -> Object {
        Object::from_shared(self.name(), instance)
            .with_interfaces(self.definition.interfaces.iter().cloned())
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name())
            .field("methods", &self.methods.len())
            .finish()
    }
}
