//! 动态值模型
//!
//! 注入器在运行时传递的参数、默认值和服务都用 [`Value`] 表示。

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 共享的对象实例
///
/// 携带类名和实现的接口名，用于调用机制的类型检查。对象按引用比较相等性。
#[derive(Clone)]
pub struct Object {
    class: Arc<str>,
    interfaces: Arc<[String]>,
    instance: Arc<dyn Any + Send + Sync>,
}

impl Object {
    /// 使用显式类名包装实例
    pub fn new<T: Any + Send + Sync>(class: impl Into<Arc<str>>, instance: T) -> Self {
        Self::from_shared(class, Arc::new(instance))
    }

    /// 以类型的完整路径作为类名包装实例
    pub fn of<T: Any + Send + Sync>(instance: T) -> Self {
        Self::new(std::any::type_name::<T>(), instance)
    }

    /// 包装已经共享的实例
    pub fn from_shared(class: impl Into<Arc<str>>, instance: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            class: class.into(),
            interfaces: Arc::from(Vec::new()),
            instance,
        }
    }

    /// 设置对象实现的接口
    pub fn with_interfaces<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interfaces = interfaces.into_iter().map(Into::into).collect();
        self
    }

    /// 类名
    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// 实现的接口
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// 对象的类名或任一接口名是否等于 `type_name`
    pub fn is_a(&self, type_name: &str) -> bool {
        &*self.class == type_name || self.interfaces.iter().any(|interface| interface == type_name)
    }

    /// 实例是否为 `T`
    pub fn is<T: Any>(&self) -> bool {
        self.instance.is::<T>()
    }

    /// 借用为 `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }

    /// 取出共享的 `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.instance.clone().downcast::<T>().ok()
    }

    /// 是否为同一个实例
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class)
            .field("interfaces", &self.interfaces)
            .field("instance", &"<instance>")
            .finish()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// 动态值
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Object(Object),
}

impl Value {
    /// 用类型的完整路径作为类名创建对象值
    pub fn object<T: Any + Send + Sync>(instance: T) -> Self {
        Value::Object(Object::of(instance))
    }

    /// 值的种类名称，用于错误信息
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// 用于类型不匹配信息的描述：对象给出类名，其余给出种类
    pub fn describe(&self) -> String {
        match self {
            Value::Object(object) => object.class_name().to_string(),
            other => other.kind().to_string(),
        }
    }

    /// 是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// 是否为对象
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// 对象引用
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// 布尔值
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// 整数值
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// 浮点值，整数会被转换
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// 字符串切片
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// 列表元素
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
