//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid configuration: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 反射错误：请求的类或成员不存在，或者无法被内省
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    #[error("class {class} does not exist")]
    ClassNotFound { class: String },

    #[error("method {class}::{method}() does not exist")]
    MethodNotFound { class: String, method: String },

    #[error("invalid signature for {class}::{method}(): only the last parameter may be variadic (found '{parameter}')")]
    InvalidSignature {
        class: String,
        method: String,
        parameter: String,
    },
}

impl ReflectionError {
    /// 创建类不存在错误
    pub fn class_not_found(class: impl Into<String>) -> Self {
        Self::ClassNotFound {
            class: class.into(),
        }
    }

    /// 创建方法不存在错误
    pub fn method_not_found(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            class: class.into(),
            method: method.into(),
        }
    }
}

/// 参数无法解析
///
/// 注入器内部信号，只会在 `create`/`invoke` 边界被转换为 [`InvocationError`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingParameterError {
    /// 缺失参数的名称
    pub parameter_name: String,
    /// 缺失参数声明的类型（如果有）
    pub parameter_type: Option<String>,
}

impl MissingParameterError {
    /// 创建缺失参数错误
    pub fn new(parameter_name: impl Into<String>, parameter_type: Option<String>) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            parameter_type,
        }
    }

    /// 便于开发者阅读的参数描述，例如 `cache [app::Cache]`
    pub fn parameter_string(&self) -> String {
        match &self.parameter_type {
            Some(parameter_type) => format!("{} [{}]", self.parameter_name, parameter_type),
            None => self.parameter_name.clone(),
        }
    }
}

impl fmt::Display for MissingParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not find required parameter '{}'",
            self.parameter_string()
        )
    }
}

impl std::error::Error for MissingParameterError {}

/// 注入调用错误
///
/// 构造或调用失败时唯一跨越公共 API 边界的错误。递归自动创建失败时，
/// 每一层都会追加一行 `=> (called when creating X)`，形成自底向上的诊断链。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InvocationError {
    message: String,
}

impl InvocationError {
    /// 创建调用错误
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 完整的错误消息，包含调用链
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 追加外层正在创建的类，用于递归创建时的调用链
    pub fn called_when_creating(self, class: &str) -> Self {
        Self {
            message: format!("{}\n => (called when creating {})", self.message, class),
        }
    }

    /// 诊断链的层数（不含最初的错误行）
    pub fn chain_depth(&self) -> usize {
        self.message.matches("(called when creating ").count()
    }
}

/// 底层调用机制错误（参数个数、参数类型、可见性等）
///
/// 注入器不会掩盖这类错误，它们按原样向上传播。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("too few arguments to {callable}(): {actual} passed and {expected} expected")]
    TooFewArguments {
        callable: String,
        expected: usize,
        actual: usize,
    },

    #[error("too many arguments to {callable}(): {actual} passed and at most {expected} expected")]
    TooManyArguments {
        callable: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown named parameter '{name}' passed to {callable}()")]
    UnknownNamedParameter { callable: String, name: String },

    #[error("{callable}(): argument #{position} ('{parameter}') must be of type {expected}, {actual} given")]
    TypeMismatch {
        callable: String,
        position: usize,
        parameter: String,
        expected: String,
        actual: String,
    },

    #[error("call to {visibility} method {callable}() from outside its class")]
    NotAccessible {
        callable: String,
        visibility: String,
    },

    #[error("call to undefined method {callable}()")]
    UndefinedMethod { callable: String },

    #[error("cannot instantiate {class}: it has neither a constructor nor a blank instance producer")]
    NotInstantiable { class: String },

    #[error("{callable}() failed: {message}")]
    Failed { callable: String, message: String },
}

impl CallError {
    /// 创建方法体内部失败错误
    pub fn failed(callable: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            callable: callable.into(),
            message: message.into(),
        }
    }
}

/// 服务容器错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("service not found in container ({id})")]
    ServiceNotFound { id: String },

    #[error("service {id} could not be retrieved: {message}")]
    RetrievalFailed { id: String, message: String },
}

/// 注入器错误
#[derive(Error, Debug)]
pub enum InjectorError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("{message}")]
    InvalidArgument { message: String },

    #[error(transparent)]
    Reflection(#[from] ReflectionError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("invalid auto-create pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InjectorError {
    /// 参数不合法
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// 如果是调用错误则返回其引用
    pub fn as_invocation(&self) -> Option<&InvocationError> {
        match self {
            Self::Invocation(error) => Some(error),
            _ => None,
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ReflectionResult<T> = Result<T, ReflectionError>;
pub type CallResult<T> = Result<T, CallError>;
pub type InjectorResult<T> = Result<T, InjectorError>;
