//! 方法签名

use infrastructure_common::Value;

/// 形式参数描述
///
/// 提取后不可变；`declared_type` 只记录类类型，内建类型为 `None`。
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub declared_type: Option<String>,
    pub default: Option<Value>,
    pub variadic: bool,
}

impl ParameterDescriptor {
    /// 创建无类型、无默认值的参数
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            default: None,
            variadic: false,
        }
    }

    /// 声明的类类型
    pub fn with_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    /// 默认值
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// 标记为可变参数
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// 是否有默认值
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// 一个 (类, 方法) 的有序参数列表
///
/// `dynamic` 表示方法由动态分发处理：签名为空，覆盖值原样透传。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodSignature {
    parameters: Vec<ParameterDescriptor>,
    dynamic: bool,
}

impl MethodSignature {
    /// 由参数列表创建签名
    pub fn new(parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            parameters,
            dynamic: false,
        }
    }

    /// 动态分发的空签名
    pub fn dynamic() -> Self {
        Self {
            parameters: Vec::new(),
            dynamic: true,
        }
    }

    /// 是否为动态分发签名
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// 按声明顺序的参数
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// 参数数量
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// 按声明顺序遍历参数
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter()
    }

    /// 末尾的可变参数（如果有）
    pub fn variadic(&self) -> Option<&ParameterDescriptor> {
        self.parameters.last().filter(|parameter| parameter.variadic)
    }
}

impl<'a> IntoIterator for &'a MethodSignature {
    type Item = &'a ParameterDescriptor;
    type IntoIter = std::slice::Iter<'a, ParameterDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}
