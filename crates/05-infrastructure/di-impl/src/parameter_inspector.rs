//! 方法签名提取

use di_abstractions::{
    ClassCatalog, ClassDescriptor, DeclaredType, MethodSignature, ParameterDescriptor,
};
use infrastructure_common::ReflectionError;
use std::sync::Arc;
use tracing::trace;

/// 参数内省器
///
/// 从类描述符中提取方法签名，不做任何缓存，缓存由上层负责。
#[derive(Debug, Clone)]
pub struct ParameterInspector {
    catalog: Arc<ClassCatalog>,
}

impl ParameterInspector {
    /// 创建参数检查器
    pub fn new(catalog: Arc<ClassCatalog>) -> Self {
        Self { catalog }
    }

    /// 签名提取所用的类目录
    pub fn catalog(&self) -> &Arc<ClassCatalog> {
        &self.catalog
    }

    /// 从已经反射的描述符提取签名
    pub fn signature_by_descriptor(
        &self,
        descriptor: &ClassDescriptor,
        method: &str,
    ) -> Result<MethodSignature, ReflectionError> {
        let definition = match descriptor.get_method(method) {
            Ok(definition) => definition,
            Err(_) if descriptor.has_dynamic_dispatch() => {
                trace!("方法 {}::{} 未声明，使用动态分发签名", descriptor.name(), method);
                return Ok(MethodSignature::dynamic());
            }
            Err(error) => return Err(error),
        };

        let parameters = definition.parameters();
        let mut signature = Vec::with_capacity(parameters.len());

        for (position, parameter) in parameters.iter().enumerate() {
            if parameter.variadic && position + 1 != parameters.len() {
                return Err(ReflectionError::InvalidSignature {
                    class: descriptor.name().to_string(),
                    method: method.to_string(),
                    parameter: parameter.name.clone(),
                });
            }

            signature.push(ParameterDescriptor {
                name: parameter.name.clone(),
                declared_type: match &parameter.declared_type {
                    Some(DeclaredType::Class(class)) => Some(class.clone()),
                    _ => None,
                },
                default: parameter.default.as_ref().map(|default| default.evaluate()),
                variadic: parameter.variadic,
            });
        }

        Ok(MethodSignature::new(signature))
    }

    /// 按类名提取签名，每次都会重新反射
    pub fn signature_by_class_name(
        &self,
        class: &str,
        method: &str,
    ) -> Result<MethodSignature, ReflectionError> {
        let descriptor = self.catalog.reflect(class)?;
        self.signature_by_descriptor(&descriptor, method)
    }
}
