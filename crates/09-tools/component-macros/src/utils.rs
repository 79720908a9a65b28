//! 宏工具函数

use syn::{Expr, GenericArgument, Lit, Meta, PathArguments, Result, Type};

/// 解析属性参数的通用函数
pub fn parse_attribute_args(args: Vec<Meta>) -> Result<Vec<(String, Option<String>)>> {
    let mut parsed_args = Vec::new();

    for arg in args {
        match arg {
            Meta::Path(path) => {
                if let Some(ident) = path.get_ident() {
                    parsed_args.push((ident.to_string(), None));
                }
            }
            Meta::NameValue(nv) => {
                let ident = nv
                    .path
                    .get_ident()
                    .ok_or_else(|| syn::Error::new_spanned(&nv.path, "expected an identifier"))?
                    .to_string();
                let value = match nv.value {
                    Expr::Lit(expr_lit) => match expr_lit.lit {
                        Lit::Str(lit_str) => Some(lit_str.value()),
                        Lit::Int(lit_int) => Some(lit_int.to_string()),
                        Lit::Bool(lit_bool) => Some(lit_bool.value.to_string()),
                        other => {
                            return Err(syn::Error::new_spanned(other, "unsupported literal"));
                        }
                    },
                    other => return Err(syn::Error::new_spanned(other, "expected a literal")),
                };
                parsed_args.push((ident, value));
            }
            Meta::List(list) => {
                return Err(syn::Error::new_spanned(list, "unexpected argument list"));
            }
        }
    }

    Ok(parsed_args)
}

/// 类型路径的最后一段名称
pub fn last_segment_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

/// 从类型中提取唯一的泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if let PathArguments::AngleBracketed(args) = &segment.arguments {
                if args.args.len() == 1 {
                    if let Some(GenericArgument::Type(inner_type)) = args.args.first() {
                        return Some(inner_type);
                    }
                }
            }
        }
    }
    None
}

/// `wrapper<T>` 形式时返回 `T`
pub fn unwrap_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if last_segment_name(ty).as_deref() == Some(wrapper) {
        extract_generic_type(ty)
    } else {
        None
    }
}

/// 检查类型是否为 Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    last_segment_name(ty).as_deref() == Some("Option")
}
