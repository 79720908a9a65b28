//! 可注入类型宏实现

use crate::utils::{is_option_type, last_segment_name, parse_attribute_args, unwrap_type};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Attribute, Expr,
    FnArg, ImplItem, ImplItemFn, ItemImpl, Meta, Pat, PatType, Result, ReturnType, Token, Type,
    Visibility,
};

/// 宏参数
#[derive(Debug, Clone, Default)]
pub struct InjectableArgs {
    /// 声明实现的接口
    pub implements: Vec<String>,
}

impl Parse for InjectableArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = InjectableArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            for (key, value) in parse_attribute_args(vec![meta.clone()])? {
                match (key.as_str(), value) {
                    ("implements", Some(list)) => {
                        args.implements.extend(
                            list.split(',')
                                .map(str::trim)
                                .filter(|name| !name.is_empty())
                                .map(str::to_string),
                        );
                    }
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &meta,
                            "unsupported argument, expected `implements = \"...\"`",
                        ));
                    }
                }
            }
        }

        Ok(args)
    }
}

/// 参数在类元数据中的形态
enum ParameterKind {
    /// `Arc<T>`
    Object(Type),
    /// `Option<Arc<T>>`
    OptionalObject(Type),
    /// `i64` / `f64` / `bool` / `String`
    Builtin(&'static str),
    /// 未声明类型的 `Value`
    Untyped,
    /// `#[variadic] Vec<Value>`
    VariadicValues,
    /// `#[variadic] Vec<Arc<T>>`
    VariadicObjects(Type),
}

struct Parameter {
    name: String,
    kind: ParameterKind,
    default: Option<Expr>,
}

impl Parameter {
    fn definition(&self) -> TokenStream2 {
        let name = &self.name;
        let mut tokens = quote! { ::di_abstractions::ParameterDefinition::new(#name) };

        match &self.kind {
            ParameterKind::Object(inner) => {
                tokens.extend(quote! { .with_class(::std::any::type_name::<#inner>()) });
            }
            ParameterKind::OptionalObject(inner) => {
                tokens.extend(
                    quote! { .with_class(::std::any::type_name::<#inner>()).nullable() },
                );
            }
            ParameterKind::Builtin(builtin) => {
                tokens.extend(quote! { .with_builtin(#builtin) });
            }
            ParameterKind::Untyped => {}
            ParameterKind::VariadicValues => tokens.extend(quote! { .variadic() }),
            ParameterKind::VariadicObjects(inner) => {
                tokens.extend(
                    quote! { .with_class(::std::any::type_name::<#inner>()).variadic() },
                );
            }
        }

        if let Some(default) = &self.default {
            tokens.extend(quote! {
                .with_default_fn(|| ::infrastructure_common::Value::from(#default))
            });
        }

        tokens
    }

    fn extraction(&self, position: usize) -> TokenStream2 {
        match &self.kind {
            ParameterKind::Object(inner) => quote! { __args.object::<#inner>(#position)? },
            ParameterKind::OptionalObject(inner) => {
                quote! { __args.optional_object::<#inner>(#position)? }
            }
            ParameterKind::Builtin("int") => quote! { __args.int(#position)? },
            ParameterKind::Builtin("float") => quote! { __args.float(#position)? },
            ParameterKind::Builtin("bool") => quote! { __args.bool(#position)? },
            ParameterKind::Builtin(_) => quote! { __args.string(#position)? },
            ParameterKind::Untyped => quote! { __args.value(#position)?.clone() },
            ParameterKind::VariadicValues => quote! { __args.variadic().to_vec() },
            ParameterKind::VariadicObjects(inner) => {
                quote! { __args.variadic_objects::<#inner>()? }
            }
        }
    }
}

/// 展开 `#[injectable]`，为固有 impl 块生成 `Reflect` 实现
pub fn injectable_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as InjectableArgs);
    let item = parse_macro_input!(input as ItemImpl);

    match expand(args, item) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(args: InjectableArgs, mut item: ItemImpl) -> Result<TokenStream2> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[injectable] must be placed on an inherent impl block",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[injectable] does not support generic types",
        ));
    }

    let self_ty = (*item.self_ty).clone();
    let mut constructor = None;
    let mut methods = Vec::new();

    for impl_item in item.items.iter_mut() {
        let ImplItem::Fn(function) = impl_item else {
            continue;
        };

        if function.sig.ident == "new" {
            constructor = Some(constructor_definition(&self_ty, function)?);
        } else if has_shared_receiver(function) {
            methods.push(method_definition(&self_ty, function)?);
        }
    }

    let interfaces = args.implements.iter();
    let constructor = constructor.unwrap_or_else(|| {
        quote! {
            .without_constructor(<#self_ty as ::std::default::Default>::default)
        }
    });

    Ok(quote! {
        #item

        impl ::di_abstractions::Reflect for #self_ty {
            fn class_definition() -> ::di_abstractions::ClassDefinition {
                ::di_abstractions::ClassDefinition::of::<#self_ty>()
                    #(.implements(#interfaces))*
                    #constructor
                    #(#methods)*
            }
        }
    })
}

fn constructor_definition(self_ty: &Type, function: &mut ImplItemFn) -> Result<TokenStream2> {
    if function.sig.receiver().is_some() {
        return Err(syn::Error::new_spanned(
            &function.sig,
            "`new` must be an associated function without a receiver",
        ));
    }
    match &function.sig.output {
        ReturnType::Type(_, ty) if returns_self(ty, self_ty) => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &function.sig,
                "`new` must return `Self`",
            ));
        }
    }

    let parameters = collect_parameters(function)?;
    let visibility = visibility_tokens(&function.vis);
    let definitions = parameters.iter().map(Parameter::definition);
    let extractions = parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| parameter.extraction(position));

    Ok(quote! {
        .with_method(
            ::di_abstractions::MethodDefinition::constructor(
                |__args: ::di_abstractions::Arguments| {
                    ::std::result::Result::Ok(<#self_ty>::new(#(#extractions),*))
                },
            )
            .with_visibility(#visibility)
            #(.with_parameter(#definitions))*
        )
    })
}

fn method_definition(self_ty: &Type, function: &mut ImplItemFn) -> Result<TokenStream2> {
    let parameters = collect_parameters(function)?;
    let ident = &function.sig.ident;
    let name = ident.to_string();
    let visibility = visibility_tokens(&function.vis);
    let definitions = parameters.iter().map(Parameter::definition);
    let extractions: Vec<TokenStream2> = parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| parameter.extraction(position))
        .collect();
    let call = quote! { __receiver.#ident(#(#extractions),*) };
    let result = return_conversion(&function.sig.output, call);
    let mismatch = format!("receiver is not a {}", quote!(#self_ty));

    Ok(quote! {
        .with_method(
            ::di_abstractions::MethodDefinition::method(
                #name,
                |__this: &::infrastructure_common::Object, __args: ::di_abstractions::Arguments| {
                    let __receiver = __this.downcast_ref::<#self_ty>().ok_or_else(|| {
                        ::infrastructure_common::CallError::failed(__args.callable(), #mismatch)
                    })?;
                    #result
                },
            )
            .with_visibility(#visibility)
            #(.with_parameter(#definitions))*
        )
    })
}

fn return_conversion(output: &ReturnType, call: TokenStream2) -> TokenStream2 {
    let ty = match output {
        ReturnType::Default => {
            return quote! {
                #call;
                ::std::result::Result::Ok(::infrastructure_common::Value::Null)
            };
        }
        ReturnType::Type(_, ty) => ty,
    };

    if let Some(inner) = unwrap_type(ty, "Arc") {
        return quote! {
            let __shared: ::std::sync::Arc<dyn ::std::any::Any + Send + Sync> = #call;
            ::std::result::Result::Ok(::infrastructure_common::Value::Object(
                ::infrastructure_common::Object::from_shared(
                    ::std::any::type_name::<#inner>(),
                    __shared,
                ),
            ))
        };
    }

    if last_segment_name(ty).as_deref() == Some("Result") {
        return quote! {
            let __value = #call.map_err(|error| {
                ::infrastructure_common::CallError::failed(__args.callable(), error.to_string())
            })?;
            ::std::result::Result::Ok(::infrastructure_common::Value::from(__value))
        };
    }

    quote! {
        ::std::result::Result::Ok(::infrastructure_common::Value::from(#call))
    }
}

fn collect_parameters(function: &mut ImplItemFn) -> Result<Vec<Parameter>> {
    let mut parameters = Vec::new();
    let total = function
        .sig
        .inputs
        .iter()
        .filter(|input| matches!(input, FnArg::Typed(_)))
        .count();

    for input in function.sig.inputs.iter_mut() {
        let FnArg::Typed(pat_type) = input else {
            continue;
        };
        let position = parameters.len();
        let parameter = parameter_from(pat_type, position)?;

        if matches!(
            parameter.kind,
            ParameterKind::VariadicValues | ParameterKind::VariadicObjects(_)
        ) && position + 1 != total
        {
            return Err(syn::Error::new_spanned(
                pat_type,
                "#[variadic] must be the last parameter",
            ));
        }
        parameters.push(parameter);
    }

    Ok(parameters)
}

fn parameter_from(pat_type: &mut PatType, position: usize) -> Result<Parameter> {
    let (default, variadic) = take_parameter_attributes(&mut pat_type.attrs)?;
    let name = match pat_type.pat.as_ref() {
        Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
        _ => format!("arg{}", position),
    };
    let ty = pat_type.ty.as_ref();

    let kind = if variadic {
        let element = unwrap_type(ty, "Vec").ok_or_else(|| {
            syn::Error::new_spanned(ty, "#[variadic] requires `Vec<Value>` or `Vec<Arc<T>>`")
        })?;
        if let Some(inner) = unwrap_type(element, "Arc") {
            ParameterKind::VariadicObjects(inner.clone())
        } else if last_segment_name(element).as_deref() == Some("Value") {
            ParameterKind::VariadicValues
        } else {
            return Err(syn::Error::new_spanned(
                ty,
                "#[variadic] requires `Vec<Value>` or `Vec<Arc<T>>`",
            ));
        }
    } else if let Some(inner) = unwrap_type(ty, "Arc") {
        ParameterKind::Object(inner.clone())
    } else if is_option_type(ty) {
        let inner = unwrap_type(ty, "Option")
            .and_then(|ty| unwrap_type(ty, "Arc"))
            .ok_or_else(|| {
                syn::Error::new_spanned(ty, "optional parameters must be `Option<Arc<T>>`")
            })?;
        ParameterKind::OptionalObject(inner.clone())
    } else {
        match last_segment_name(ty).as_deref() {
            Some("i64") => ParameterKind::Builtin("int"),
            Some("f64") => ParameterKind::Builtin("float"),
            Some("bool") => ParameterKind::Builtin("bool"),
            Some("String") => ParameterKind::Builtin("string"),
            Some("Value") => ParameterKind::Untyped,
            _ => {
                return Err(syn::Error::new_spanned(
                    ty,
                    "unsupported parameter type, expected `Arc<T>`, `Option<Arc<T>>`, `i64`, `f64`, `bool`, `String` or `Value`",
                ));
            }
        }
    };

    if default.is_some()
        && matches!(
            kind,
            ParameterKind::VariadicValues | ParameterKind::VariadicObjects(_)
        )
    {
        return Err(syn::Error::new_spanned(
            pat_type,
            "a #[variadic] parameter cannot have a default",
        ));
    }

    Ok(Parameter {
        name,
        kind,
        default,
    })
}

/// 取出并移除参数上的 `#[default(...)]` 和 `#[variadic]`
fn take_parameter_attributes(attrs: &mut Vec<Attribute>) -> Result<(Option<Expr>, bool)> {
    let mut default = None;
    let mut variadic = false;
    let mut kept = Vec::with_capacity(attrs.len());

    for attr in attrs.drain(..) {
        if attr.path().is_ident("default") {
            default = Some(attr.parse_args::<Expr>()?);
        } else if attr.path().is_ident("variadic") {
            attr.meta.require_path_only()?;
            variadic = true;
        } else {
            kept.push(attr);
        }
    }

    *attrs = kept;
    Ok((default, variadic))
}

fn has_shared_receiver(function: &ImplItemFn) -> bool {
    function
        .sig
        .receiver()
        .is_some_and(|receiver| receiver.reference.is_some() && receiver.mutability.is_none())
}

fn returns_self(ty: &Type, self_ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.path.is_ident("Self") => true,
        _ => quote!(#ty).to_string() == quote!(#self_ty).to_string(),
    }
}

fn visibility_tokens(visibility: &Visibility) -> TokenStream2 {
    match visibility {
        Visibility::Public(_) => quote! { ::di_abstractions::Visibility::Public },
        Visibility::Restricted(_) => quote! { ::di_abstractions::Visibility::Protected },
        Visibility::Inherited => quote! { ::di_abstractions::Visibility::Private },
    }
}
