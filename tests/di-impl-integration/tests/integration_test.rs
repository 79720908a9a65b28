//! 注入器端到端测试


use common::*;
use di_abstractions::{Injector, Overrides};
use di_impl::ArrayContainerAdapter;
use infrastructure_common::{CallError, InjectorError, Value};
use std::sync::Arc;

#[test]
fn test_create_no_constructor() {
    let injector = injector();
    let instance = injector.create(NO_CONSTRUCTOR, Overrides::new()).unwrap();

    assert_eq!(instance.class_name(), NO_CONSTRUCTOR);
    assert_eq!(instance.downcast_ref::<NoConstructor>().unwrap().age(), 5);
}

#[test]
fn test_create_no_constructor_ignores_container() {
    let container = ArrayContainerAdapter::empty().with(NO_CONSTRUCTOR, "not an object");
    let injector = injector_with(container);

    let instance = injector.create(NO_CONSTRUCTOR, Overrides::new()).unwrap();
    assert!(instance.is::<NoConstructor>());
}

#[test]
fn test_create_private_constructor() {
    let container = ArrayContainerAdapter::empty().with(SERVICE_CACHE, memory_cache());
    let injector = injector_with(container);
    injector.add_auto_create(".*").unwrap();

    let error = injector
        .create(PRIVATE_CONSTRUCTOR, Overrides::new())
        .unwrap_err();
    assert!(error.as_invocation().is_some());
    assert!(error.to_string().contains("constructor isn't public"));
}

#[test]
fn test_auto_create_allow_list() {
    let injector = injector();
    injector.add_auto_create(r"Shipping::.*").unwrap();

    assert_eq!(injector.get_auto_create_allow_list(), vec![r"Shipping::.*"]);
    assert!(injector.can_auto_create("Shipping::AusPost::StampCalculator"));
    assert!(injector.can_auto_create("shipping::auspost::StampCalculator"));
    assert!(!injector.can_auto_create("Order::Address::Digital"));
}

#[test]
fn test_create_from_overrides() {
    let cache = memory_cache();
    let dependency = dependency();
    let injector = injector();

    let instance = injector
        .create_as::<SimpleConstructor>(
            SIMPLE_CONSTRUCTOR,
            Overrides::new()
                .named("cache", cache.clone())
                .typed(DEPENDENCY, dependency.clone())
                .indexed(2, "bob"),
        )
        .unwrap();

    assert!(instance.cache.ptr_eq(&cache));
    assert!(Arc::ptr_eq(
        &instance.dependency,
        &dependency.downcast::<Dependency>().unwrap()
    ));
    assert_eq!(instance.name, "bob");
    assert_eq!(instance.age, 25);
    assert!(instance.args.is_empty());
}

#[test]
fn test_name_override_wins_over_index_and_type() {
    let by_name = memory_cache();
    let by_index = memory_cache();
    let by_type = memory_cache();
    let injector = injector();

    let create = |overrides: Overrides| {
        injector
            .create_as::<NullableParameterConstructor>(
                NULLABLE_PARAMETER,
                overrides.typed(DEPENDENCY, dependency()),
            )
            .unwrap()
            .cache
            .clone()
            .unwrap()
    };

    let cache = create(
        Overrides::new()
            .typed(SERVICE_CACHE, by_type.clone())
            .indexed(0, by_index.clone())
            .named("cache", by_name.clone()),
    );
    assert!(cache.ptr_eq(&by_name));

    let cache = create(
        Overrides::new()
            .typed(SERVICE_CACHE, by_type.clone())
            .indexed(0, by_index.clone()),
    );
    assert!(cache.ptr_eq(&by_index));

    let cache = create(Overrides::new().typed(SERVICE_CACHE, by_type.clone()));
    assert!(cache.ptr_eq(&by_type));
}

#[test]
fn test_container_is_consulted_after_overrides() {
    let from_container = memory_cache();
    let from_override = memory_cache();
    let container = ArrayContainerAdapter::empty()
        .with(SERVICE_CACHE, from_container.clone())
        .with(DEPENDENCY, dependency());
    let injector = injector_with(container);

    let instance = injector
        .create_as::<NullableParameterConstructor>(NULLABLE_PARAMETER, Overrides::new())
        .unwrap();
    assert!(instance.cache.as_ref().unwrap().ptr_eq(&from_container));

    let instance = injector
        .create_as::<NullableParameterConstructor>(
            NULLABLE_PARAMETER,
            Overrides::new().typed(SERVICE_CACHE, from_override.clone()),
        )
        .unwrap();
    assert!(instance.cache.as_ref().unwrap().ptr_eq(&from_override));
}

#[test]
fn test_create_variadic_parameter_does_not_source_from_container() {
    let container = ArrayContainerAdapter::empty().with(DUMMY_STRING, dummy_string("hello"));
    let injector = injector_with(container);

    let instance = injector
        .create_as::<VariadicConstructor>(VARIADIC_CONSTRUCTOR, Overrides::new())
        .unwrap();
    assert!(instance.args.is_empty());
}

#[test]
fn test_create_variadic_parameter_only() {
    let injector = injector();
    let instance = injector
        .create_as::<VariadicConstructor>(
            VARIADIC_CONSTRUCTOR,
            Overrides::new()
                .with(dummy_string("hello"))
                .with(dummy_string("world")),
        )
        .unwrap();

    let values: Vec<&str> = instance.args.iter().map(|arg| arg.value.as_str()).collect();
    assert_eq!(values, vec!["hello", "world"]);
}

#[test]
fn test_create_both_normal_and_variadic_parameters() {
    let cache = memory_cache();
    let injector = injector();

    let instance = injector
        .create_as::<SimpleConstructor>(
            SIMPLE_CONSTRUCTOR,
            Overrides::new()
                .named("cache", cache.clone())
                .typed(DEPENDENCY, dependency())
                .indexed(2, "bob")
                .indexed(3, 10)
                .with("hello")
                .with("world"),
        )
        .unwrap();

    assert!(instance.cache.ptr_eq(&cache));
    assert_eq!(instance.name, "bob");
    assert_eq!(instance.age, 10);
    assert_eq!(instance.args, vec!["hello", "world"]);
}

#[test]
fn test_unconsumed_named_override_is_rejected_by_variadic() {
    let injector = injector();
    let error = injector
        .create(
            VARIADIC_CONSTRUCTOR,
            Overrides::new()
                .with(dummy_string("hello"))
                .named("ghost_parameter", 11),
        )
        .unwrap_err();

    assert!(matches!(
        error,
        InjectorError::Call(CallError::UnknownNamedParameter { ref name, .. })
            if name == "ghost_parameter"
    ));
}

#[test]
fn test_variadic_type_is_checked() {
    let injector = injector();
    let error = injector
        .create(VARIADIC_CONSTRUCTOR, Overrides::new().with("plain string"))
        .unwrap_err();

    assert!(matches!(error, InjectorError::Call(CallError::TypeMismatch { .. })));
}

#[test]
fn test_create_from_container() {
    let cache = memory_cache();
    let dependency = dependency();
    let container = ArrayContainerAdapter::empty()
        .with(SERVICE_CACHE, cache.clone())
        .with(DEPENDENCY, dependency.clone());
    let injector = injector_with(container);

    let instance = injector
        .create_as::<SimpleConstructor>(SIMPLE_CONSTRUCTOR, Overrides::new().indexed(2, "bob"))
        .unwrap();

    assert!(instance.cache.ptr_eq(&cache));
    assert!(Arc::ptr_eq(
        &instance.dependency,
        &dependency.downcast::<Dependency>().unwrap()
    ));
    assert_eq!(instance.age, 25);
}

#[test]
fn test_auto_create() {
    let injector = injector();
    injector.add_auto_create(".*?Dependency").unwrap();

    let instance = injector
        .create_as::<SimpleConstructor>(
            SIMPLE_CONSTRUCTOR,
            Overrides::new()
                .typed(SERVICE_CACHE, memory_cache())
                .indexed(2, "bob"),
        )
        .unwrap();

    assert!(instance.dependency.enabled);
    assert!(instance.dependency.dependency.enabled);
    assert_eq!(instance.name, "bob");
    assert_eq!(instance.age, 25);
}

#[test]
fn test_auto_create_failure_is_chained() {
    let injector = injector();
    injector.add_auto_create(".*?::Dependency").unwrap();

    let error = injector
        .create(
            SIMPLE_CONSTRUCTOR,
            Overrides::new()
                .typed(SERVICE_CACHE, memory_cache())
                .indexed(2, "bob"),
        )
        .unwrap_err();

    let message = error.as_invocation().unwrap().message().to_string();
    let cant_create = message.find(&format!("Can't create {}", DEPENDENCY)).unwrap();
    let missing = message
        .find(&format!("missing parameter 'dependency [{}]'", SUB_DEPENDENCY))
        .unwrap();
    let called = message
        .find(&format!("(called when creating {})", SIMPLE_CONSTRUCTOR))
        .unwrap();
    assert!(cant_create < missing && missing < called);
    assert_eq!(error.as_invocation().unwrap().chain_depth(), 1);
}

#[test]
fn test_create_missing_parameter() {
    let injector = injector();
    let error = injector
        .create(SIMPLE_CONSTRUCTOR, Overrides::new())
        .unwrap_err();

    assert!(error
        .to_string()
        .contains(&format!("missing parameter 'cache [{}]'", SERVICE_CACHE)));
}

#[test]
fn test_nullable_parameter_accepts_explicit_null() {
    let injector = injector();
    let instance = injector
        .create_as::<NullableParameterConstructor>(
            NULLABLE_PARAMETER,
            Overrides::new()
                .named("cache", Value::Null)
                .typed(DEPENDENCY, dependency()),
        )
        .unwrap();

    assert!(instance.cache.is_none());
}

#[test]
fn test_invoke_on_non_object() {
    let injector = injector();
    let error = injector
        .invoke(&Value::List(vec![]), "new", Overrides::new())
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "Attempted Injector::invoke on a non-object: list."
    );
}

#[test]
fn test_invoke_parameters() {
    let injector = injector();
    let instance = Value::Object(injector.create(NO_CONSTRUCTOR, Overrides::new()).unwrap());

    injector
        .invoke(&instance, "set_age", Overrides::new().named("age", 90))
        .unwrap();
    let age = injector
        .invoke(&instance, "get_age", Overrides::new())
        .unwrap();
    assert_eq!(age, Value::Int(90));
}

#[test]
fn test_invoke_missing_required_parameter() {
    let injector = injector();
    let instance = Value::Object(injector.create(NO_CONSTRUCTOR, Overrides::new()).unwrap());

    let error = injector
        .invoke(&instance, "set_age", Overrides::new())
        .unwrap_err();
    let message = error.to_string();
    assert!(message.contains(&format!("Can't invoke method {}::set_age", NO_CONSTRUCTOR)));
    assert!(message.contains("missing parameter 'age'"));
}

#[test]
fn test_invoke_invalid_method() {
    let injector = injector();
    let instance = Value::Object(injector.create(NO_CONSTRUCTOR, Overrides::new()).unwrap());

    let error = injector
        .invoke(&instance, "set_name", Overrides::new())
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        format!("Failed to invoke {}::set_name - method doesn't exist.", NO_CONSTRUCTOR)
    );
}

#[test]
fn test_invoke_dynamic_dispatch_passes_overrides_through() {
    let injector = injector();
    let magic = Value::Object(injector.create(MAGIC, Overrides::new()).unwrap());

    let result = injector
        .invoke(&magic, "anything", Overrides::new().with(1).named("flag", true))
        .unwrap();
    assert_eq!(result.as_str(), Some("anything(int, flag=bool)"));
}
