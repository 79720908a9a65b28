//! 内省层端到端测试


use common::*;
use di_abstractions::{
    ClassDescriptor, ClassInspector, ClassInspectorStats, ParameterDescriptor, ServiceCache,
};
use di_impl::{
    ArrayServiceCache, CachingClassInspector, ClassInspectorImpl, ParameterInspector,
    ReflectionClassCache,
};
use infrastructure_common::{ReflectionError, Value};
use std::sync::Arc;

fn class_inspector(capacity: usize) -> Arc<ClassInspectorImpl> {
    Arc::new(ClassInspectorImpl::new(
        ReflectionClassCache::new(capacity).unwrap(),
        ParameterInspector::new(catalog()),
        Arc::new(ClassInspectorStats::new()),
    ))
}

#[test]
fn test_descriptor_cache_is_fifo() {
    let catalog = catalog();
    let cache = ReflectionClassCache::new(2).unwrap();
    for class in [NO_CONSTRUCTOR, DEPENDENCY, SUB_DEPENDENCY] {
        cache.put(Arc::new(catalog.reflect(class).unwrap()));
    }

    assert_eq!(cache.count(), 2);
    assert!(!cache.has(NO_CONSTRUCTOR));
    assert!(cache.has(DEPENDENCY));
    assert!(cache.has(SUB_DEPENDENCY));
}

#[test]
fn test_signature_extraction() {
    let inspector = class_inspector(10);
    let signature = inspector
        .get_method_signature(SIMPLE_CONSTRUCTOR, "new")
        .unwrap();

    let parameters: Vec<ParameterDescriptor> = signature.parameters().to_vec();
    assert_eq!(
        parameters,
        vec![
            ParameterDescriptor::new("cache").with_type(SERVICE_CACHE),
            ParameterDescriptor::new("dummy_dependency").with_type(DEPENDENCY),
            ParameterDescriptor::new("name"),
            ParameterDescriptor::new("age").with_default(Value::Int(25)),
            ParameterDescriptor::new("args").variadic(),
        ]
    );
}

#[test]
fn test_caching_inspector_shares_cold_counter() {
    let inner = class_inspector(10);
    let service_cache = Arc::new(ArrayServiceCache::new());
    let inspector = CachingClassInspector::new(inner.clone(), service_cache.clone());

    for _ in 0..3 {
        inspector.warm_cache(SIMPLE_CONSTRUCTOR, "new").unwrap();
        inspector.warm_cache(PRIVATE_CONSTRUCTOR, "new").unwrap();
        inspector.warm_cache(NO_CONSTRUCTOR, "new").unwrap();
    }

    assert_eq!(inspector.stats().reflection_classes_created(), 3);
    assert_eq!(inner.stats().reflection_classes_created(), 3);
    assert!(service_cache.has(&format!("{}::new::signature", SIMPLE_CONSTRUCTOR)));
    assert!(!service_cache.has(&format!("{}::new::signature", PRIVATE_CONSTRUCTOR)));
    assert!(!service_cache.has(&format!("{}::new::is_public", NO_CONSTRUCTOR)));
}

#[test]
fn test_failed_lookup_is_retried() {
    let inner = class_inspector(10);
    let service_cache = Arc::new(ArrayServiceCache::new());
    let inspector = CachingClassInspector::new(inner, service_cache.clone());

    for _ in 0..2 {
        let error = inspector.method_is_public(NO_CONSTRUCTOR, "new").unwrap_err();
        assert_eq!(error, ReflectionError::method_not_found(NO_CONSTRUCTOR, "new"));
    }
    assert!(service_cache.is_empty());
}

#[test]
fn test_reflect_through_caching_inspector() {
    let inspector =
        CachingClassInspector::new(class_inspector(1), Arc::new(ArrayServiceCache::new()));

    let first: Arc<ClassDescriptor> = inspector.reflect(DEPENDENCY).unwrap();
    let second = inspector.reflect(DEPENDENCY).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(inspector.stats().reflection_classes_created(), 1);

    inspector.reflect(SUB_DEPENDENCY).unwrap();
    let third = inspector.reflect(DEPENDENCY).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(inspector.stats().reflection_classes_created(), 3);
}
