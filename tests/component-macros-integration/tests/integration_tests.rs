//! 可注入类型宏集成测试

use component_macros::injectable;
use di_abstractions::{
    ClassCatalog, ClassInspector, Injector, Overrides, ParameterDescriptor, Reflect, Visibility,
};
use di_impl::{ArrayContainerAdapter, InjectorBuilder, InjectorImpl};
use infrastructure_common::{InjectorError, Object, Value};
use std::any::type_name;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// 测试用数据库连接
#[derive(Debug, Default)]
pub struct Connection {
    queries: AtomicI64,
}

#[injectable(implements = "app::Connection")]
impl Connection {
    pub fn query(&self, sql: String) -> String {
        self.queries.fetch_add(1, Ordering::SeqCst);
        format!("ok: {}", sql)
    }

    pub fn queries(&self) -> i64 {
        self.queries.load(Ordering::SeqCst)
    }
}

/// 测试用仓储
#[derive(Debug)]
pub struct Repository {
    connection: Arc<Connection>,
    table: String,
    page_size: i64,
}

#[injectable]
impl Repository {
    pub fn new(
        connection: Arc<Connection>,
        table: String,
        #[default(20)] page_size: i64,
    ) -> Self {
        Self {
            connection,
            table,
            page_size,
        }
    }

    pub fn describe(&self) -> String {
        format!("{}:{}", self.table, self.page_size)
    }

    pub fn connection(&self) -> Arc<Connection> {
        self.connection.clone()
    }

    pub fn rename(&self, table: String) -> Result<String, std::fmt::Error> {
        Ok(format!("{} -> {}", self.table, table))
    }

    fn secret(&self) -> i64 {
        7
    }
}

/// 测试用插件
#[derive(Debug)]
pub struct Plugin {
    name: String,
}

#[injectable]
impl Plugin {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// 测试用插件宿主
#[derive(Debug)]
pub struct Host {
    audit: Option<Arc<Connection>>,
    plugins: Vec<Arc<Plugin>>,
}

#[injectable]
impl Host {
    pub fn new(
        #[default(())] audit: Option<Arc<Connection>>,
        #[variadic] plugins: Vec<Arc<Plugin>>,
    ) -> Self {
        Self { audit, plugins }
    }

    pub fn plugin_names(&self) -> Value {
        Value::List(
            self.plugins
                .iter()
                .map(|plugin| Value::from(plugin.name.as_str()))
                .collect(),
        )
    }
}

/// 构造函数不公开
#[derive(Debug)]
pub struct Locked;

#[injectable]
impl Locked {
    fn new() -> Self {
        Self
    }
}

fn catalog() -> Arc<ClassCatalog> {
    let catalog = ClassCatalog::new();
    catalog.register_type::<Connection>();
    catalog.register_type::<Repository>();
    catalog.register_type::<Plugin>();
    catalog.register_type::<Host>();
    catalog.register_type::<Locked>();
    Arc::new(catalog)
}

fn injector() -> InjectorImpl {
    InjectorBuilder::new(catalog())
        .auto_create(".*::Connection")
        .build()
        .expect("injector should build")
}

#[test]
fn test_generated_class_definition() {
    let definition = Repository::class_definition();

    assert_eq!(definition.name(), type_name::<Repository>());
    let names: Vec<&str> = definition.methods().iter().map(|method| method.name()).collect();
    assert_eq!(names, vec!["new", "describe", "connection", "rename", "secret"]);

    let constructor = &definition.methods()[0];
    assert!(constructor.is_constructor());
    assert_eq!(constructor.visibility(), Visibility::Public);
    assert_eq!(definition.methods()[4].visibility(), Visibility::Private);
    assert_eq!(Connection::class_definition().interfaces(), ["app::Connection"]);
}

#[test]
fn test_generated_signature() {
    let injector = injector();
    let signature = injector
        .inspector()
        .get_method_signature(type_name::<Repository>(), "new")
        .unwrap();

    assert_eq!(
        signature.parameters().to_vec(),
        vec![
            ParameterDescriptor::new("connection").with_type(type_name::<Connection>()),
            ParameterDescriptor::new("table"),
            ParameterDescriptor::new("page_size").with_default(Value::Int(20)),
        ]
    );
}

#[test]
fn test_create_with_auto_created_dependency() {
    let injector = injector();
    let repository = injector
        .create_as::<Repository>(
            type_name::<Repository>(),
            Overrides::new().named("table", "orders"),
        )
        .unwrap();

    assert_eq!(repository.describe(), "orders:20");
    assert_eq!(repository.connection.queries(), 0);
}

#[test]
fn test_create_with_container_dependency() {
    let connection = Object::of(Connection::default()).with_interfaces(["app::Connection"]);
    let container =
        ArrayContainerAdapter::empty().with(type_name::<Connection>(), connection.clone());
    let injector = InjectorBuilder::new(catalog())
        .container(Arc::new(container))
        .build()
        .unwrap();

    let repository = injector
        .create_as::<Repository>(
            type_name::<Repository>(),
            Overrides::new().indexed(1, "users").indexed(2, 50),
        )
        .unwrap();
    assert_eq!(repository.describe(), "users:50");
    assert!(Arc::ptr_eq(
        &repository.connection,
        &connection.downcast::<Connection>().unwrap()
    ));
}

#[test]
fn test_type_override_supplies_dependency() {
    let connection = Object::of(Connection::default());
    let injector = InjectorBuilder::new(catalog()).build().unwrap();

    let repository = injector
        .create_as::<Repository>(
            type_name::<Repository>(),
            Overrides::new()
                .typed_as::<Connection>(connection.clone())
                .named("table", "audit"),
        )
        .unwrap();
    assert_eq!(repository.describe(), "audit:20");
    assert!(Arc::ptr_eq(
        &repository.connection,
        &connection.downcast::<Connection>().unwrap()
    ));
}

#[test]
fn test_invoke_generated_methods() {
    let injector = injector();
    let connection = Value::Object(
        injector
            .create(type_name::<Connection>(), Overrides::new())
            .unwrap(),
    );

    let result = injector
        .invoke(&connection, "query", Overrides::new().named("sql", "select 1"))
        .unwrap();
    assert_eq!(result.as_str(), Some("ok: select 1"));
    assert_eq!(
        injector
            .invoke(&connection, "queries", Overrides::new())
            .unwrap(),
        Value::Int(1)
    );
}

#[test]
fn test_invoke_converts_return_values() {
    let injector = injector();
    let repository = Value::Object(
        injector
            .create(
                type_name::<Repository>(),
                Overrides::new().named("table", "orders"),
            )
            .unwrap(),
    );

    let connection = injector
        .invoke(&repository, "connection", Overrides::new())
        .unwrap();
    let connection = connection.as_object().unwrap();
    assert_eq!(connection.class_name(), type_name::<Connection>());
    assert!(connection.is::<Connection>());

    let renamed = injector
        .invoke(&repository, "rename", Overrides::new().with("archive"))
        .unwrap();
    assert_eq!(renamed.as_str(), Some("orders -> archive"));
}

#[test]
fn test_private_method_is_not_invoked() {
    let injector = injector();
    let repository = Value::Object(
        injector
            .create(
                type_name::<Repository>(),
                Overrides::new().named("table", "orders"),
            )
            .unwrap(),
    );

    let error = injector
        .invoke(&repository, "secret", Overrides::new())
        .unwrap_err();
    assert!(matches!(error, InjectorError::Call(_)));
}

#[test]
fn test_variadic_and_nullable_parameters() {
    let injector = injector();
    let plugins = ["audit", "metrics"].map(|name| {
        injector
            .create(type_name::<Plugin>(), Overrides::new().with(name))
            .unwrap()
    });

    let host = injector
        .create_as::<Host>(
            type_name::<Host>(),
            Overrides::new()
                .with(Value::Null)
                .with(plugins[0].clone())
                .with(plugins[1].clone()),
        )
        .unwrap();

    assert!(host.audit.is_none());
    let names: Vec<&str> = host.plugins.iter().map(|plugin| plugin.name.as_str()).collect();
    assert_eq!(names, vec!["audit", "metrics"]);
}

#[test]
fn test_nullable_parameter_defaults_to_none() {
    let injector = InjectorBuilder::new(catalog()).build().unwrap();
    let host = injector
        .create_as::<Host>(type_name::<Host>(), Overrides::new())
        .unwrap();

    assert!(host.audit.is_none());
    assert!(host.plugins.is_empty());
}

#[test]
fn test_private_constructor_is_rejected() {
    let injector = injector();
    let error = injector
        .create(type_name::<Locked>(), Overrides::new())
        .unwrap_err();

    assert!(error.to_string().contains("constructor isn't public"));
}
