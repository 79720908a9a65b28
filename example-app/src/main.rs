//! # 示例应用程序
//!
//! 演示即时依赖注入器：注册类元数据、按白名单自动创建依赖、调用实例方法。

use anyhow::Context;
use clap::Parser;
use component_macros::injectable;
use di_abstractions::{ClassCatalog, Injector, Overrides};
use di_impl::{ArrayContainerAdapter, InjectorFactory, InjectorSettings};
use infrastructure_common::Value;
use std::any::type_name;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "即时依赖注入器示例")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 目的地区域
    #[arg(long, default_value = "metro")]
    zone: String,

    /// 包裹重量（千克）
    #[arg(long, default_value_t = 2.0)]
    weight: f64,

    /// 承运商，可重复
    #[arg(long = "carrier")]
    carriers: Vec<String>,
}

/// 各区域的每千克费率
#[derive(Debug, Default)]
pub struct RateTable;

#[injectable]
impl RateTable {
    pub fn rate(&self, zone: String) -> f64 {
        match zone.as_str() {
            "metro" => 1.2,
            "regional" => 2.5,
            _ => 4.0,
        }
    }
}

/// 邮资计算器
#[derive(Debug)]
pub struct StampCalculator {
    rates: Arc<RateTable>,
    handling: f64,
}

#[injectable(implements = "shipping::Calculator")]
impl StampCalculator {
    pub fn new(rates: Arc<RateTable>, #[default(1.5)] handling: f64) -> Self {
        Self { rates, handling }
    }

    pub fn quote(&self, zone: String, weight: f64) -> f64 {
        self.handling + self.rates.rate(zone) * weight
    }
}

/// 发货调度器
#[derive(Debug)]
pub struct Dispatcher {
    calculator: Arc<StampCalculator>,
    carriers: Vec<Value>,
}

#[injectable]
impl Dispatcher {
    pub fn new(calculator: Arc<StampCalculator>, #[variadic] carriers: Vec<Value>) -> Self {
        Self {
            calculator,
            carriers,
        }
    }

    pub fn dispatch(&self, zone: String, weight: f64) -> String {
        let carrier = self
            .carriers
            .first()
            .and_then(Value::as_str)
            .unwrap_or("post");
        let cost = self.calculator.quote(zone.clone(), weight);
        format!("{} -> {} ({:.1}kg): {:.2}", carrier, zone, weight, cost)
    }
}

fn catalog() -> Arc<ClassCatalog> {
    let catalog = ClassCatalog::new();
    catalog.register_type::<RateTable>();
    catalog.register_type::<StampCalculator>();
    catalog.register_type::<Dispatcher>();
    Arc::new(catalog)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("启动即时依赖注入器示例");

    let mut settings =
        InjectorSettings::load(args.config.as_deref()).context("加载注入器配置失败")?;
    if settings.auto_create.is_empty() {
        settings.auto_create.push("example_app::.*".to_string());
    }

    let injector = InjectorFactory::from_settings(
        Arc::new(ArrayContainerAdapter::empty()),
        catalog(),
        &settings,
    )?;

    // 承运商从第二个参数位置开始进入可变参数
    let carriers = args
        .carriers
        .iter()
        .enumerate()
        .fold(Overrides::new(), |overrides, (position, carrier)| {
            overrides.indexed(position + 1, carrier.as_str())
        });
    let dispatcher = injector.create(type_name::<Dispatcher>(), carriers)?;
    info!("已创建 {}", dispatcher.class_name());

    let result = injector.invoke(
        &Value::Object(dispatcher),
        "dispatch",
        Overrides::new()
            .named("zone", args.zone.as_str())
            .named("weight", args.weight),
    )?;
    println!("{}", result.as_str().unwrap_or_default());

    info!(
        "冷反射次数: {}, 自动创建白名单: {:?}",
        injector.stats().reflection_classes_created(),
        injector.get_auto_create_allow_list()
    );
    Ok(())
}
