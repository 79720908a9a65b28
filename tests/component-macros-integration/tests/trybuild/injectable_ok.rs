use component_macros::injectable;
use di_abstractions::{ClassCatalog, Reflect};
use infrastructure_common::Value;
use std::sync::Arc;

#[derive(Default)]
pub struct Clock;

#[injectable]
impl Clock {
    pub fn now(&self) -> i64 {
        42
    }
}

pub struct Greeter {
    clock: Arc<Clock>,
    greeting: String,
}

#[injectable(implements = "app::Greeting, app::Named")]
impl Greeter {
    pub fn new(clock: Arc<Clock>, #[default("hello")] greeting: String) -> Self {
        Self { clock, greeting }
    }

    pub fn greet(&self, name: String, punctuation: Value) -> String {
        format!("{}, {}{}", self.greeting, name, punctuation.describe())
    }

    fn tick(&self) -> i64 {
        self.clock.now()
    }
}

fn main() {
    let catalog = ClassCatalog::new();
    catalog.register_type::<Clock>();
    catalog.register_type::<Greeter>();
    assert_eq!(catalog.len(), 2);
    assert_eq!(Greeter::class_definition().interfaces().len(), 2);
}
