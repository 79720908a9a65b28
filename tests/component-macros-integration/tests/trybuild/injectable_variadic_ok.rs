use component_macros::injectable;
use infrastructure_common::Value;
use std::sync::Arc;

#[derive(Default)]
pub struct Plugin;

#[injectable]
impl Plugin {}

pub struct Registry {
    plugins: Vec<Arc<Plugin>>,
}

#[injectable]
impl Registry {
    pub fn new(#[variadic] plugins: Vec<Arc<Plugin>>) -> Self {
        Self { plugins }
    }

    pub fn count(&self) -> i64 {
        self.plugins.len() as i64
    }
}

pub struct Recorder {
    tags: Vec<Value>,
    optional: Option<Arc<Plugin>>,
}

#[injectable]
impl Recorder {
    pub(crate) fn new(
        #[default(())] optional: Option<Arc<Plugin>>,
        #[variadic] tags: Vec<Value>,
    ) -> Self {
        Self { tags, optional }
    }

    pub fn describe(&self) -> Result<String, std::fmt::Error> {
        Ok(format!("{} {}", self.tags.len(), self.optional.is_some()))
    }

    pub fn plugin(&self) -> Arc<Plugin> {
        self.optional.clone().unwrap_or_default()
    }

    pub fn reset(&self) {}
}

fn main() {}
