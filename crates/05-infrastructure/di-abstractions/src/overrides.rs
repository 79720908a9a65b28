//! 调用方提供的覆盖值
//!
//! 覆盖值可以按参数名、参数位置（从 0 开始）或声明的类型名作为键；
//! 类型名键与参数名键共用 [`OverrideKey::Name`]。

use infrastructure_common::Value;
use std::fmt;

/// 覆盖值的键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverrideKey {
    Name(String),
    Index(usize),
}

impl fmt::Display for OverrideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideKey::Name(name) => f.write_str(name),
            OverrideKey::Index(index) => write!(f, "#{}", index),
        }
    }
}

impl From<&str> for OverrideKey {
    fn from(name: &str) -> Self {
        OverrideKey::Name(name.to_string())
    }
}

impl From<String> for OverrideKey {
    fn from(name: String) -> Self {
        OverrideKey::Name(name)
    }
}

impl From<usize> for OverrideKey {
    fn from(index: usize) -> Self {
        OverrideKey::Index(index)
    }
}

/// 保持插入顺序的覆盖值集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    entries: Vec<(OverrideKey, Value)>,
}

impl Overrides {
    /// 创建空覆盖集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入覆盖值；键已存在时原位替换
    pub fn insert(&mut self, key: impl Into<OverrideKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// 追加无键的值，位置为现有最大位置加一
    pub fn push(&mut self, value: impl Into<Value>) {
        let next = self
            .entries
            .iter()
            .filter_map(|(key, _)| match key {
                OverrideKey::Index(index) => Some(index + 1),
                OverrideKey::Name(_) => None,
            })
            .max()
            .unwrap_or(0);
        self.entries.push((OverrideKey::Index(next), value.into()));
    }

    /// 按参数名覆盖
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(OverrideKey::Name(name.into()), value);
        self
    }

    /// 按参数位置覆盖
    pub fn indexed(mut self, index: usize, value: impl Into<Value>) -> Self {
        self.insert(OverrideKey::Index(index), value);
        self
    }

    /// 按声明的类型名覆盖
    pub fn typed(mut self, type_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(OverrideKey::Name(type_name.into()), value);
        self
    }

    /// 以 `T` 的完整路径作为类型名覆盖
    pub fn typed_as<T: ?Sized + 'static>(self, value: impl Into<Value>) -> Self {
        self.typed(std::any::type_name::<T>(), value)
    }

    /// 链式追加无键的值
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// 键在插入顺序中的位置
    pub fn position(&self, key: &OverrideKey) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == key)
    }

    /// 按键取值
    pub fn get(&self, key: &OverrideKey) -> Option<&Value> {
        self.position(key).map(|position| &self.entries[position].1)
    }

    /// 按插入顺序取第 `position` 个条目
    pub fn entry(&self, position: usize) -> Option<&(OverrideKey, Value)> {
        self.entries.get(position)
    }

    /// 是否包含该键
    pub fn contains(&self, key: &OverrideKey) -> bool {
        self.position(key).is_some()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历条目
    pub fn iter(&self) -> impl Iterator<Item = &(OverrideKey, Value)> {
        self.entries.iter()
    }

    /// 按插入顺序取出全部条目
    pub fn into_entries(self) -> Vec<(OverrideKey, Value)> {
        self.entries
    }
}

impl From<Vec<Value>> for Overrides {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

impl FromIterator<Value> for Overrides {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut overrides = Overrides::new();
        for value in iter {
            overrides.push(value);
        }
        overrides
    }
}

impl FromIterator<(OverrideKey, Value)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (OverrideKey, Value)>>(iter: I) -> Self {
        let mut overrides = Overrides::new();
        for (key, value) in iter {
            overrides.insert(key, value);
        }
        overrides
    }
}

impl IntoIterator for Overrides {
    type Item = (OverrideKey, Value);
    type IntoIter = std::vec::IntoIter<(OverrideKey, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
