//! 内省结果缓存实现

use di_abstractions::{CacheEntry, MultiGetCache, ServiceCache};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::trace;

/// 内存结果缓存
///
/// 条目不会过期，只能显式移除。
#[derive(Debug, Default)]
pub struct ArrayServiceCache {
    values: RwLock<HashMap<String, CacheEntry>>,
}

impl ArrayServiceCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有条目初始化，例如从上一次进程导出的快照
    pub fn with_values(values: HashMap<String, CacheEntry>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// 缓存条目数量
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl ServiceCache for ArrayServiceCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, entry: CacheEntry) {
        trace!("缓存内省结果: {}", key);
        self.values.write().insert(key.to_string(), entry);
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }

    fn has(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }
}

impl MultiGetCache for ArrayServiceCache {
    fn get_all(&self) -> HashMap<String, CacheEntry> {
        self.values.read().clone()
    }
}

/// 不存储任何内容的缓存，用于基准测试或关闭结果缓存
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpServiceCache;

impl NoOpServiceCache {
    /// 创建不存储任何条目的缓存
    pub fn new() -> Self {
        Self
    }
}

impl ServiceCache for NoOpServiceCache {
    fn get(&self, _key: &str) -> Option<CacheEntry> {
        None
    }

    fn set(&self, _key: &str, _entry: CacheEntry) {}

    fn remove(&self, _key: &str) {}

    fn has(&self, _key: &str) -> bool {
        false
    }
}

impl MultiGetCache for NoOpServiceCache {
    fn get_all(&self) -> HashMap<String, CacheEntry> {
        HashMap::new()
    }
}
