//! 有界类描述符缓存

use di_abstractions::ClassDescriptor;
use indexmap::IndexMap;
use infrastructure_common::ConfigError;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// 按插入顺序淘汰的类描述符缓存
///
/// 容量满时插入新键会先移除最早插入的条目。命中不会调整顺序，
/// 因此这是 FIFO 而不是 LRU；重复放入同名描述符会覆盖并移到最新位置。
#[derive(Debug)]
pub struct ReflectionClassCache {
    capacity: usize,
    map: Mutex<IndexMap<String, Arc<ClassDescriptor>>>,
}

impl ReflectionClassCache {
    /// 创建缓存，容量必须至少为 1
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::validation(
                "reflection class cache capacity must be at least 1",
            ));
        }

        Ok(Self {
            capacity,
            map: Mutex::new(IndexMap::with_capacity(capacity)),
        })
    }

    /// 缓存容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 放入描述符，必要时淘汰最早插入的条目
    pub fn put(&self, descriptor: Arc<ClassDescriptor>) {
        let mut map = self.map.lock();
        self.insert_locked(&mut map, descriptor);
    }

    /// 在同一把锁内查找描述符，未命中时构建并放入
    ///
    /// 并发未命中同一个类时只有一个调用会执行 `build`。构建失败不会写入缓存。
    pub fn get_or_try_insert_with<E, F>(
        &self,
        class: &str,
        build: F,
    ) -> Result<Arc<ClassDescriptor>, E>
    where
        F: FnOnce() -> Result<Arc<ClassDescriptor>, E>,
    {
        let mut map = self.map.lock();
        if let Some(descriptor) = map.get(class) {
            return Ok(descriptor.clone());
        }

        let descriptor = build()?;
        self.insert_locked(&mut map, descriptor.clone());
        Ok(descriptor)
    }

    /// 查找描述符，命中不调整顺序
    pub fn get(&self, class: &str) -> Option<Arc<ClassDescriptor>> {
        self.map.lock().get(class).cloned()
    }

    /// 是否缓存了该类
    pub fn has(&self, class: &str) -> bool {
        self.map.lock().contains_key(class)
    }

    /// 当前缓存的描述符数量
    pub fn count(&self) -> usize {
        self.map.lock().len()
    }

    /// 按插入顺序列出缓存的类名
    pub fn class_names(&self) -> Vec<String> {
        self.map.lock().keys().cloned().collect()
    }

    fn insert_locked(
        &self,
        map: &mut IndexMap<String, Arc<ClassDescriptor>>,
        descriptor: Arc<ClassDescriptor>,
    ) {
        let name = descriptor.name().to_string();

        if map.shift_remove(&name).is_none() && map.len() >= self.capacity {
            if let Some((evicted, _)) = map.shift_remove_index(0) {
                debug!("描述符缓存已满，淘汰最早插入的类: {}", evicted);
            }
        }

        map.insert(name, descriptor);
    }
}
