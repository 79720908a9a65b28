//! 内省结果缓存抽象接口

use crate::signature::MethodSignature;
use std::collections::HashMap;
use std::sync::Arc;

/// 缓存条目
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Flag(bool),
    Signature(Arc<MethodSignature>),
}

impl CacheEntry {
    /// 布尔结果
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            CacheEntry::Flag(flag) => Some(*flag),
            CacheEntry::Signature(_) => None,
        }
    }

    /// 签名结果
    pub fn as_signature(&self) -> Option<&Arc<MethodSignature>> {
        match self {
            CacheEntry::Signature(signature) => Some(signature),
            CacheEntry::Flag(_) => None,
        }
    }
}

impl From<bool> for CacheEntry {
    fn from(flag: bool) -> Self {
        CacheEntry::Flag(flag)
    }
}

impl From<Arc<MethodSignature>> for CacheEntry {
    fn from(signature: Arc<MethodSignature>) -> Self {
        CacheEntry::Signature(signature)
    }
}

/// 键值结果缓存
///
/// 所有方法都通过 `&self` 调用，实现负责内部同步。
pub trait ServiceCache: Send + Sync {
    fn get(&self, key: &str) -> Option<CacheEntry>;

    fn set(&self, key: &str, entry: CacheEntry);

    fn remove(&self, key: &str);

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// 支持一次取出全部条目的缓存
pub trait MultiGetCache: ServiceCache {
    fn get_all(&self) -> HashMap<String, CacheEntry>;
}
