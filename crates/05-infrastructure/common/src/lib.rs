//! # Infrastructure Common
//!
//! 注入引擎各层共享的基础类型。
//!
//! ## 核心内容
//!
//! - [`Value`] / [`Object`] - 注入器在运行时传递的动态值
//! - [`errors`] - 反射、解析、调用和配置的错误分类
//!
//! ## 设计原则
//!
//! - 所有跨越公共 API 的失败都是显式的 `Result`
//! - 对象按引用共享，可以在线程间传递

pub mod errors;
pub mod value;

pub use errors::*;
pub use value::*;
