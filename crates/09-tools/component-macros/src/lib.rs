//! # Component Macros
//!
//! 这个 crate 提供了从 Rust 类型生成类元数据的过程宏。
//!
//! ## 核心宏
//!
//! - [`macro@injectable`] - 为固有 `impl` 块生成 `Reflect` 实现
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::injectable;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! pub struct Clock;
//!
//! #[injectable]
//! impl Clock {}
//!
//! pub struct Greeter {
//!     clock: Arc<Clock>,
//!     greeting: String,
//! }
//!
//! #[injectable(implements = "app::Greeting")]
//! impl Greeter {
//!     pub fn new(clock: Arc<Clock>, #[default("hello")] greeting: String) -> Self {
//!         Self { clock, greeting }
//!     }
//!
//!     pub fn greet(&self, name: String) -> String {
//!         format!("{}, {}", self.greeting, name)
//!     }
//! }
//! ```

use proc_macro::TokenStream;

mod injectable;
mod utils;

/// 可注入类型宏
///
/// 放在类型的固有 `impl` 块上，生成 `di_abstractions::Reflect` 实现。
/// 类名为 `std::any::type_name::<Self>()`。
///
/// - `fn new(...) -> Self` 成为构造函数，`pub` 为公开，其余为私有
/// - 没有 `new` 时，类型必须实现 `Default`，用于生成空白实例
/// - 带 `&self` 接收者的函数成为实例方法，返回值经 `Value::from` 转换
///
/// 支持的参数类型：`Arc<T>`、`Option<Arc<T>>`（可空）、`i64`、`f64`、
/// `bool`、`String`、`Value`（不声明类型）。
///
/// # 参数属性
///
/// - `#[default(expr)]` - 默认值，在提取签名时求值
/// - `#[variadic]` - 可变参数，类型为 `Vec<Value>` 或 `Vec<Arc<T>>`，必须位于最后
///
/// # 宏参数
///
/// - `implements = "a::B, c::D"` - 声明实现的接口
#[proc_macro_attribute]
pub fn injectable(args: TokenStream, input: TokenStream) -> TokenStream {
    injectable::injectable_impl(args, input)
}
