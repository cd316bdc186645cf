//! 国际象棋引擎的演示前端
//!
//! 包含:
//! - 引擎加载（进程内只初始化一次）
//! - 棋盘与棋子句柄
//! - 演示视图与文本渲染
//! - 设置、日志与演示流程（本地构建）
//! - 浏览器绑定（wasm 构建）

pub mod engine;
pub mod handle;
pub mod render;
pub mod view;

#[cfg(not(target_arch = "wasm32"))]
pub mod demo;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use engine::{engine, load_engine, Engine};
pub use handle::{BoardHandle, PieceHandle};
pub use render::{render, render_all};
pub use view::{DemoBoard, DemoPiece};

#[cfg(not(target_arch = "wasm32"))]
pub use demo::{run_demo, walk, DemoSummary};
#[cfg(not(target_arch = "wasm32"))]
pub use settings::DemoSettings;
