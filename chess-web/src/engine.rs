//! 引擎加载
//!
//! 引擎在进程内只加载一次，之后所有调用方共享同一个实例。

use chess_core::{Board, Result};
use tokio::sync::OnceCell;
use tracing::info;

use crate::handle::BoardHandle;

static ENGINE: OnceCell<Engine> = OnceCell::const_new();

/// 实际执行初始化的次数
#[cfg(test)]
static LOADS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

/// 引擎接口
#[derive(Debug)]
pub struct Engine {
    version: &'static str,
    initial: Board,
}

impl Engine {
    fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            initial: Board::initial(),
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// 从文本棋盘创建棋盘句柄
    pub fn board_from(&self, text: &str, is_white: bool) -> Result<BoardHandle> {
        BoardHandle::from_layout(text, is_white)
    }

    /// 初始局面
    pub fn initial_board(&self) -> BoardHandle {
        BoardHandle::new(self.initial.clone())
    }
}

/// 加载引擎（只初始化一次）
pub async fn load_engine() -> &'static Engine {
    ENGINE
        .get_or_init(|| async {
            #[cfg(test)]
            LOADS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            let engine = Engine::new();
            info!(version = engine.version(), "chess engine loaded");
            engine
        })
        .await
}

/// 已加载的引擎；加载前返回 None
pub fn engine() -> Option<&'static Engine> {
    ENGINE.get()
}

#[cfg(test)]
fn load_count() -> usize {
    LOADS.load(std::sync::atomic::Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_once() {
        let first = load_engine().await;
        let second = load_engine().await;

        assert!(std::ptr::eq(first, second));
        assert!(engine().is_some_and(|e| std::ptr::eq(e, first)));
        assert_eq!(load_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_load() {
        let handles: Vec<_> = (0..8).map(|_| tokio::spawn(load_engine())).collect();

        let mut engines = Vec::new();
        for handle in handles {
            engines.push(handle.await.unwrap());
        }

        assert!(engines.windows(2).all(|w| std::ptr::eq(w[0], w[1])));
        assert_eq!(load_count(), 1);
    }

    #[tokio::test]
    async fn test_board_from() {
        let engine = load_engine().await;
        let board = engine.board_from(chess_core::DEFAULT_LAYOUT, true).unwrap();

        assert_eq!(&board, &engine.initial_board());
        assert!(engine.board_from("xxxxxxxz", true).is_err());
    }
}
