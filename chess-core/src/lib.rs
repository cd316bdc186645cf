//! 国际象棋核心引擎
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 文本棋盘编解码
//! - 走法生成（伪合法 / 合法）与将军检测
//! - 坐标表示法
//! - 局面评估与 Alpha-Beta 搜索
//! - Perft 统计

mod board;
mod constants;
mod error;
mod evaluate;
mod layout;
mod moves;
mod notation;
mod perft;
mod piece;
mod search;

pub use board::Board;
pub use constants::*;
pub use error::{BoardError, ChessError, LayoutError, Result};
pub use evaluate::{Evaluator, Score};
pub use layout::Layout;
pub use moves::{Move, MoveGenerator};
pub use notation::Notation;
pub use perft::{perft, perft_divide};
pub use piece::{Piece, PieceType, Position, Side};
pub use search::{minimax, SearchResult, Searcher};

/// 解析文本棋盘
pub fn decode(text: &str, side_to_move: Side) -> Result<Board> {
    Layout::decode(text, side_to_move)
}

/// 生成文本棋盘
pub fn encode(board: &Board) -> String {
    Layout::encode(board)
}

/// 生成所有后继棋盘
pub fn generate(board: &Board) -> Result<Vec<Board>> {
    MoveGenerator::generate(board)
}
