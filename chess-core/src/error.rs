//! 错误类型定义

use thiserror::Error;

use crate::piece::Side;

/// 文本棋盘格式错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// 行数不是 8
    #[error("expected 8 lines, got {found}")]
    LineCount { found: usize },

    /// 某一行长度不是 8
    #[error("line {line} has {found} characters, expected 8")]
    LineLength { line: usize, found: usize },

    /// 无法识别的字符
    #[error("unrecognized character {ch:?} at line {line}, column {column}")]
    UnknownChar { line: usize, column: usize, ch: char },
}

/// 棋盘不变量被破坏
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// 同一格子上有两个棋子
    #[error("two pieces share square ({rank}, {file})")]
    DuplicateSquare { rank: u8, file: u8 },

    /// 格子数不是 64（反序列化时）
    #[error("board has {found} squares, expected {expected}")]
    SquareCount { found: usize, expected: usize },

    /// 位置超出棋盘
    #[error("square ({rank}, {file}) is off the board")]
    OutOfBounds { rank: u8, file: u8 },

    /// 一方棋子过多
    #[error("{side:?} has {count} pieces (max: {max})")]
    TooManyPieces { side: Side, count: usize, max: usize },

    /// 一方将（王）过多
    #[error("{side:?} has {count} kings (max: {max})")]
    TooManyKings { side: Side, count: usize, max: usize },
}

/// 引擎错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 无效的文本棋盘
    #[error("Malformed layout: {0}")]
    MalformedLayout(#[from] LayoutError),

    /// 无效的棋盘
    #[error("Invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    /// 无效的走法
    #[error("Invalid move: {text}")]
    InvalidMove { text: String },
}

/// 引擎操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
