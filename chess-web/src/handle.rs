//! 引擎句柄
//!
//! 演示层通过句柄读取棋盘与棋子。`free` 会消耗句柄，
//! 释放之后再读取无法通过编译。句柄不实现 `Clone`，
//! 因此不存在释放后仍可读取的副本。

use chess_core::{Board, Layout, MoveGenerator, Piece, PieceType, Position, Result, Side};
use tracing::trace;

/// 棋子句柄
///
/// 不能复制出释放后仍可读取的副本：
///
/// ```compile_fail
/// use chess_core::{Piece, PieceType, Position, Side};
/// use chess_web::PieceHandle;
///
/// let piece = Piece::new(PieceType::King, Side::White);
/// let handle = PieceHandle::new(Position::new_unchecked(0, 3), piece);
/// let copy = handle.clone();
/// handle.free();
/// assert_eq!(copy.owner(), "w");
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct PieceHandle {
    piece: Piece,
    position: Position,
}

impl PieceHandle {
    pub fn new(position: Position, piece: Piece) -> Self {
        Self { piece, position }
    }

    /// 所属阵营："w" 或 "b"
    pub fn owner(&self) -> &'static str {
        self.piece.side.code()
    }

    /// 类型代码（大写）
    pub fn piece_type(&self) -> char {
        self.piece.piece_type.code().to_ascii_uppercase()
    }

    pub fn rank(&self) -> u8 {
        self.position.rank
    }

    pub fn file(&self) -> u8 {
        self.position.file
    }

    pub fn side(&self) -> Side {
        self.piece.side
    }

    pub fn kind(&self) -> PieceType {
        self.piece.piece_type
    }

    /// 释放句柄
    pub fn free(self) {
        trace!(rank = self.rank(), file = self.file(), "piece handle released");
    }
}

/// 棋盘句柄
///
/// 释放之后不能再读取：
///
/// ```compile_fail
/// use chess_web::BoardHandle;
///
/// let handle = BoardHandle::from_layout(chess_core::DEFAULT_LAYOUT, true).unwrap();
/// handle.free();
/// let _ = handle.to_layout();
/// ```
///
/// ```compile_fail
/// use chess_web::BoardHandle;
///
/// let handle = BoardHandle::from_layout(chess_core::DEFAULT_LAYOUT, true).unwrap();
/// let copy = handle.clone();
/// handle.free();
/// let _ = copy.to_layout();
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct BoardHandle {
    board: Board,
}

impl BoardHandle {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// 从文本棋盘创建
    pub fn from_layout(text: &str, is_white: bool) -> Result<Self> {
        Layout::decode_with_flag(text, is_white).map(Self::new)
    }

    /// 按行、列升序对每个棋子调用一次回调
    pub fn get_pieces<F>(&self, mut callback: F)
    where
        F: FnMut(PieceHandle),
    {
        for (position, piece) in self.board.all_pieces() {
            callback(PieceHandle::new(position, piece));
        }
    }

    /// 所有后继棋盘（不做王的安全检查）
    pub fn generate_moves(&self) -> Result<Vec<BoardHandle>> {
        let boards = MoveGenerator::generate(&self.board)?;
        Ok(boards.into_iter().map(Self::new).collect())
    }

    /// 所有合法后继棋盘
    pub fn legal_moves(&self) -> Result<Vec<BoardHandle>> {
        let boards = MoveGenerator::legal_successors(&self.board)?;
        Ok(boards.into_iter().map(Self::new).collect())
    }

    pub fn is_white_to_move(&self) -> bool {
        self.board.side_to_move().is_white()
    }

    pub fn to_layout(&self) -> String {
        Layout::encode(&self.board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 释放句柄
    pub fn free(self) {
        trace!("board handle released");
    }
}
