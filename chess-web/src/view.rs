//! 演示层的棋盘视图
//!
//! 从引擎句柄读出棋子列表后立即释放句柄，之后只操作自己的副本。

use chess_core::{PieceType, Result, Side, BOARD_SIZE, EMPTY_SQUARE};
use tracing::debug;

use crate::engine::Engine;
use crate::handle::{BoardHandle, PieceHandle};

/// 视图中的棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoPiece {
    pub owner: Side,
    pub piece_type: PieceType,
    pub rank: u8,
    pub file: u8,
}

impl DemoPiece {
    fn from_handle(piece: &PieceHandle) -> Self {
        Self {
            owner: piece.side(),
            piece_type: piece.kind(),
            rank: piece.rank(),
            file: piece.file(),
        }
    }

    pub fn to_code(&self) -> char {
        self.piece_type.to_code(self.owner)
    }
}

/// 视图中的棋盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoBoard {
    pieces: Vec<DemoPiece>,
    is_white_to_move: bool,
    board_string: String,
}

impl DemoBoard {
    /// 通过引擎解析文本棋盘
    pub fn from_layout(engine: &Engine, text: &str, is_white_to_move: bool) -> Result<Self> {
        let handle = engine.board_from(text, is_white_to_move)?;
        Ok(Self::from_handle(handle, is_white_to_move))
    }

    /// 读取句柄中的所有棋子，然后释放句柄
    pub fn from_handle(handle: BoardHandle, is_white_to_move: bool) -> Self {
        let mut pieces = Vec::new();

        handle.get_pieces(|piece| {
            pieces.push(DemoPiece::from_handle(&piece));
            piece.free();
        });

        handle.free();

        Self::new(pieces, is_white_to_move)
    }

    fn new(pieces: Vec<DemoPiece>, is_white_to_move: bool) -> Self {
        let mut board = Self {
            pieces,
            is_white_to_move,
            board_string: String::new(),
        };

        let mut text = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for rank in (0..BOARD_SIZE as u8).rev() {
            for file in 0..BOARD_SIZE as u8 {
                text.push(board.get_at(rank, file).map_or(EMPTY_SQUARE, DemoPiece::to_code));
            }
            text.push('\n');
        }
        board.board_string = text;

        board
    }

    pub fn get_at(&self, rank: u8, file: u8) -> Option<&DemoPiece> {
        self.pieces
            .iter()
            .find(|piece| piece.rank == rank && piece.file == file)
    }

    pub fn pieces(&self) -> &[DemoPiece] {
        &self.pieces
    }

    pub fn is_white_to_move(&self) -> bool {
        self.is_white_to_move
    }

    pub fn board_string(&self) -> &str {
        &self.board_string
    }

    /// 重新解析自己的文本棋盘并生成所有后继棋盘
    pub fn generate_boards(&self, engine: &Engine) -> Result<Vec<DemoBoard>> {
        let handle = engine.board_from(&self.board_string, self.is_white_to_move)?;
        let successors = handle.generate_moves()?;
        handle.free();

        debug!(count = successors.len(), "generated demo boards");

        Ok(successors
            .into_iter()
            .map(|next| Self::from_handle(next, !self.is_white_to_move))
            .collect())
    }

    /// 只保留不让己方王被将军的后继棋盘
    pub fn generate_legal_boards(&self, engine: &Engine) -> Result<Vec<DemoBoard>> {
        let handle = engine.board_from(&self.board_string, self.is_white_to_move)?;
        let successors = handle.legal_moves()?;
        handle.free();

        Ok(successors
            .into_iter()
            .map(|next| Self::from_handle(next, !self.is_white_to_move))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::load_engine;
    use chess_core::{Board, Layout, DEFAULT_LAYOUT};

    #[tokio::test]
    async fn test_from_layout() {
        let engine = load_engine().await;
        let board = DemoBoard::from_layout(engine, DEFAULT_LAYOUT, true).unwrap();

        assert_eq!(board.pieces().len(), 32);
        assert!(board.is_white_to_move());
        assert_eq!(board.board_string(), Layout::encode(&Board::initial()));

        let king = board.get_at(0, 3).unwrap();
        assert_eq!(king.owner, Side::White);
        assert_eq!(king.piece_type, PieceType::King);
        assert!(board.get_at(4, 4).is_none());
    }

    #[tokio::test]
    async fn test_generate_boards() {
        let engine = load_engine().await;
        let board = DemoBoard::from_layout(engine, DEFAULT_LAYOUT, true).unwrap();
        let boards = board.generate_boards(engine).unwrap();

        assert_eq!(boards.len(), 20);
        for next in &boards {
            assert!(!next.is_white_to_move());
            assert_eq!(next.pieces().len(), 32);
        }

        // 黑方继续走
        let replies = boards[0].generate_boards(engine).unwrap();
        assert_eq!(replies.len(), 20);
        assert!(replies.iter().all(DemoBoard::is_white_to_move));
    }

    #[tokio::test]
    async fn test_generate_legal_boards() {
        let engine = load_engine().await;
        let pinned = "
            ....r...
            ........
            ........
            ........
            ........
            ........
            ....R...
            ....K...
        ";
        let board = DemoBoard::from_layout(engine, pinned, true).unwrap();

        assert_eq!(board.generate_boards(engine).unwrap().len(), 17);
        assert_eq!(board.generate_legal_boards(engine).unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_malformed_layout() {
        let engine = load_engine().await;
        let result = DemoBoard::from_layout(engine, "pppppppp\nppppppp", true);
        assert!(result.is_err());
    }
}
