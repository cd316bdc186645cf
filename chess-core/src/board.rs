//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, MAX_KINGS_PER_SIDE, MAX_PIECES_PER_SIDE, SQUARE_COUNT};
use crate::error::BoardError;
use crate::moves::Move;
use crate::piece::{Piece, PieceType, Position, Side};

/// 底线棋子排列（与演示页面的初始局面一致，王在 d 列）
const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::King,
    PieceType::Queen,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 棋盘
///
/// 构造后不可变：走子总是生成新的棋盘。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    /// 8x8 棋盘，索引为 rank * 8 + file，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
    /// 当前走子方
    side_to_move: Side,
}

/// 反序列化的中间形式，转换为 `Board` 前检查格子数和棋子数量
#[derive(Deserialize)]
struct RawBoard {
    squares: Vec<Option<Piece>>,
    side_to_move: Side,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.squares.len() != SQUARE_COUNT {
            return Err(BoardError::SquareCount {
                found: raw.squares.len(),
                expected: SQUARE_COUNT,
            });
        }

        let board = Self {
            squares: raw.squares,
            side_to_move: raw.side_to_move,
        };
        board.validate()?;
        Ok(board)
    }
}

impl Board {
    /// 创建空棋盘
    pub fn empty(side_to_move: Side) -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
            side_to_move,
        }
    }

    /// 创建初始棋盘（白方先走）
    pub fn initial() -> Self {
        let mut board = Self::empty(Side::White);

        for (file, piece_type) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            board.set(
                Position::new_unchecked(0, file),
                Some(Piece::new(*piece_type, Side::White)),
            );
            board.set(
                Position::new_unchecked(1, file),
                Some(Piece::new(PieceType::Pawn, Side::White)),
            );
            board.set(
                Position::new_unchecked(6, file),
                Some(Piece::new(PieceType::Pawn, Side::Black)),
            );
            board.set(
                Position::new_unchecked(7, file),
                Some(Piece::new(*piece_type, Side::Black)),
            );
        }

        board
    }

    /// 从棋子列表创建棋盘，同一格子出现两次时报错
    pub fn from_pieces<I>(pieces: I, side_to_move: Side) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let mut board = Self::empty(side_to_move);
        for (pos, piece) in pieces {
            if !pos.is_valid() {
                return Err(BoardError::OutOfBounds {
                    rank: pos.rank,
                    file: pos.file,
                });
            }
            if board.get(pos).is_some() {
                return Err(BoardError::DuplicateSquare {
                    rank: pos.rank,
                    file: pos.file,
                });
            }
            board.set(pos, Some(piece));
        }
        Ok(board)
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子
    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// 当前走子方
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// 相同棋子布局，换一个走子方
    pub fn with_side_to_move(&self, side: Side) -> Self {
        Self {
            squares: self.squares.clone(),
            side_to_move: side,
        }
    }

    /// 执行走法，返回新棋盘（不检查规则）
    ///
    /// 目标格上的棋子被移除，走子方切换到对方。
    pub fn apply(&self, mv: &Move) -> Self {
        let mut next = self.clone();
        let piece = next.get(mv.from);
        next.set(mv.from, None);
        next.set(mv.to, piece);
        next.side_to_move = self.side_to_move.opponent();
        next
    }

    /// 查找指定阵营的王的位置
    pub fn find_king(&self, side: Side) -> Option<Position> {
        self.pieces(side)
            .into_iter()
            .find(|(_, piece)| piece.piece_type == PieceType::King)
            .map(|(pos, _)| pos)
    }

    /// 获取指定阵营的所有棋子位置（按行、列升序）
    pub fn pieces(&self, side: Side) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子（按行、列升序）
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, square)| {
                let piece = (*square)?;
                Position::from_index(index).map(|pos| (pos, piece))
            })
            .collect()
    }

    /// 指定阵营的棋子数
    pub fn piece_count(&self, side: Side) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.side == side)
            .count()
    }

    /// 检查棋子数量是否合理
    pub fn validate(&self) -> Result<(), BoardError> {
        for side in [Side::White, Side::Black] {
            let count = self.piece_count(side);
            if count > MAX_PIECES_PER_SIDE {
                return Err(BoardError::TooManyPieces {
                    side,
                    count,
                    max: MAX_PIECES_PER_SIDE,
                });
            }

            let kings = self
                .squares
                .iter()
                .flatten()
                .filter(|piece| piece.side == side && piece.piece_type == PieceType::King)
                .count();
            if kings > MAX_KINGS_PER_SIDE {
                return Err(BoardError::TooManyKings {
                    side,
                    count: kings,
                    max: MAX_KINGS_PER_SIDE,
                });
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for rank in (0..BOARD_SIZE as u8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..BOARD_SIZE as u8 {
                let c = self
                    .get(Position::new_unchecked(rank, file))
                    .map_or('.', |piece| piece.to_code());
                write!(f, " {}", c)?;
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "  +-----------------+")?;
        write!(f, "    a b c d e f g h")
    }
}
