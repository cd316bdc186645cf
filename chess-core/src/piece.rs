//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, SQUARE_COUNT};

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// 王
    King,
    /// 后
    Queen,
    /// 象
    Bishop,
    /// 马
    Knight,
    /// 车
    Rook,
    /// 兵
    Pawn,
}

impl PieceType {
    /// 所有棋子类型
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
        PieceType::Pawn,
    ];

    /// 小写类型代码
    pub fn code(&self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Rook => 'r',
            PieceType::Pawn => 'p',
        }
    }

    /// 获取文本字符（白方大写，黑方小写）
    pub fn to_code(&self, side: Side) -> char {
        let c = self.code();
        match side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// 从文本字符解析
    pub fn from_code(c: char) -> Option<(PieceType, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let piece_type = match c.to_ascii_lowercase() {
            'k' => PieceType::King,
            'q' => PieceType::Queen,
            'b' => PieceType::Bishop,
            'n' => PieceType::Knight,
            'r' => PieceType::Rook,
            'p' => PieceType::Pawn,
            _ => return None,
        };
        Some((piece_type, side))
    }

    /// 子力分值（兵 = 100）
    pub fn value(&self) -> i32 {
        match self {
            PieceType::King => 10000,
            PieceType::Queen => 900,
            PieceType::Rook => 500,
            PieceType::Bishop => 330,
            PieceType::Knight => 320,
            PieceType::Pawn => 100,
        }
    }

    /// 是否为滑行棋子（车、象、后）
    pub fn is_slider(&self) -> bool {
        matches!(self, PieceType::Rook | PieceType::Bishop | PieceType::Queen)
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（先手，在下方）
    White,
    /// 黑方（后手，在上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn is_white(&self) -> bool {
        *self == Side::White
    }

    /// 简写代码（"w" / "b"）
    pub fn code(&self) -> &'static str {
        match self {
            Side::White => "w",
            Side::Black => "b",
        }
    }

    /// 兵前进的方向
    pub fn forward(&self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

impl From<bool> for Side {
    fn from(is_white: bool) -> Self {
        if is_white {
            Side::White
        } else {
            Side::Black
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub fn new(piece_type: PieceType, side: Side) -> Self {
        Self { piece_type, side }
    }

    /// 获取文本字符
    pub fn to_code(&self) -> char {
        self.piece_type.to_code(self.side)
    }

    /// 从文本字符解析
    pub fn from_code(c: char) -> Option<Piece> {
        PieceType::from_code(c).map(|(piece_type, side)| Piece { piece_type, side })
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_code())
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-7)，0 为白方底线
    pub rank: u8,
    /// 列 (0-7)，0 为 a 列
    pub file: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(rank: u8, file: u8) -> Option<Self> {
        if (rank as usize) < BOARD_SIZE && (file as usize) < BOARD_SIZE {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self { rank, file }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.rank as usize) < BOARD_SIZE && (self.file as usize) < BOARD_SIZE
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dr: i8, df: i8) -> Option<Position> {
        let rank = self.rank as i8 + dr;
        let file = self.file as i8 + df;
        if (0..BOARD_SIZE as i8).contains(&rank) && (0..BOARD_SIZE as i8).contains(&file) {
            Some(Position {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.rank as usize * BOARD_SIZE + self.file as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < SQUARE_COUNT {
            Some(Position {
                rank: (index / BOARD_SIZE) as u8,
                file: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 解析坐标表示（如 "e2"）
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Position::new(rank as u8 - b'1', file as u8 - b'a')
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}
