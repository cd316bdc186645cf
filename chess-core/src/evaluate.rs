//! 局面评估
//!
//! 分值由子力分和位置分组成：先比较子力，子力相同时位置分决定高低。

use std::ops::Neg;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::piece::{Piece, PieceType, Position, Side};

/// 评估分值
///
/// 字段顺序决定比较顺序（子力优先）。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Score {
    /// 子力分
    pub material: i32,
    /// 位置分
    pub positioning: i32,
}

impl Score {
    pub const ZERO: Score = Score::new(0, 0);

    /// 比任何局面分值都低，取反后为 `MAX`
    pub const MIN: Score = Score::new(-i32::MAX, -i32::MAX);

    pub const MAX: Score = Score::new(i32::MAX, i32::MAX);

    pub const fn new(material: i32, positioning: i32) -> Self {
        Self {
            material,
            positioning,
        }
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        Score::new(-self.material, -self.positioning)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:+})", self.material, self.positioning)
    }
}

/// 位置分值表（白方视角，黑方按行镜像）
/// 索引为 rank * 8 + file，第一行是白方底线
mod position_tables {
    /// 兵：越靠前越高，底线没有升变，不再加分
    pub const PAWN: [i32; 64] = [
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         2,  4,  6,  8,  8,  6,  4,  2,
         4,  8, 12, 16, 16, 12,  8,  4,
         6, 12, 18, 24, 24, 18, 12,  6,
         8, 16, 24, 32, 32, 24, 16,  8,
        20, 30, 40, 50, 50, 40, 30, 20,
         0,  0,  0,  0,  0,  0,  0,  0,
    ];

    /// 马：中心最高，角落最低
    pub const KNIGHT: [i32; 64] = [
         0,  5, 10, 10, 10, 10,  5,  0,
         5, 15, 20, 20, 20, 20, 15,  5,
        10, 20, 30, 35, 35, 30, 20, 10,
        10, 20, 35, 40, 40, 35, 20, 10,
        10, 20, 35, 40, 40, 35, 20, 10,
        10, 20, 30, 35, 35, 30, 20, 10,
         5, 15, 20, 20, 20, 20, 15,  5,
         0,  5, 10, 10, 10, 10,  5,  0,
    ];

    /// 象和后：控制中心
    pub const CENTER: [i32; 64] = [
         0,  2,  4,  6,  6,  4,  2,  0,
         2,  6,  8, 10, 10,  8,  6,  2,
         4,  8, 12, 14, 14, 12,  8,  4,
         6, 10, 14, 16, 16, 14, 10,  6,
         6, 10, 14, 16, 16, 14, 10,  6,
         4,  8, 12, 14, 14, 12,  8,  4,
         2,  6,  8, 10, 10,  8,  6,  2,
         0,  2,  4,  6,  6,  4,  2,  0,
    ];
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估棋局（白方视角，正值对白方有利）
    pub fn evaluate(board: &Board) -> Score {
        let mut score = Score::ZERO;

        for (pos, piece) in board.all_pieces() {
            let material = piece.piece_type.value();
            let positioning = Self::position_bonus(pos, piece);
            match piece.side {
                Side::White => {
                    score.material += material;
                    score.positioning += positioning;
                }
                Side::Black => {
                    score.material -= material;
                    score.positioning -= positioning;
                }
            }
        }

        score
    }

    /// 从指定阵营的视角评估
    pub fn evaluate_for(board: &Board, side: Side) -> Score {
        let score = Self::evaluate(board);
        match side {
            Side::White => score,
            Side::Black => -score,
        }
    }

    /// 快速评估（仅计算子力差，白方视角）
    pub fn evaluate_material(board: &Board) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(_, piece)| match piece.side {
                Side::White => piece.piece_type.value(),
                Side::Black => -piece.piece_type.value(),
            })
            .sum()
    }

    fn position_bonus(pos: Position, piece: Piece) -> i32 {
        let rank = match piece.side {
            Side::White => pos.rank as usize,
            Side::Black => BOARD_SIZE - 1 - pos.rank as usize,
        };
        let index = rank * BOARD_SIZE + pos.file as usize;

        match piece.piece_type {
            PieceType::Pawn => position_tables::PAWN[index],
            PieceType::Knight => position_tables::KNIGHT[index],
            PieceType::Bishop | PieceType::Queen => position_tables::CENTER[index],
            // 车和王不加位置分
            PieceType::Rook | PieceType::King => 0,
        }
    }
}
