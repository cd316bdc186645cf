//! 坐标表示法
//!
//! 格式：`<起始格><目标格>`，如 `e2e4`、`b1c3`。
//! 列为 a-h（file 0-7），行为 1-8（rank 0-7）。

use crate::board::Board;
use crate::error::{ChessError, Result};
use crate::moves::{Move, MoveGenerator};
use crate::piece::Position;

/// 坐标表示法
pub struct Notation;

impl Notation {
    /// 将走法转换为坐标表示
    pub fn to_coordinate(mv: &Move) -> String {
        mv.to_string()
    }

    /// 在棋盘上解析坐标表示，只接受走子方的伪合法走法
    pub fn parse(board: &Board, text: &str) -> Result<Move> {
        let text = text.trim();
        let invalid = || ChessError::InvalidMove {
            text: text.to_string(),
        };

        if !text.is_ascii() || text.len() != 4 {
            return Err(invalid());
        }

        let from = Position::parse(&text[0..2]).ok_or_else(invalid)?;
        let to = Position::parse(&text[2..4]).ok_or_else(invalid)?;

        MoveGenerator::generate_pseudo_legal(board)
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to)
            .ok_or_else(invalid)
    }

    /// 依次执行一串以空白分隔的坐标走法
    pub fn apply_line(board: &Board, line: &str) -> Result<Board> {
        line.split_whitespace().try_fold(board.clone(), |current, text| {
            let mv = Self::parse(&current, text)?;
            Ok(current.apply(&mv))
        })
    }
}
