//! 文本棋盘格式解析和生成
//!
//! 文本棋盘由 8 行、每行 8 个字符组成：
//! - 第一行是第 7 行（黑方底线），最后一行是第 0 行（白方底线）
//! - 大写字母为白方棋子，小写字母为黑方棋子（k q b n r p）
//! - `.` 或 `x` 表示空格子，生成时统一使用 `.`
//!
//! 示例：
//! ```text
//! rnbkqbnr
//! pppppppp
//! ........
//! ........
//! ........
//! ........
//! PPPPPPPP
//! RNBKQBNR
//! ```
//!
//! 走子方不在文本中编码，解析时需要单独传入。

use tracing::debug;

use crate::board::Board;
use crate::constants::{BOARD_SIZE, EMPTY_PLACEHOLDERS, EMPTY_SQUARE};
use crate::error::{LayoutError, Result};
use crate::piece::{Piece, Position, Side};

/// 文本棋盘格式处理
pub struct Layout;

impl Layout {
    /// 解析文本棋盘
    ///
    /// 首尾空白被忽略，每行的首尾空白也被忽略。
    pub fn decode(text: &str, side_to_move: Side) -> Result<Board> {
        let lines: Vec<&str> = text.trim().lines().map(str::trim).collect();

        if lines.len() != BOARD_SIZE {
            return Err(LayoutError::LineCount { found: lines.len() }.into());
        }

        let mut board = Board::empty(side_to_move);

        // 文本从上到下是 rank=7 到 rank=0
        for (line_idx, line) in lines.iter().enumerate() {
            let length = line.chars().count();
            if length != BOARD_SIZE {
                return Err(LayoutError::LineLength {
                    line: line_idx + 1,
                    found: length,
                }
                .into());
            }

            let rank = (BOARD_SIZE - 1 - line_idx) as u8;
            for (file, c) in line.chars().enumerate() {
                if EMPTY_PLACEHOLDERS.contains(&c) {
                    continue;
                }

                let piece = Piece::from_code(c).ok_or(LayoutError::UnknownChar {
                    line: line_idx + 1,
                    column: file + 1,
                    ch: c,
                })?;
                board.set(Position::new_unchecked(rank, file as u8), Some(piece));
            }
        }

        debug!(
            white = board.piece_count(Side::White),
            black = board.piece_count(Side::Black),
            "decoded layout"
        );

        Ok(board)
    }

    /// 用布尔值表示走子方的解析入口（true = 白方）
    pub fn decode_with_flag(text: &str, side_to_move_is_white: bool) -> Result<Board> {
        Self::decode(text, Side::from(side_to_move_is_white))
    }

    /// 将棋盘转换为文本棋盘，每行以换行符结尾
    pub fn encode(board: &Board) -> String {
        let mut text = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));

        for rank in (0..BOARD_SIZE as u8).rev() {
            for file in 0..BOARD_SIZE as u8 {
                let c = board
                    .get(Position::new_unchecked(rank, file))
                    .map_or(EMPTY_SQUARE, |piece| piece.to_code());
                text.push(c);
            }
            text.push('\n');
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_LAYOUT;
    use crate::error::ChessError;
    use crate::piece::PieceType;

    const INITIAL_TEXT: &str = concat!(
        "rnbkqbnr\n",
        "pppppppp\n",
        "........\n",
        "........\n",
        "........\n",
        "........\n",
        "PPPPPPPP\n",
        "RNBKQBNR\n",
    );

    #[test]
    fn test_decode_default_layout() {
        let board = Layout::decode(DEFAULT_LAYOUT, Side::White).unwrap();
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn test_encode_initial() {
        assert_eq!(Layout::encode(&Board::initial()), INITIAL_TEXT);
    }

    #[test]
    fn test_placeholders_equivalent() {
        let dots = Layout::decode(INITIAL_TEXT, Side::White).unwrap();
        let xs = Layout::decode(&INITIAL_TEXT.replace('.', "x"), Side::White).unwrap();
        assert_eq!(dots, xs);
    }

    #[test]
    fn test_decode_positions() {
        let board = Layout::decode(
            "
            .......r
            ...P....
            ........
            ........
            ..k.....
            ........
            .Q...P..
            ..P.....
            ",
            Side::White,
        )
        .unwrap();

        assert_eq!(
            board.get(Position::new_unchecked(7, 7)),
            Some(Piece::new(PieceType::Rook, Side::Black))
        );
        assert_eq!(
            board.get(Position::new_unchecked(6, 3)),
            Some(Piece::new(PieceType::Pawn, Side::White))
        );
        assert_eq!(
            board.get(Position::new_unchecked(3, 2)),
            Some(Piece::new(PieceType::King, Side::Black))
        );
        assert_eq!(
            board.get(Position::new_unchecked(1, 1)),
            Some(Piece::new(PieceType::Queen, Side::White))
        );
        assert_eq!(
            board.get(Position::new_unchecked(0, 2)),
            Some(Piece::new(PieceType::Pawn, Side::White))
        );
        assert_eq!(board.all_pieces().len(), 6);
    }

    #[test]
    fn test_side_to_move_carried_out_of_band() {
        let white = Layout::decode_with_flag(INITIAL_TEXT, true).unwrap();
        let black = Layout::decode_with_flag(INITIAL_TEXT, false).unwrap();
        assert_eq!(white.side_to_move(), Side::White);
        assert_eq!(black.side_to_move(), Side::Black);
        assert_eq!(Layout::encode(&white), Layout::encode(&black));
    }

    #[test]
    fn test_roundtrip() {
        let layouts = [
            DEFAULT_LAYOUT,
            "
            xxxrxxxx
            xxPxxxxx
            xxxxxxxx
            xxxxPpxx
            xnxnxxxx
            nxPxxxxn
            xPxxxPxP
            xxxxxxxx
            ",
            "........\n........\n........\n........\n........\n........\n........\n........",
        ];

        for text in layouts {
            for side in [Side::White, Side::Black] {
                let board = Layout::decode(text, side).unwrap();
                let again = Layout::decode(&Layout::encode(&board), side).unwrap();
                assert_eq!(board, again);
            }
        }
    }

    #[test]
    fn test_short_line() {
        let text = INITIAL_TEXT.replacen("pppppppp", "ppppppp", 1);
        assert_eq!(
            Layout::decode(&text, Side::White),
            Err(ChessError::MalformedLayout(LayoutError::LineLength {
                line: 2,
                found: 7
            }))
        );
    }

    #[test]
    fn test_unknown_char() {
        let text = INITIAL_TEXT.replacen("rnbkqbnr", "rnbzqbnr", 1);
        assert_eq!(
            Layout::decode(&text, Side::White),
            Err(ChessError::MalformedLayout(LayoutError::UnknownChar {
                line: 1,
                column: 4,
                ch: 'z'
            }))
        );
    }

    #[test]
    fn test_wrong_line_count() {
        assert_eq!(
            Layout::decode("", Side::White),
            Err(ChessError::MalformedLayout(LayoutError::LineCount { found: 0 }))
        );

        let nine = format!("{}........\n", INITIAL_TEXT);
        assert_eq!(
            Layout::decode(&nine, Side::White),
            Err(ChessError::MalformedLayout(LayoutError::LineCount { found: 9 }))
        );
    }

    #[test]
    fn test_non_ascii() {
        // 长度按字符计算，非 ASCII 字符报告为无法识别
        let text = INITIAL_TEXT.replacen("........", "...😀....", 1);
        assert_eq!(
            Layout::decode(&text, Side::White),
            Err(ChessError::MalformedLayout(LayoutError::UnknownChar {
                line: 3,
                column: 4,
                ch: '😀'
            }))
        );
    }
}
