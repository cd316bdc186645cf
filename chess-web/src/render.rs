//! 文本渲染

use chess_core::{BOARD_SIZE, EMPTY_SQUARE};

use crate::view::DemoBoard;

/// 渲染为带行列标注的文本网格，第 8 行在上
pub fn render(board: &DemoBoard) -> String {
    let mut out = String::new();

    for rank in (0..BOARD_SIZE as u8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..BOARD_SIZE as u8 {
            let c = board
                .get_at(rank, file)
                .map_or(EMPTY_SQUARE, |piece| piece.to_code());
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }

    out.push_str("   a b c d e f g h\n");
    out
}

/// 依次渲染多个棋盘，每个棋盘前加序号标题
pub fn render_all(title: &str, boards: &[DemoBoard]) -> String {
    boards
        .iter()
        .enumerate()
        .map(|(i, board)| format!("{} #{}\n{}", title, i + 1, render(board)))
        .collect::<Vec<_>>()
        .join("\n")
}
