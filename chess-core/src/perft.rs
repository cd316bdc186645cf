//! Perft：统计走法树叶子节点数，用于校验走法生成

use crate::board::Board;
use crate::moves::MoveGenerator;

/// 伪合法走法树在给定深度的叶子数（depth 0 = 1）
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = MoveGenerator::generate_pseudo_legal(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|mv| perft(&board.apply(mv), depth - 1))
        .sum()
}

/// 按根节点走法拆分的 perft 结果，便于定位差异
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    MoveGenerator::generate_pseudo_legal(board)
        .iter()
        .map(|mv| (mv.to_string(), perft(&board.apply(mv), depth - 1)))
        .collect()
}
