//! 搜索
//!
//! 固定深度的 Minimax + Alpha-Beta 剪枝（负极大值形式）。
//! 在伪合法后继上展开，分值总是从走子方的视角计算；
//! 走子方的王已被吃掉而对方的王还在时，局面不再展开。

use tracing::debug;

use crate::board::Board;
use crate::error::Result;
use crate::evaluate::{Evaluator, Score};
use crate::moves::{Move, MoveGenerator};

/// 搜索结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// 最佳走法；没有可走的棋时为 None
    pub best_move: Option<Move>,
    /// 走子方视角的分值
    pub score: Score,
    /// 搜索的节点数
    pub nodes: u64,
}

/// 搜索引擎
pub struct Searcher {
    max_depth: u32,
    nodes: u64,
}

impl Searcher {
    /// 创建搜索引擎，深度至少为 1
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth: max_depth.max(1),
            nodes: 0,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// 搜索最佳走法
    ///
    /// 分值相同时保留先生成的走法，因此结果是确定的。
    pub fn search(&mut self, board: &Board) -> Result<SearchResult> {
        self.nodes = 0;

        let successors = MoveGenerator::generate(board)?;
        let moves = MoveGenerator::generate_pseudo_legal(board);

        let mut best: Option<(Move, Score)> = None;
        let mut alpha = Score::MIN;

        for (mv, next) in moves.into_iter().zip(successors) {
            let score = -self.alpha_beta(&next, self.max_depth - 1, -Score::MAX, -alpha);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            if score > alpha {
                alpha = score;
            }
        }

        let score = match best {
            Some((_, score)) => score,
            None => Evaluator::evaluate_for(board, board.side_to_move()),
        };

        debug!(
            depth = self.max_depth,
            nodes = self.nodes,
            best = ?best.map(|(mv, _)| mv.to_string()),
            "search finished"
        );

        Ok(SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score,
            nodes: self.nodes,
        })
    }

    /// Alpha-Beta 搜索
    fn alpha_beta(&mut self, board: &Board, depth: u32, mut alpha: Score, beta: Score) -> Score {
        self.nodes += 1;

        if depth == 0 || is_king_lost(board) {
            return Evaluator::evaluate_for(board, board.side_to_move());
        }

        let moves = MoveGenerator::generate_pseudo_legal(board);
        if moves.is_empty() {
            return Evaluator::evaluate_for(board, board.side_to_move());
        }

        for mv in &moves {
            let score = -self.alpha_beta(&board.apply(mv), depth - 1, -beta, -alpha);

            if score >= beta {
                return beta; // Beta 剪枝
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

/// 不剪枝的 Minimax，返回走子方视角的分值
pub fn minimax(board: &Board, depth: u32) -> Score {
    if depth == 0 || is_king_lost(board) {
        return Evaluator::evaluate_for(board, board.side_to_move());
    }

    MoveGenerator::generate_pseudo_legal(board)
        .iter()
        .map(|mv| -minimax(&board.apply(mv), depth - 1))
        .max()
        .unwrap_or_else(|| Evaluator::evaluate_for(board, board.side_to_move()))
}

/// 走子方的王已被吃掉，对方的王还在
fn is_king_lost(board: &Board) -> bool {
    let side = board.side_to_move();
    board.find_king(side).is_none() && board.find_king(side.opponent()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_LAYOUT;
    use crate::error::{BoardError, ChessError};
    use crate::layout::Layout;
    use crate::piece::{Position, Side};

    fn board(text: &str, side: Side) -> Board {
        Layout::decode(text, side).unwrap()
    }

    #[test]
    fn test_captures_free_queen() {
        let start = board(
            "
            q.......
            ........
            ........
            ........
            ........
            ........
            ........
            R.......
            ",
            Side::White,
        );

        for depth in 1..=2 {
            let result = Searcher::new(depth).search(&start).unwrap();
            let best = result.best_move.unwrap();
            assert_eq!(best.to_string(), "a1a8");
            assert!(best.is_capture());
            assert_eq!(result.score, Score::new(500, 0));
        }
    }

    #[test]
    fn test_king_capture_ends_search() {
        let start = board(
            "
            k......q
            ........
            ........
            ........
            ........
            ........
            ........
            R..K....
            ",
            Side::White,
        );

        let result = Searcher::new(2).search(&start).unwrap();
        assert_eq!(result.best_move.map(|mv| mv.to), Position::new(7, 0));
        assert_eq!(result.score, Score::new(10000 + 500 - 900, 0));
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let initial = board(DEFAULT_LAYOUT, Side::White);
        for depth in 1..=2 {
            let result = Searcher::new(depth).search(&initial).unwrap();
            assert_eq!(result.score, minimax(&initial, depth));
        }

        let middle = board(
            "
            r..k...r
            ppp..ppp
            ..n.b...
            ...pq...
            ...P....
            ..N..N..
            PPP..PPP
            R..KQ..R
            ",
            Side::Black,
        );
        let result = Searcher::new(3).search(&middle).unwrap();
        assert_eq!(result.score, minimax(&middle, 3));
    }

    #[test]
    fn test_search_is_deterministic() {
        let initial = board(DEFAULT_LAYOUT, Side::White);
        let first = Searcher::new(2).search(&initial).unwrap();
        let second = Searcher::new(2).search(&initial).unwrap();

        assert_eq!(first, second);
        assert!(first.best_move.is_some());
        assert!(first.nodes > 20);
    }

    #[test]
    fn test_no_moves() {
        let stuck = board(
            "P.......\n........\n........\n........\n........\n........\n........\n........",
            Side::White,
        );
        let result = Searcher::new(3).search(&stuck).unwrap();

        assert!(result.best_move.is_none());
        assert_eq!(result.score, Score::new(100, 0));
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_invalid_board() {
        let two_kings = board(
            "k......k\n........\n........\n........\n........\n........\n........\n...K....",
            Side::White,
        );
        assert!(matches!(
            Searcher::new(2).search(&two_kings),
            Err(ChessError::InvalidBoard(BoardError::TooManyKings { .. }))
        ));
    }

    #[test]
    fn test_depth_at_least_one() {
        assert_eq!(Searcher::new(0).max_depth(), 1);
        assert_eq!(Searcher::new(4).max_depth(), 4);
    }
}
