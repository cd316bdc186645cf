//! 走法生成和验证

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::constants::{BLACK_PAWN_RANK, WHITE_PAWN_RANK};
use crate::error::Result;
use crate::piece::{Piece, PieceType, Position, Side};

/// 车的方向
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// 象的方向
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// 后和王的方向
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// 马的跳跃偏移
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 走动的棋子
    pub piece: Piece,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Position, to: Position, piece: Piece, captured: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: Some(captured),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成走子方的所有伪合法走法（不考虑王是否被将军）
    ///
    /// 顺序固定：按棋子所在的行、列升序，每个棋子按固定方向顺序。
    pub fn generate_pseudo_legal(board: &Board) -> Vec<Move> {
        let side = board.side_to_move();
        let mut moves = Vec::with_capacity(64);

        for (pos, piece) in board.pieces(side) {
            Self::generate_piece_moves(board, pos, piece, &mut moves);
        }

        moves
    }

    /// 生成所有后继棋盘（每个伪合法走法一个）
    ///
    /// 不过滤会让己方王被将军的走法。
    pub fn generate(board: &Board) -> Result<Vec<Board>> {
        board.validate()?;

        let successors: Vec<Board> = Self::generate_pseudo_legal(board)
            .iter()
            .map(|mv| board.apply(mv))
            .collect();

        debug!(
            side = ?board.side_to_move(),
            count = successors.len(),
            "generated successors"
        );

        Ok(successors)
    }

    /// 生成走子方的所有合法走法（过滤掉会导致被将军的走法）
    pub fn generate_legal(board: &Board) -> Vec<Move> {
        let side = board.side_to_move();

        Self::generate_pseudo_legal(board)
            .into_iter()
            .filter(|mv| !Self::is_in_check(&board.apply(mv), side))
            .collect()
    }

    /// 生成所有合法后继棋盘
    pub fn legal_successors(board: &Board) -> Result<Vec<Board>> {
        board.validate()?;

        let successors: Vec<Board> = Self::generate_legal(board)
            .iter()
            .map(|mv| board.apply(mv))
            .collect();

        debug!(
            side = ?board.side_to_move(),
            count = successors.len(),
            "generated legal successors"
        );

        Ok(successors)
    }

    /// 生成指定棋子的所有伪合法走法
    fn generate_piece_moves(board: &Board, pos: Position, piece: Piece, moves: &mut Vec<Move>) {
        match piece.piece_type {
            PieceType::King => {
                Self::generate_step_moves(board, pos, piece, &ALL_DIRECTIONS, moves)
            }
            PieceType::Knight => {
                Self::generate_step_moves(board, pos, piece, &KNIGHT_JUMPS, moves)
            }
            PieceType::Rook => {
                Self::generate_slide_moves(board, pos, piece, &ROOK_DIRECTIONS, moves)
            }
            PieceType::Bishop => {
                Self::generate_slide_moves(board, pos, piece, &BISHOP_DIRECTIONS, moves)
            }
            PieceType::Queen => {
                Self::generate_slide_moves(board, pos, piece, &ALL_DIRECTIONS, moves)
            }
            PieceType::Pawn => Self::generate_pawn_moves(board, pos, piece, moves),
        }
    }

    /// 生成固定偏移的走法（王、马）
    fn generate_step_moves(
        board: &Board,
        pos: Position,
        piece: Piece,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in offsets {
            if let Some(to) = pos.offset(dr, df) {
                Self::try_add_move(board, pos, to, piece, moves);
            }
        }
    }

    /// 生成滑行走法（车、象、后）
    fn generate_slide_moves(
        board: &Board,
        pos: Position,
        piece: Piece,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in directions {
            let mut current = pos;
            while let Some(to) = current.offset(dr, df) {
                if let Some(target) = board.get(to) {
                    // 遇到棋子
                    if target.side != piece.side {
                        moves.push(Move::with_capture(pos, to, piece, target));
                    }
                    break;
                }
                moves.push(Move::new(pos, to, piece));
                current = to;
            }
        }
    }

    /// 生成兵的走法
    fn generate_pawn_moves(board: &Board, pos: Position, piece: Piece, moves: &mut Vec<Move>) {
        let forward = piece.side.forward();
        let start_rank = match piece.side {
            Side::White => WHITE_PAWN_RANK,
            Side::Black => BLACK_PAWN_RANK,
        };

        // 前进一步，起始行可以前进两步
        if let Some(one) = pos.offset(forward, 0) {
            if board.get(one).is_none() {
                moves.push(Move::new(pos, one, piece));

                if pos.rank == start_rank {
                    if let Some(two) = one.offset(forward, 0) {
                        if board.get(two).is_none() {
                            moves.push(Move::new(pos, two, piece));
                        }
                    }
                }
            }
        }

        // 斜前方吃子
        for df in [-1i8, 1i8] {
            if let Some(to) = pos.offset(forward, df) {
                if let Some(target) = board.get(to) {
                    if target.side != piece.side {
                        moves.push(Move::with_capture(pos, to, piece, target));
                    }
                }
            }
        }
    }

    /// 尝试添加走法（检查目标位置是否可以移动）
    fn try_add_move(
        board: &Board,
        from: Position,
        to: Position,
        piece: Piece,
        moves: &mut Vec<Move>,
    ) {
        if let Some(target) = board.get(to) {
            // 目标位置有棋子
            if target.side != piece.side {
                moves.push(Move::with_capture(from, to, piece, target));
            }
        } else {
            moves.push(Move::new(from, to, piece));
        }
    }

    /// 检查指定阵营的王是否被将军
    pub fn is_in_check(board: &Board, side: Side) -> bool {
        match board.find_king(side) {
            Some(king_pos) => Self::is_square_attacked(board, king_pos, side.opponent()),
            None => false, // 没有王，视为不被将军
        }
    }

    /// 检查目标位置是否被指定阵营攻击
    pub fn is_square_attacked(board: &Board, target: Position, by: Side) -> bool {
        let is_attacker = |pos: Position, types: &[PieceType]| {
            board
                .get(pos)
                .is_some_and(|p| p.side == by && types.contains(&p.piece_type))
        };

        // 兵：从目标位置反向看斜后方
        for df in [-1i8, 1i8] {
            if let Some(pos) = target.offset(-by.forward(), df) {
                if is_attacker(pos, &[PieceType::Pawn]) {
                    return true;
                }
            }
        }

        if KNIGHT_JUMPS
            .iter()
            .filter_map(|&(dr, df)| target.offset(dr, df))
            .any(|pos| is_attacker(pos, &[PieceType::Knight]))
        {
            return true;
        }

        if ALL_DIRECTIONS
            .iter()
            .filter_map(|&(dr, df)| target.offset(dr, df))
            .any(|pos| is_attacker(pos, &[PieceType::King]))
        {
            return true;
        }

        let rays = ROOK_DIRECTIONS
            .iter()
            .map(|d| (d, [PieceType::Rook, PieceType::Queen]))
            .chain(
                BISHOP_DIRECTIONS
                    .iter()
                    .map(|d| (d, [PieceType::Bishop, PieceType::Queen])),
            );

        for (&(dr, df), sliders) in rays {
            let mut current = target;
            while let Some(next) = current.offset(dr, df) {
                if board.get(next).is_some() {
                    if is_attacker(next, &sliders) {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }

        false
    }

    /// 检查是否将死（当前走子方被将军且没有合法走法）
    pub fn is_checkmate(board: &Board) -> bool {
        Self::is_in_check(board, board.side_to_move()) && Self::generate_legal(board).is_empty()
    }
}
