//! 引擎常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 每方最多棋子数
pub const MAX_PIECES_PER_SIDE: usize = 16;

/// 每方最多将（王）数
pub const MAX_KINGS_PER_SIDE: usize = 1;

/// 编码时使用的空格子字符
pub const EMPTY_SQUARE: char = '.';

/// 解码时接受的空格子字符
pub const EMPTY_PLACEHOLDERS: [char; 2] = ['.', 'x'];

/// 白方兵的起始行
pub const WHITE_PAWN_RANK: u8 = 1;

/// 黑方兵的起始行
pub const BLACK_PAWN_RANK: u8 = 6;

/// 演示页面使用的初始局面（白方在下，第一行是第 7 行）
pub const DEFAULT_LAYOUT: &str = "
    rnbkqbnr
    pppppppp
    xxxxxxxx
    xxxxxxxx
    xxxxxxxx
    xxxxxxxx
    PPPPPPPP
    RNBKQBNR
";
