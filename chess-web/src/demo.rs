//! 演示流程
//!
//! 解析初始棋盘并渲染，渲染所有后继棋盘，按设置搜索最佳走法、
//! 连续走子，最后故意解析一个错误的棋盘，记录错误后继续执行。

use std::io::Write;

use anyhow::{Context, Result};
use chess_core::Searcher;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::engine::Engine;
use crate::render::{render, render_all};
use crate::settings::DemoSettings;
use crate::view::DemoBoard;

/// 故意构造的错误棋盘（第二行只有 7 个字符）
pub const MALFORMED_LAYOUT: &str = "
    rnbkqbnr
    ppppppp
    ........
    ........
    ........
    ........
    PPPPPPPP
    RNBKQBNR
";

/// 演示结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoSummary {
    /// 渲染的后继棋盘数
    pub successors: usize,
    /// 搜索到的最佳走法（坐标表示）
    pub best_move: Option<String>,
    /// 实际走了的步数
    pub plies_walked: u32,
    /// 错误棋盘是否被正确拒绝
    pub malformed_rejected: bool,
}

/// 运行演示，渲染结果写入 `out`
pub fn run_demo<W: Write>(
    engine: &Engine,
    settings: &DemoSettings,
    out: &mut W,
) -> Result<DemoSummary> {
    let mut summary = DemoSummary::default();

    let board = DemoBoard::from_layout(engine, &settings.layout, settings.white_to_move)
        .context("解析初始棋盘失败")?;
    info!(pieces = board.pieces().len(), "初始棋盘已解析");
    writeln!(out, "{}", render(&board))?;

    if settings.show_successors {
        let successors = if settings.legal_only {
            board.generate_legal_boards(engine)?
        } else {
            board.generate_boards(engine)?
        };
        info!(count = successors.len(), legal_only = settings.legal_only, "后继棋盘已生成");
        summary.successors = successors.len();

        if !successors.is_empty() {
            writeln!(out, "{}", render_all("successor", &successors))?;
        }
    }

    if settings.search_depth > 0 {
        let handle = engine.board_from(board.board_string(), board.is_white_to_move())?;
        let result = Searcher::new(settings.search_depth).search(handle.board())?;
        handle.free();

        info!(
            depth = settings.search_depth,
            nodes = result.nodes,
            score = %result.score,
            "搜索完成"
        );
        match result.best_move {
            Some(mv) => {
                writeln!(out, "best move: {} (score {})", mv, result.score)?;
                summary.best_move = Some(mv.to_string());
            }
            None => writeln!(out, "best move: none")?,
        }
    }

    let walk = walk(engine, &board, settings.walk_plies, settings.walk_seed)?;
    summary.plies_walked = walk.len() as u32;
    if !walk.is_empty() {
        writeln!(out, "{}", render_all("ply", &walk))?;
    }

    match DemoBoard::from_layout(engine, MALFORMED_LAYOUT, true) {
        Ok(_) => warn!("错误棋盘被意外接受"),
        Err(e) => {
            warn!(error = %e, "解析错误棋盘失败，继续执行");
            summary.malformed_rejected = true;
        }
    }

    Ok(summary)
}

/// 从 `start` 连续走 `plies` 步；有种子时随机选择后继，否则总是选第一个
///
/// 没有后继时提前结束。
pub fn walk(
    engine: &Engine,
    start: &DemoBoard,
    plies: u32,
    seed: Option<u64>,
) -> Result<Vec<DemoBoard>> {
    let mut rng = seed.map(ChaCha8Rng::seed_from_u64);
    let mut current = start.clone();
    // 步数来自设置文件，不按它预分配
    let mut path = Vec::new();

    for _ in 0..plies {
        let mut successors = current.generate_boards(engine)?;
        if successors.is_empty() {
            info!(plies = path.len(), "没有后继棋盘，停止走子");
            break;
        }

        let index = match rng.as_mut() {
            Some(rng) => rng.gen_range(0..successors.len()),
            None => 0,
        };
        current = successors.swap_remove(index);
        path.push(current.clone());
    }

    Ok(path)
}
