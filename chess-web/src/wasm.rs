//! 浏览器绑定
//!
//! 方法名与演示页面的调用保持一致：`Board.from`、`get_pieces`、
//! `generate_moves`，以及棋子的 `owner`、`type`、`rank`、`file`。
//! `free` 由 wasm-bindgen 自动生成。

use wasm_bindgen::prelude::*;

use crate::handle::{BoardHandle, PieceHandle};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct Board {
    handle: BoardHandle,
}

#[wasm_bindgen]
impl Board {
    /// 解析文本棋盘，失败时抛出异常
    pub fn from(text: &str, is_current_player_white: bool) -> Result<Board, JsError> {
        let handle = BoardHandle::from_layout(text, is_current_player_white)?;
        Ok(Board { handle })
    }

    /// 对每个棋子调用一次回调
    pub fn get_pieces(&self, callback: &js_sys::Function) -> Result<(), JsValue> {
        let mut pieces = Vec::new();
        self.handle.get_pieces(|piece| pieces.push(piece));

        for piece in pieces {
            callback.call1(&JsValue::NULL, &JsValue::from(Piece { handle: piece }))?;
        }
        Ok(())
    }

    /// 所有后继棋盘
    pub fn generate_moves(&self) -> Result<js_sys::Array, JsError> {
        let boards = self.handle.generate_moves()?;
        Ok(boards
            .into_iter()
            .map(|handle| JsValue::from(Board { handle }))
            .collect())
    }

    /// 只包含合法后继的版本
    pub fn legal_moves(&self) -> Result<js_sys::Array, JsError> {
        let boards = self.handle.legal_moves()?;
        Ok(boards
            .into_iter()
            .map(|handle| JsValue::from(Board { handle }))
            .collect())
    }

    pub fn to_layout(&self) -> String {
        self.handle.to_layout()
    }
}

#[wasm_bindgen]
pub struct Piece {
    handle: PieceHandle,
}

#[wasm_bindgen]
impl Piece {
    pub fn owner(&self) -> String {
        self.handle.owner().to_string()
    }

    #[wasm_bindgen(js_name = "type")]
    pub fn piece_type(&self) -> String {
        self.handle.piece_type().to_string()
    }

    pub fn rank(&self) -> u8 {
        self.handle.rank()
    }

    pub fn file(&self) -> u8 {
        self.handle.file()
    }
}
