//! Tool definitions module.
//!
//! This module exports all available tool definitions, grouped by the
//! Trello resource they operate on.

pub mod boards;
pub mod cards;
pub mod common;
pub mod lists;

pub use boards::{
    CreateBoardTool, GetBoardByIdTool, GetBoardByNameTool, GetBoardsTool, GetCardsByBoardIdTool,
    GetListsByBoardIdTool,
};
pub use cards::{
    AddAttachmentToCardTool, AddCommentToCardTool, CreateCardTool, DeleteCardTool,
    GetCardByIdTool, MoveCardToListTool, UpdateCardTool,
};
pub use lists::{
    CreateListTool, DeleteListTool, GetCardsByListIdTool, GetListByIdTool, UpdateListTool,
};
