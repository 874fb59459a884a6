/// Xiangqi domain types and rules.
pub mod chess;
