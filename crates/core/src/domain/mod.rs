pub mod draw;
pub mod jackpot;
pub mod result;
