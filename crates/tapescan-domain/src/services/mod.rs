pub mod indicators;
pub mod screener;
