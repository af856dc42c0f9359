pub mod bars;
pub mod fetch;
pub mod kind;
pub mod quotes;
pub mod trades;
