pub mod markdown;
pub mod page;

pub use markdown::render_markdown;
pub use page::render_board;
