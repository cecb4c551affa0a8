//! Text renderings of tables and matrices for diagnostics.
mod render;

pub use render::{render_json, render_matrix, render_table, DEFAULT_MAX_ROWS};
