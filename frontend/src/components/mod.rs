pub mod activity_selector;
pub mod grid;
pub mod grid_size_selector;
pub mod navigation;
