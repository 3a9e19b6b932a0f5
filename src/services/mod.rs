pub mod recommend;

pub use recommend::recommend_by_id;
