pub mod kiln;
pub mod sheets;
