pub mod a1_notation;
pub mod cell_position;
pub mod cell_update;
pub mod column;
pub mod layout;
pub mod row;
