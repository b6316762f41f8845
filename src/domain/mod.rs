pub mod address_record;
pub mod call_type;
pub mod date_range;
pub mod decimal_scale;
pub mod protocol;
pub mod sheets;
pub mod update;
