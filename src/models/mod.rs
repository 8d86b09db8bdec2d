pub mod event;
pub mod form;
pub mod meridiem;
pub mod tz_offset;
