pub mod booking;
pub mod person;
pub mod slot;
