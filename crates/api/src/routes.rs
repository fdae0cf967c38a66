pub mod bookings;
pub mod directory;
pub mod health;
pub mod slots;
