mod bookings_test;
mod directory_test;
mod middleware_test;
mod slots_test;
