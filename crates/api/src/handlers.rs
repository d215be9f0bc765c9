pub mod bookings;
pub mod services;
pub mod settings;
pub mod slots;
