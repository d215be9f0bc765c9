mod bookings_test;
mod health_test;
mod middleware_test;
mod services_test;
mod settings_test;
mod slots_test;
