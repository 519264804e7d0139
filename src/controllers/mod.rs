pub mod location_socket_controller;
pub mod route_controller;
pub mod tracking_controller;
