pub mod route_routes;
pub mod tracking_routes;
