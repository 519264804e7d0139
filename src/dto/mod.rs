pub mod api_response;
pub mod route_dto;
pub mod tracking_dto;

pub use api_response::ApiResponse;
