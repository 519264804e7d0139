//! Services module
//!
//! Este módulo contiene la lógica de negocio: construcción de rutas con
//! control de capacidad y el hub de seguimiento en vivo.

pub mod route_builder;
pub mod tracking_hub;
pub mod tracking_service;

pub use route_builder::{BuildRouteCommand, RouteBuilder};
pub use tracking_hub::{BroadcastReport, Subscription, TrackingHub};
pub use tracking_service::TrackingService;
