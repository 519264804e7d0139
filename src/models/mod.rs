//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del transporte escolar:
//! vans, estudiantes, rutas con sus paradas y el evento de ubicación
//! que se difunde a los dashboards.

pub mod geo;
pub mod route;
pub mod student;
pub mod tracking;
pub mod van;

pub use geo::GeoPoint;
pub use route::{NewRoute, Route, RouteFilters, Stop, StopKind};
pub use student::Student;
pub use tracking::LocationBroadcast;
pub use van::{Van, VanStatus};
