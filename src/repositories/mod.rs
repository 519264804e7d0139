//! Repositorios de datos
//!
//! `TransportStore` es la frontera con el almacenamiento: el constructor de
//! rutas y el hub de seguimiento solo hablan con este trait.

pub mod memory_store;
pub mod postgres_store;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewRoute, Route, RouteFilters, Student, Van};
use crate::utils::errors::AppError;

pub use memory_store::InMemoryTransportStore;
pub use postgres_store::PostgresTransportStore;

#[async_trait]
pub trait TransportStore: Send + Sync {
    async fn get_van(&self, id: Uuid) -> Result<Option<Van>, AppError>;

    /// Puede devolver menos estudiantes que ids solicitados si alguno no existe
    async fn get_students_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Student>, AppError>;

    async fn save_route(&self, route: NewRoute) -> Result<Route, AppError>;

    /// Devuelve `false` si el van no existe
    async fn update_van_position(&self, id: Uuid, lat: f64, lng: f64) -> Result<bool, AppError>;

    /// Devuelve `false` si el van no existe
    async fn update_van_tracking_flag(&self, id: Uuid, value: bool) -> Result<bool, AppError>;

    async fn list_routes(&self, filters: &RouteFilters) -> Result<Vec<Route>, AppError>;

    /// Devuelve `false` si la ruta no existe
    async fn delete_route(&self, id: Uuid) -> Result<bool, AppError>;
}
