//! Store en memoria
//!
//! Se usa en los tests y cuando el servicio arranca sin `DATABASE_URL`.
//! Los datos se pierden al reiniciar el proceso.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::TransportStore;
use crate::models::{NewRoute, Route, RouteFilters, Student, Van};
use crate::utils::errors::AppError;

#[derive(Clone, Default)]
pub struct InMemoryTransportStore {
    vans: Arc<RwLock<HashMap<Uuid, Van>>>,
    students: Arc<RwLock<HashMap<Uuid, Student>>>,
    routes: Arc<RwLock<Vec<Route>>>,
}

impl InMemoryTransportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_van(&self, van: Van) {
        self.vans.write().await.insert(van.id, van);
    }

    pub async fn insert_student(&self, student: Student) {
        self.students.write().await.insert(student.id, student);
    }

    pub async fn route_count(&self) -> usize {
        self.routes.read().await.len()
    }
}

#[async_trait]
impl TransportStore for InMemoryTransportStore {
    async fn get_van(&self, id: Uuid) -> Result<Option<Van>, AppError> {
        Ok(self.vans.read().await.get(&id).cloned())
    }

    async fn get_students_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Student>, AppError> {
        let students = self.students.read().await;
        let mut found: Vec<Student> = Vec::with_capacity(ids.len());
        for id in ids {
            if found.iter().any(|s| s.id == *id) {
                continue;
            }
            if let Some(student) = students.get(id) {
                found.push(student.clone());
            }
        }
        Ok(found)
    }

    async fn save_route(&self, route: NewRoute) -> Result<Route, AppError> {
        let saved = Route {
            id: Uuid::new_v4(),
            agency_id: route.agency_id,
            van_id: route.van_id,
            driver_id: route.driver_id,
            trip_type: route.trip_type,
            stops: route.stops,
            student_ids: route.student_ids,
            created_at: Utc::now(),
        };
        self.routes.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn update_van_position(&self, id: Uuid, lat: f64, lng: f64) -> Result<bool, AppError> {
        let mut vans = self.vans.write().await;
        match vans.get_mut(&id) {
            Some(van) => {
                van.current_position.lat = lat;
                van.current_position.lng = lng;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_van_tracking_flag(&self, id: Uuid, value: bool) -> Result<bool, AppError> {
        let mut vans = self.vans.write().await;
        match vans.get_mut(&id) {
            Some(van) => {
                van.track_always = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_routes(&self, filters: &RouteFilters) -> Result<Vec<Route>, AppError> {
        let routes = self.routes.read().await;
        Ok(routes.iter().filter(|r| filters.matches(r)).cloned().collect())
    }

    async fn delete_route(&self, id: Uuid) -> Result<bool, AppError> {
        let mut routes = self.routes.write().await;
        let before = routes.len();
        routes.retain(|r| r.id != id);
        Ok(routes.len() != before)
    }
}
