use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::TransportStore;
use crate::models::{GeoPoint, NewRoute, Route, RouteFilters, Stop, Student, Van, VanStatus};
use crate::utils::errors::AppError;

#[derive(Debug, sqlx::FromRow)]
struct VanRow {
    id: Uuid,
    van_number: String,
    capacity: i32,
    agency_id: Uuid,
    assigned_driver_id: Option<Uuid>,
    status: String,
    track_always: bool,
    current_lat: f64,
    current_lng: f64,
    start_lat: f64,
    start_lng: f64,
}

impl From<VanRow> for Van {
    fn from(row: VanRow) -> Self {
        Self {
            id: row.id,
            van_number: row.van_number,
            // Una capacidad negativa en la base se trata como cero
            capacity: u32::try_from(row.capacity).unwrap_or(0),
            agency_id: row.agency_id,
            assigned_driver_id: row.assigned_driver_id,
            status: VanStatus::from_db(&row.status),
            track_always: row.track_always,
            current_position: GeoPoint::new(row.current_lat, row.current_lng),
            start_position: GeoPoint::new(row.start_lat, row.start_lng),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    name: String,
    home_lat: f64,
    home_lng: f64,
    school_lat: f64,
    school_lng: f64,
    agency_id: Uuid,
    assigned_van_id: Option<Uuid>,
    schedule: String,
    status: String,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            home: GeoPoint::new(row.home_lat, row.home_lng),
            school: GeoPoint::new(row.school_lat, row.school_lng),
            agency_id: row.agency_id,
            assigned_van_id: row.assigned_van_id,
            schedule: row.schedule,
            status: row.status,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RouteRow {
    id: Uuid,
    agency_id: Uuid,
    van_id: Uuid,
    driver_id: Option<Uuid>,
    trip_type: String,
    stops: Json<Vec<Stop>>,
    student_ids: Vec<Uuid>,
    created_at: chrono::DateTime<Utc>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Self {
            id: row.id,
            agency_id: row.agency_id,
            van_id: row.van_id,
            driver_id: row.driver_id,
            trip_type: row.trip_type,
            stops: row.stops.0,
            student_ids: row.student_ids,
            created_at: row.created_at,
        }
    }
}

pub struct PostgresTransportStore {
    pool: PgPool,
}

impl PostgresTransportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransportStore for PostgresTransportStore {
    async fn get_van(&self, id: Uuid) -> Result<Option<Van>, AppError> {
        let row = sqlx::query_as::<_, VanRow>(
            r#"
            SELECT id, van_number, capacity, agency_id, assigned_driver_id, status,
                   track_always, current_lat, current_lng, start_lat, start_lng
            FROM vans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Van::from))
    }

    async fn get_students_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Student>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, name, home_lat, home_lng, school_lat, school_lng,
                   agency_id, assigned_van_id, schedule, status
            FROM students
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn save_route(&self, route: NewRoute) -> Result<Route, AppError> {
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            INSERT INTO routes (id, agency_id, van_id, driver_id, trip_type, stops, student_ids, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, agency_id, van_id, driver_id, trip_type, stops, student_ids, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(route.agency_id)
        .bind(route.van_id)
        .bind(route.driver_id)
        .bind(route.trip_type)
        .bind(Json(route.stops))
        .bind(route.student_ids)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_van_position(&self, id: Uuid, lat: f64, lng: f64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE vans SET current_lat = $2, current_lng = $3 WHERE id = $1")
            .bind(id)
            .bind(lat)
            .bind(lng)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_van_tracking_flag(&self, id: Uuid, value: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE vans SET track_always = $2 WHERE id = $1")
            .bind(id)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_routes(&self, filters: &RouteFilters) -> Result<Vec<Route>, AppError> {
        let rows = sqlx::query_as::<_, RouteRow>(
            r#"
            SELECT id, agency_id, van_id, driver_id, trip_type, stops, student_ids, created_at
            FROM routes
            WHERE ($1::uuid IS NULL OR agency_id = $1)
              AND ($2::uuid IS NULL OR driver_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filters.agency_id)
        .bind(filters.driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn delete_route(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
