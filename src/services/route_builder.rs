//! Constructor de rutas
//!
//! Valida el van y los estudiantes seleccionados, ordena las paradas y
//! persiste la ruta resultante (depósito → estudiantes → escuela).
//!
//! El orden de los estudiantes es por coordenadas de la escuela
//! (latitud, luego longitud). Es una aproximación para agrupar por escuela
//! de destino, no una optimización de distancia. Además se asume una sola
//! escuela por viaje: la parada final usa la escuela del primer estudiante
//! en el orden resultante.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{NewRoute, Route, Stop, Student, Van};
use crate::repositories::TransportStore;
use crate::utils::errors::{not_found_error, AppError};

/// Datos de entrada para construir una ruta
#[derive(Debug, Clone)]
pub struct BuildRouteCommand {
    pub agency_id: Uuid,
    pub van_id: Uuid,
    pub trip_type: String,
    pub student_ids: Vec<Uuid>,
}

pub struct RouteBuilder<'a> {
    store: &'a dyn TransportStore,
}

impl<'a> RouteBuilder<'a> {
    pub fn new(store: &'a dyn TransportStore) -> Self {
        Self { store }
    }

    pub async fn build_route(&self, command: BuildRouteCommand) -> Result<Route, AppError> {
        let van = self
            .store
            .get_van(command.van_id)
            .await?
            .ok_or_else(|| not_found_error("Van", &command.van_id.to_string()))?;

        let driver_id = check_van_ready(&van)?;

        let requested = dedup_ids(&command.student_ids);
        let students = self.store.get_students_by_ids(&requested).await?;
        if students.len() < requested.len() {
            log::warn!(
                "⚠️ Solo {} de {} estudiantes encontrados para el van {}",
                students.len(),
                requested.len(),
                van.id
            );
        }

        check_capacity(&van, &students)?;

        let ordered = order_students(students);
        let stops = build_stops(&van, &ordered);
        let student_ids = ordered.iter().map(|s| s.id).collect();

        let route = self
            .store
            .save_route(NewRoute {
                agency_id: command.agency_id,
                van_id: van.id,
                driver_id: Some(driver_id),
                trip_type: command.trip_type,
                stops,
                student_ids,
            })
            .await?;

        log::info!(
            "✅ Ruta {} creada para el van {} con {} paradas",
            route.id,
            route.van_id,
            route.stops.len()
        );
        Ok(route)
    }
}

/// Verifica que el van esté aprobado y tenga conductor; devuelve el conductor
pub fn check_van_ready(van: &Van) -> Result<Uuid, AppError> {
    if !van.is_approved() {
        return Err(AppError::InvalidState("van not approved".to_string()));
    }
    van.assigned_driver_id
        .ok_or_else(|| AppError::InvalidState("no driver assigned".to_string()))
}

pub fn check_capacity(van: &Van, students: &[Student]) -> Result<(), AppError> {
    if students.is_empty() {
        return Err(AppError::InvalidInput("no students selected".to_string()));
    }
    let capacity = van.capacity as usize;
    if students.len() > capacity {
        return Err(AppError::CapacityExceeded {
            count: students.len(),
            capacity,
        });
    }
    Ok(())
}

/// Orden total por (school_lat, school_lng, id): no depende del orden de entrada
pub fn order_students(mut students: Vec<Student>) -> Vec<Student> {
    students.sort_by(|a, b| {
        a.school
            .lat
            .total_cmp(&b.school.lat)
            .then(a.school.lng.total_cmp(&b.school.lng))
            .then_with(|| a.id.cmp(&b.id))
    });
    students
}

/// `ordered` no puede estar vacío: la escuela sale del primer estudiante
pub fn build_stops(van: &Van, ordered: &[Student]) -> Vec<Stop> {
    let mut stops = Vec::with_capacity(ordered.len() + 2);
    stops.push(Stop::depot(van.start_position));
    stops.extend(
        ordered
            .iter()
            .map(|s| Stop::student(s.id, s.name.clone(), s.home)),
    );
    if let Some(first) = ordered.first() {
        stops.push(Stop::school(first.school));
    }
    stops
}

fn dedup_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, StopKind, VanStatus};
    use crate::repositories::InMemoryTransportStore;

    fn approved_van(capacity: u32) -> Van {
        Van {
            id: Uuid::new_v4(),
            van_number: "MH12-AB-1234".to_string(),
            capacity,
            agency_id: Uuid::new_v4(),
            assigned_driver_id: Some(Uuid::new_v4()),
            status: VanStatus::Approved,
            track_always: false,
            current_position: GeoPoint::new(18.5204, 73.8567),
            start_position: GeoPoint::new(1.0, 2.0),
        }
    }

    fn student(name: &str, school: (f64, f64)) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: name.to_string(),
            home: GeoPoint::new(school.0 + 0.5, school.1 + 0.5),
            school: GeoPoint::new(school.0, school.1),
            agency_id: Uuid::new_v4(),
            assigned_van_id: None,
            schedule: "morning".to_string(),
            status: "approved".to_string(),
        }
    }

    async fn seeded(van: &Van, students: &[Student]) -> InMemoryTransportStore {
        let store = InMemoryTransportStore::new();
        store.insert_van(van.clone()).await;
        for s in students {
            store.insert_student(s.clone()).await;
        }
        store
    }

    fn command(van: &Van, students: &[Student]) -> BuildRouteCommand {
        BuildRouteCommand {
            agency_id: van.agency_id,
            van_id: van.id,
            trip_type: "pickup".to_string(),
            student_ids: students.iter().map(|s| s.id).collect(),
        }
    }

    #[tokio::test]
    async fn test_orders_stops_by_school_coordinates() {
        let van = approved_van(3);
        let s1 = student("S1", (10.0, 10.0));
        let s2 = student("S2", (5.0, 5.0));
        let s3 = student("S3", (5.0, 8.0));
        let students = vec![s1.clone(), s2.clone(), s3.clone()];
        let store = seeded(&van, &students).await;

        let route = RouteBuilder::new(&store)
            .build_route(command(&van, &students))
            .await
            .unwrap();

        let names: Vec<&str> = route.stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["START (DEPOT)", "S2", "S3", "S1", "SCHOOL"]);
        assert_eq!(route.stops[0].kind, StopKind::Depot);
        assert_eq!(route.stops[0].position, van.start_position);
        assert_eq!(route.stops[1].position, s2.home);
        assert_eq!(route.stops[4].kind, StopKind::School);
        assert_eq!(route.stops[4].position, s2.school);
        assert_eq!(route.driver_id, van.assigned_driver_id);
        assert_eq!(route.student_ids, vec![s2.id, s3.id, s1.id]);
        assert_eq!(store.route_count().await, 1);
    }

    #[tokio::test]
    async fn test_capacity_exceeded_creates_no_route() {
        let van = approved_van(2);
        let students = vec![
            student("A", (1.0, 1.0)),
            student("B", (2.0, 2.0)),
            student("C", (3.0, 3.0)),
        ];
        let store = seeded(&van, &students).await;

        let err = RouteBuilder::new(&store)
            .build_route(command(&van, &students))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CapacityExceeded { count: 3, capacity: 2 }));
        assert_eq!(store.route_count().await, 0);
    }

    #[tokio::test]
    async fn test_rejects_pending_van() {
        let mut van = approved_van(3);
        van.status = VanStatus::Pending;
        let students = vec![student("A", (1.0, 1.0))];
        let store = seeded(&van, &students).await;

        let err = RouteBuilder::new(&store)
            .build_route(command(&van, &students))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidState(ref m) if m == "van not approved"));
        assert_eq!(store.route_count().await, 0);
    }

    #[tokio::test]
    async fn test_rejects_van_without_driver() {
        let mut van = approved_van(3);
        van.assigned_driver_id = None;
        let students = vec![student("A", (1.0, 1.0))];
        let store = seeded(&van, &students).await;

        let err = RouteBuilder::new(&store)
            .build_route(command(&van, &students))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidState(ref m) if m == "no driver assigned"));
        assert_eq!(store.route_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_van_is_not_found() {
        let van = approved_van(3);
        let store = InMemoryTransportStore::new();

        let err = RouteBuilder::new(&store)
            .build_route(command(&van, &[]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_no_resolved_students_is_invalid_input() {
        let van = approved_van(3);
        let store = seeded(&van, &[]).await;
        let mut cmd = command(&van, &[]);
        cmd.student_ids = vec![Uuid::new_v4()];

        let err = RouteBuilder::new(&store).build_route(cmd).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "no students selected"));
        assert_eq!(store.route_count().await, 0);
    }

    #[tokio::test]
    async fn test_partial_resolution_uses_resolved_subset() {
        let van = approved_van(2);
        let a = student("A", (1.0, 1.0));
        let b = student("B", (2.0, 2.0));
        let store = seeded(&van, &[a.clone(), b.clone()]).await;
        let mut cmd = command(&van, &[a.clone(), b.clone()]);
        cmd.student_ids.push(Uuid::new_v4());

        let route = RouteBuilder::new(&store).build_route(cmd).await.unwrap();

        assert_eq!(route.stops.len(), 4);
        assert_eq!(route.student_ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let students = vec![
            student("A", (3.0, 1.0)),
            student("B", (1.0, 9.0)),
            student("C", (1.0, 2.0)),
            student("D", (3.0, 1.0)),
        ];
        let mut reversed = students.clone();
        reversed.reverse();
        let first: Vec<Uuid> = order_students(students.clone()).iter().map(|s| s.id).collect();
        let second: Vec<Uuid> = order_students(reversed).iter().map(|s| s.id).collect();
        assert_eq!(first, second);

        // Empate exacto en la escuela: decide el id
        let (a, d) = (&students[0], &students[3]);
        let tied = if a.id < d.id { [&a.name, &d.name] } else { [&d.name, &a.name] };
        let names: Vec<String> = order_students(students.clone())
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["C".to_string(), "B".to_string(), tied[0].clone(), tied[1].clone()]);
    }

    #[tokio::test]
    async fn test_same_student_set_gives_same_stops_in_any_request_order() {
        let van = approved_van(3);
        let a = student("A", (5.0, 5.0));
        let b = student("B", (5.0, 5.0));
        let c = student("C", (4.0, 9.0));
        let store = seeded(&van, &[a.clone(), b.clone(), c.clone()]).await;
        let builder = RouteBuilder::new(&store);

        let first = builder
            .build_route(command(&van, &[a.clone(), b.clone(), c.clone()]))
            .await
            .unwrap();
        let second = builder
            .build_route(command(&van, &[b.clone(), c.clone(), a.clone()]))
            .await
            .unwrap();

        assert_eq!(first.stops, second.stops);
        assert_eq!(first.student_ids, second.student_ids);
        assert_eq!(first.stops[1].name, "C");
    }
}
