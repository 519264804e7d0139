use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct LocationUpdateResponse {
    message: String,
    delivered: usize,
}

#[derive(Debug, Deserialize)]
struct ToggleTrackingResponse {
    track_always: bool,
}

struct Trip {
    server: String,
    van_id: String,
    from: (f64, f64),
    to: (f64, f64),
    steps: u32,
    interval: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚐 Simulador de van - School Transport".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let server = prompt_or("Servidor", "http://localhost:8000")?;
    let van_id = prompt("Van ID")?;
    let client = reqwest::Client::new();

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 📍 Simular recorrido");
        println!("2. 🛰️ Alternar seguimiento del van");
        println!("3. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-3)")?;

        match choice.as_str() {
            "1" => {
                let trip = read_trip(&server, &van_id)?;
                if let Err(e) = simulate_trip(&client, &trip).await {
                    println!("{} {:#}", "❌ Error en la simulación:".bright_red(), e);
                }
            }
            "2" => {
                if let Err(e) = toggle_tracking(&client, &server, &van_id).await {
                    println!("{} {:#}", "❌ Error:".bright_red(), e);
                }
            }
            "3" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

fn read_trip(server: &str, van_id: &str) -> Result<Trip> {
    let from = parse_point(&prompt_or("Origen (lat,lng)", "18.5204,73.8567")?)?;
    let to = parse_point(&prompt_or("Destino (lat,lng)", "18.5314,73.8446")?)?;
    let steps = prompt_or("Número de reportes", "10")?
        .parse()
        .context("número de reportes inválido")?;
    let interval_ms: u64 = prompt_or("Intervalo (ms)", "1000")?
        .parse()
        .context("intervalo inválido")?;

    Ok(Trip {
        server: server.to_string(),
        van_id: van_id.to_string(),
        from,
        to,
        steps,
        interval: Duration::from_millis(interval_ms),
    })
}

async fn simulate_trip(client: &reqwest::Client, trip: &Trip) -> Result<()> {
    let url = format!("{}/update-location", trip.server);
    let steps = trip.steps.max(1);

    for step in 0..=steps {
        let (lat, lng) = interpolate(trip.from, trip.to, step as f64 / steps as f64);
        let status = if step == steps { "arrived" } else { "moving" };

        let response = client
            .post(&url)
            .json(&json!({
                "van_id": trip.van_id,
                "lat": lat,
                "lng": lng,
                "status": status,
            }))
            .send()
            .await
            .context("no se pudo contactar al servidor")?;

        if !response.status().is_success() {
            let status_code = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("HTTP {}: {}", status_code, body);
        }

        let body: LocationUpdateResponse = response.json().await?;
        println!(
            "{} ({:.5}, {:.5}) [{}] -> {} ({} dashboards)",
            format!("#{:>3}", step).bright_cyan(),
            lat,
            lng,
            status,
            body.message,
            body.delivered
        );

        if step < steps {
            tokio::time::sleep(trip.interval).await;
        }
    }

    println!("{}", "✅ Recorrido completado".bright_green());
    Ok(())
}

async fn toggle_tracking(client: &reqwest::Client, server: &str, van_id: &str) -> Result<()> {
    let response = client
        .post(format!("{}/vans/{}/toggle-tracking", server, van_id))
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    let body: ToggleTrackingResponse = response.json().await?;
    println!("{} {}", "🛰️ track_always =".bright_blue(), body.track_always);
    Ok(())
}

fn interpolate(from: (f64, f64), to: (f64, f64), t: f64) -> (f64, f64) {
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

fn parse_point(raw: &str) -> Result<(f64, f64)> {
    let (lat, lng) = raw
        .split_once(',')
        .context("formato esperado: lat,lng")?;
    Ok((lat.trim().parse()?, lng.trim().parse()?))
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", format!("{}: ", label).bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_or(label: &str, default: &str) -> Result<String> {
    let value = prompt(&format!("{} [{}]", label, default))?;
    Ok(if value.is_empty() { default.to_string() } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(interpolate((0.0, 0.0), (10.0, 20.0), 0.0), (0.0, 0.0));
        assert_eq!(interpolate((0.0, 0.0), (10.0, 20.0), 1.0), (10.0, 20.0));
        assert_eq!(interpolate((0.0, 0.0), (10.0, 20.0), 0.5), (5.0, 10.0));
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("18.5, 73.8").unwrap(), (18.5, 73.8));
        assert!(parse_point("18.5").is_err());
    }
}
