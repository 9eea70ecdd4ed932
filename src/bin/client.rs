//! Terminal client for the hall-booking API: list slots, register, book,
//! and review bookings. Network failures are reported and the menu loop
//! keeps going.

use std::io::{self, Write};
use std::time::Duration as StdDuration;

use anyhow::Context;
use serde::Deserialize;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

#[derive(Debug, Deserialize)]
struct SlotsResponse {
    available_slots: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BookingRow {
    id: i64,
    start_time: String,
    end_time: String,
    user_id: i64,
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    slot_minutes: i64,
}

impl ApiClient {
    fn new(base_url: String, slot_minutes: i64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(10))
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url,
            slot_minutes,
        })
    }

    async fn fetch_slots(&self) -> anyhow::Result<Vec<String>> {
        let res = self
            .http
            .get(format!("{}/available-slots", self.base_url))
            .send()
            .await
            .context("fetch slots")?;
        let body: SlotsResponse = res.json().await.context("parse slots response")?;
        Ok(body.available_slots)
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> anyhow::Result<reqwest::Response> {
        self.http
            .post(format!("{}/users/", self.base_url))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .context("send registration")
    }

    async fn book_slot(&self, slot: &str, user_id: i64) -> anyhow::Result<reqwest::Response> {
        let start = OffsetDateTime::parse(slot, &Rfc3339).context("parse slot instant")?;
        let end = start + Duration::minutes(self.slot_minutes);
        self.http
            .post(format!("{}/bookings/?user_id={}", self.base_url, user_id))
            .json(&json!({
                "start_time": start.format(&Rfc3339)?,
                "end_time": end.format(&Rfc3339)?,
            }))
            .send()
            .await
            .context("send booking")
    }

    async fn list_bookings(&self) -> anyhow::Result<Vec<BookingRow>> {
        let res = self
            .http
            .get(format!("{}/bookings/", self.base_url))
            .send()
            .await
            .context("fetch bookings")?;
        res.json().await.context("parse bookings response")
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Pull the server's human-readable message out of a failure response.
async fn detail_of(res: reqwest::Response) -> String {
    match res.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("detail")
            .and_then(|d| d.as_str())
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => "Unknown error".to_string(),
    }
}

async fn show_slots(api: &ApiClient) {
    match api.fetch_slots().await {
        Ok(slots) if slots.is_empty() => println!("No available slots today."),
        Ok(slots) => {
            println!("Available slots:");
            for (i, slot) in slots.iter().enumerate() {
                println!("  {}) {}", i + 1, slot);
            }
        }
        Err(e) => println!("Error fetching slots: {e:#}"),
    }
}

async fn do_register(api: &ApiClient) -> io::Result<()> {
    let username = prompt("Username")?;
    let email = prompt("Email (optional)")?;
    let password = prompt("Password")?;
    match api.register(&username, &email, &password).await {
        Ok(res) if res.status().is_success() => match res.json::<serde_json::Value>().await {
            Ok(user) => println!(
                "User registered successfully! Your user id is {}.",
                user.get("id").cloned().unwrap_or_default()
            ),
            Err(_) => println!("User registered successfully!"),
        },
        Ok(res) => println!("Registration failed: {}", detail_of(res).await),
        Err(e) => println!("Error during registration: {e:#}"),
    }
    Ok(())
}

async fn do_book(api: &ApiClient) -> io::Result<()> {
    let slots = match api.fetch_slots().await {
        Ok(s) => s,
        Err(e) => {
            println!("Error fetching slots: {e:#}");
            return Ok(());
        }
    };
    if slots.is_empty() {
        println!("No available slots today.");
        return Ok(());
    }
    for (i, slot) in slots.iter().enumerate() {
        println!("  {}) {}", i + 1, slot);
    }

    let pick = prompt("Select a slot number")?;
    let Some(slot) = pick
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| slots.get(i))
    else {
        println!("Invalid selection.");
        return Ok(());
    };

    let Ok(user_id) = prompt("Your user id")?.parse::<i64>() else {
        println!("Invalid user id.");
        return Ok(());
    };

    match api.book_slot(slot, user_id).await {
        Ok(res) if res.status().is_success() => println!("Slot booked successfully!"),
        Ok(res) => println!("Failed to book slot: {}", detail_of(res).await),
        Err(e) => println!("Error during booking: {e:#}"),
    }
    Ok(())
}

async fn show_bookings(api: &ApiClient) {
    match api.list_bookings().await {
        Ok(rows) if rows.is_empty() => println!("No bookings yet."),
        Ok(rows) => {
            for b in rows {
                println!(
                    "  #{} {} -> {} (user {})",
                    b.id, b.start_time, b.end_time, b.user_id
                );
            }
        }
        Err(e) => println!("Error fetching bookings: {e:#}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url =
        std::env::var("API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let slot_minutes = std::env::var("SLOT_DURATION_MINUTES")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(60);
    let api = ApiClient::new(base_url, slot_minutes)?;

    println!("Hall Booking System");
    loop {
        println!();
        println!("  1) Show available slots");
        println!("  2) Register");
        println!("  3) Book a slot");
        println!("  4) List bookings");
        println!("  q) Quit");
        match prompt("Choice")?.as_str() {
            "1" => show_slots(&api).await,
            "2" => do_register(&api).await?,
            "3" => do_book(&api).await?,
            "4" => show_bookings(&api).await,
            "q" | "Q" => break,
            other => println!("Unknown choice: {other}"),
        }
    }
    Ok(())
}
