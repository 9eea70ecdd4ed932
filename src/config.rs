use serde::Deserialize;

/// Operating-hours and slot-length settings for the hall.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    pub open_hour: u8,
    pub close_hour: u8,
    pub slot_duration_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub schedule: ScheduleConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://hall_booking.db".into());
        let schedule = ScheduleConfig {
            open_hour: std::env::var("HALL_OPEN_HOUR")
                .ok()
                .and_then(|v| v.parse::<u8>().ok())
                .unwrap_or(9),
            close_hour: std::env::var("HALL_CLOSE_HOUR")
                .ok()
                .and_then(|v| v.parse::<u8>().ok())
                .unwrap_or(18),
            slot_duration_minutes: std::env::var("SLOT_DURATION_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        schedule.validate()?;
        Ok(Self {
            database_url,
            schedule,
        })
    }
}

impl ScheduleConfig {
    /// Bookings may start in `[open_hour, close_hour)` and must end by
    /// `close_hour:00` the same day.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.open_hour >= self.close_hour {
            anyhow::bail!(
                "open hour {} must be before close hour {}",
                self.open_hour,
                self.close_hour
            );
        }
        if self.close_hour > 23 {
            anyhow::bail!("close hour {} out of range", self.close_hour);
        }
        if self.slot_duration_minutes <= 0 {
            anyhow::bail!("slot duration must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_valid() {
        let cfg = ScheduleConfig {
            open_hour: 9,
            close_hour: 18,
            slot_duration_minutes: 60,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let cfg = ScheduleConfig {
            open_hour: 18,
            close_hour: 9,
            slot_duration_minutes: 60,
        };
        assert!(cfg.validate().is_err());
    }
}
