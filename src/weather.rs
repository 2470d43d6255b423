use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::Serialize;

const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub summary: String,
}

impl WeatherForecast {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: &str) -> Self {
        WeatherForecast {
            date,
            temperature_c,
            temperature_f: 32 + (temperature_c as f64 / 0.5556) as i32,
            summary: summary.to_string(),
        }
    }
}

/// Five random daily forecasts starting the day after `today`.
pub fn forecast<R: Rng>(today: NaiveDate, rng: &mut R) -> Vec<WeatherForecast> {
    (1..=5)
        .filter_map(|i| today.checked_add_days(Days::new(i)))
        .map(|date| {
            let temperature_c = rng.random_range(-20..55);
            let summary = SUMMARIES[rng.random_range(0..SUMMARIES.len())];
            WeatherForecast::new(date, temperature_c, summary)
        })
        .collect()
}
