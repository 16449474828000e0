use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::{ApiConfig, LocationConfig};
use crate::error::{Result, WeatherError};

const USER_AGENT: &str = concat!("tiempo/", env!("CARGO_PKG_VERSION"));

const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,windspeed_10m,weathercode";
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Forecast envelope. Times are local to the location (`timezone=auto`).
#[derive(Deserialize, Debug, Clone)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(default)]
    pub timezone: Option<String>,

    pub current_weather: CurrentWeather,

    #[serde(default)]
    pub hourly: Hourly,

    #[serde(default)]
    pub daily: Daily,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CurrentWeather {
    pub time: String,
    pub temperature: f64,
    pub windspeed: f64,
    #[serde(default)]
    pub winddirection: Option<f64>,
    pub weathercode: i32,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Hourly {
    #[serde(default)]
    pub time: Vec<String>,

    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<Option<f64>>,

    #[serde(rename = "relativehumidity_2m", default)]
    pub relative_humidity: Vec<Option<f64>>,

    #[serde(rename = "windspeed_10m", default)]
    pub wind_speed: Vec<Option<f64>>,

    #[serde(default)]
    pub weathercode: Vec<Option<i32>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Daily {
    #[serde(default)]
    pub time: Vec<String>,

    #[serde(default)]
    pub weathercode: Vec<Option<i32>>,

    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<Option<f64>>,

    #[serde(rename = "temperature_2m_min", default)]
    pub temperature_min: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(api.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }

    /// One request, no retries. Non-2xx statuses and undecodable bodies are errors.
    pub async fn fetch(&self, location: &LocationConfig) -> Result<ForecastResponse> {
        let url = self.forecast_url();
        tracing::debug!(
            url = %url,
            latitude = location.latitude,
            longitude = location.longitude,
            "Requesting forecast"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let forecast: ForecastResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            latitude = forecast.latitude,
            longitude = forecast.longitude,
            timezone = forecast.timezone.as_deref().unwrap_or("GMT"),
            hours = forecast.hourly.time.len(),
            days = forecast.daily.time.len(),
            "Forecast decoded"
        );
        Ok(forecast)
    }
}
