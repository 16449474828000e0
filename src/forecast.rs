//! Turns a decoded forecast into the strings shown on screen: the current
//! conditions, the hourly slice starting at the current hour, and the coming
//! days.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::config::{DisplayConfig, LocationConfig};
use crate::error::{Result, WeatherError};
use crate::openmeteo::{ForecastResponse, Hourly};
use crate::units::{direction::degree_to_compass, temperature};
use crate::weather::{classify, Classification};

pub const MISSING: &str = "--";

const HOUR_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Humidity assumed for the current comfort value when no hourly sample matches.
const NEUTRAL_HUMIDITY: f64 = 50.0;

/// One hourly record. Open-Meteo may send nulls, hence the options.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub time: NaiveDateTime,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub humidity: Option<f64>,
    pub weathercode: Option<i32>,
}

impl ForecastSample {
    pub fn comfort(&self) -> Option<f64> {
        match (self.temperature, self.wind_speed, self.humidity) {
            (Some(t), Some(v), Some(h)) => Some(temperature::comfort_index(t, v, h)),
            _ => None,
        }
    }

    fn classification(&self) -> Classification {
        self.weathercode.map(classify).unwrap_or(Classification::UNKNOWN)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub temperature: String,
    pub description: String,
    pub wind: String,
    pub comfort: String,
    pub humidity: String,
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourCard {
    pub time: String,
    pub temperature: String,
    pub symbol: &'static str,
    pub comfort: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub name: String,
    pub description: &'static str,
    pub range: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub current: CurrentView,
    pub hours: Vec<HourCard>,
    pub days: Vec<DayCard>,
}

pub fn parse_hour(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, HOUR_FORMAT)
        .map_err(|e| WeatherError::Parse(format!("invalid timestamp {value:?}: {e}")))
}

fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map_err(|e| WeatherError::Parse(format!("invalid date {value:?}: {e}")))
}

/// Zips the hourly series. Series shorter than `time` read as missing values.
pub fn hourly_samples(hourly: &Hourly) -> Result<Vec<ForecastSample>> {
    hourly
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| -> Result<ForecastSample> {
            Ok(ForecastSample {
                time: parse_hour(time)?,
                temperature: hourly.temperature.get(i).copied().flatten(),
                wind_speed: hourly.wind_speed.get(i).copied().flatten(),
                humidity: hourly.relative_humidity.get(i).copied().flatten(),
                weathercode: hourly.weathercode.get(i).copied().flatten(),
            })
        })
        .collect()
}

/// Index of the first sample at or after the start of the hour containing
/// `now`, or 0 when every sample is older.
pub fn start_index(samples: &[ForecastSample], now: NaiveDateTime) -> usize {
    let hour = truncate_to_hour(now);
    samples
        .iter()
        .position(|s| s.time >= hour)
        .unwrap_or(0)
}

fn truncate_to_hour(time: NaiveDateTime) -> NaiveDateTime {
    time.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

pub fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lun",
        Weekday::Tue => "mar",
        Weekday::Wed => "mié",
        Weekday::Thu => "jue",
        Weekday::Fri => "vie",
        Weekday::Sat => "sáb",
        Weekday::Sun => "dom",
    }
}

fn degrees(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}°", temperature::round_display(v)),
        None => MISSING.to_string(),
    }
}

impl ForecastView {
    pub fn build(forecast: &ForecastResponse, display: &DisplayConfig) -> Result<Self> {
        let samples = hourly_samples(&forecast.hourly)?;
        let now = parse_hour(&forecast.current_weather.time)?;
        let start = start_index(&samples, now);
        tracing::debug!(start, total = samples.len(), "Selected hourly slice");

        let current = Self::current(forecast, samples.get(start), now);
        let hours = samples
            .iter()
            .skip(start)
            .take(display.hours_to_show)
            .map(|s| HourCard {
                time: s.time.format("%H:%M").to_string(),
                temperature: degrees(s.temperature),
                symbol: s.classification().symbol,
                comfort: s.comfort().map(|c| degrees(Some(c))),
            })
            .collect();
        let days = Self::days(forecast, display.days_to_show)?;

        Ok(Self {
            current,
            hours,
            days,
        })
    }

    fn current(
        forecast: &ForecastResponse,
        sample: Option<&ForecastSample>,
        now: NaiveDateTime,
    ) -> CurrentView {
        let cw = &forecast.current_weather;

        let humidity = sample
            .filter(|s| s.time == truncate_to_hour(now))
            .and_then(|s| s.humidity);
        let comfort = temperature::comfort_index(
            cw.temperature,
            cw.windspeed,
            humidity.unwrap_or(NEUTRAL_HUMIDITY),
        );

        let wind_speed = temperature::round_display(cw.windspeed);
        let wind = match cw.winddirection {
            Some(deg) => format!("{wind_speed} km/h {}", degree_to_compass(deg)),
            None => format!("{wind_speed} km/h"),
        };

        CurrentView {
            temperature: format!("{}°C", temperature::round_display(cw.temperature)),
            description: classify(cw.weathercode).label.to_string(),
            wind,
            comfort: format!("{}°C", temperature::round_display(comfort)),
            humidity: match humidity {
                Some(h) => format!("{}%", temperature::round_display(h)),
                None => MISSING.to_string(),
            },
            updated: now.format("%H:%M").to_string(),
        }
    }

    fn days(forecast: &ForecastResponse, days_to_show: usize) -> Result<Vec<DayCard>> {
        let daily = &forecast.daily;
        daily
            .time
            .iter()
            .take(days_to_show)
            .enumerate()
            .map(|(i, day)| -> Result<DayCard> {
                let date = parse_day(day)?;
                let name = if i == 0 {
                    "Hoy".to_string()
                } else {
                    weekday_short(date.weekday()).to_string()
                };
                let description = daily
                    .weathercode
                    .get(i)
                    .copied()
                    .flatten()
                    .map(classify)
                    .unwrap_or(Classification::UNKNOWN)
                    .label;
                let min = daily.temperature_min.get(i).copied().flatten();
                let max = daily.temperature_max.get(i).copied().flatten();

                Ok(DayCard {
                    name,
                    description,
                    range: format!("{} / {}", degrees(min), degrees(max)),
                })
            })
            .collect()
    }

    /// Text version of the three views, used by `--plain`.
    pub fn report(&self, location: &LocationConfig) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} ({:.3}, {:.3})\nActualizado: {}\n\n",
            location.name, location.latitude, location.longitude, self.current.updated
        ));

        out.push_str("Ahora\n");
        out.push_str(&format!(
            "  {}  {}\n  Sensación: {}\n  Viento: {}\n  Humedad: {}\n\n",
            self.current.temperature,
            self.current.description,
            self.current.comfort,
            self.current.wind,
            self.current.humidity
        ));

        out.push_str("Próximas horas\n");
        for hour in &self.hours {
            out.push_str(&format!(
                "  {}  {:>5}  {}\n",
                hour.time, hour.temperature, hour.symbol
            ));
        }

        out.push_str("\nPróximos días\n");
        for day in &self.days {
            out.push_str(&format!(
                "  {:<4} {:<28} {}\n",
                day.name, day.description, day.range
            ));
        }
        out
    }
}
