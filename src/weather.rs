//! Mock weather readings. No provider is wired up; values are derived from the
//! location name so the same location always reads the same.

use serde::Serialize;

const CONDITIONS: [&str; 5] = ["Sunny", "Partly Cloudy", "Cloudy", "Light Rain", "Thunderstorms"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature_c: f64,
    pub humidity_percent: u8,
    pub condition: &'static str,
    pub wind_speed_kph: f64,
    /// PAGASA tropical cyclone wind signal, 0 when none is raised.
    pub signal_level: u8,
    pub mocked: bool,
}

fn seed(location: &str) -> u32 {
    location
        .trim()
        .to_lowercase()
        .bytes()
        .fold(2166136261u32, |hash, b| (hash ^ u32::from(b)).wrapping_mul(16777619))
}

pub fn mock_report(location: &str) -> WeatherReport {
    let seed = seed(location);
    let condition = CONDITIONS[(seed % CONDITIONS.len() as u32) as usize];
    let wind_speed_kph = f64::from(5 + (seed >> 8) % 60);
    let signal_level = match wind_speed_kph as u32 {
        0..=38 => 0,
        39..=61 => 1,
        _ => 2,
    };

    WeatherReport {
        location: location.trim().to_string(),
        temperature_c: 26.0 + f64::from((seed >> 4) % 80) / 10.0,
        humidity_percent: 60 + ((seed >> 12) % 36) as u8,
        condition,
        wind_speed_kph,
        signal_level,
        mocked: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_location_same_report() {
        let a = mock_report("Marikina");
        let b = mock_report("  marikina ");
        assert_eq!(a.location, "Marikina");
        assert_eq!(b.location, "marikina");
        assert_eq!(
            (a.temperature_c, a.humidity_percent, a.condition, a.signal_level),
            (b.temperature_c, b.humidity_percent, b.condition, b.signal_level)
        );
    }

    #[test]
    fn values_stay_in_plausible_ranges() {
        for city in ["Manila", "Quezon City", "Pasig", "Taguig", "Caloocan", "Navotas"] {
            let report = mock_report(city);
            assert!((26.0..34.0).contains(&report.temperature_c));
            assert!((60..96).contains(&report.humidity_percent));
            assert!(report.signal_level <= 2);
            assert!(report.mocked);
        }
    }
}
