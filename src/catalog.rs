//! catalog.rs
//!
//! Каталог площадок: встроенный демо-набор или JSON-файл из `CATALOG_PATH`.

use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use crate::error::CatalogError;
use crate::models::{SeatLayout, Venue, VenueType};

fn slots(times: &[&str]) -> Vec<String> {
    times.iter().map(|t| t.to_string()).collect()
}

/// Встроенный каталог: один кинозал и один ресторан.
pub fn sample_venues() -> Vec<Venue> {
    vec![
        Venue {
            id: "cinema1".to_string(),
            name: "Starlight Cinema".to_string(),
            venue_type: VenueType::Cinema,
            seat_layout: SeatLayout::new(6, 8, ["A3", "B5", "C2"]),
            available_time_slots: slots(&["10:00", "13:00", "16:00", "19:00", "22:00"]),
            max_seats_per_booking: 8,
            base_price: Decimal::new(1299, 2),
            image_name: "popcorn".to_string(),
        },
        Venue {
            id: "rest1".to_string(),
            name: "Gourmet Restaurant".to_string(),
            venue_type: VenueType::Restaurant,
            seat_layout: SeatLayout::new(4, 6, ["A1", "B3"]),
            available_time_slots: slots(&["11:00", "12:30", "14:00", "15:30", "17:00", "19:00", "20:30"]),
            max_seats_per_booking: 6,
            base_price: Decimal::new(2500, 2),
            image_name: "fork.knife".to_string(),
        },
    ]
}

/// Читает каталог из JSON-массива площадок.
/// Инварианты площадок проверяет уже `BookingStore::new`.
pub fn load_from_file(path: &Path) -> Result<Vec<Venue>, CatalogError> {
    let raw = std::fs::read_to_string(path)?;
    let venues: Vec<Venue> = serde_json::from_str(&raw)?;
    info!("Loaded {} venues from {}", venues.len(), path.display());
    Ok(venues)
}

/// Каталог по настройкам: файл, если задан, иначе встроенный набор.
pub fn load(path: Option<&Path>) -> Result<Vec<Venue>, CatalogError> {
    match path {
        Some(p) => load_from_file(p),
        None => {
            info!("CATALOG_PATH not set, using sample catalog");
            Ok(sample_venues())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.json", name, uuid::Uuid::new_v4()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_sample_venues_are_valid() {
        let venues = sample_venues();
        assert_eq!(venues.len(), 2);
        for v in &venues {
            v.validate().unwrap();
        }
    }

    #[test]
    fn test_load_without_path_returns_sample() {
        assert_eq!(load(None).unwrap(), sample_venues());
    }

    #[test]
    fn test_load_from_file_roundtrips_sample() {
        let json = serde_json::to_string(&sample_venues()).unwrap();
        let path = temp_file("catalog", &json);
        let loaded = load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, sample_venues());
    }

    #[test]
    fn test_load_from_file_reports_parse_and_io_errors() {
        let path = temp_file("broken", "{ not json");
        assert!(matches!(load_from_file(&path), Err(CatalogError::Parse(_))));
        std::fs::remove_file(&path).ok();

        let missing = std::env::temp_dir().join("venue-catalog-does-not-exist.json");
        assert!(matches!(load_from_file(&missing), Err(CatalogError::Io(_))));
    }
}
