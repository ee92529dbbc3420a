//! Integration tests for administrator settings, space management and reports

mod support;

use chrono::{Duration, NaiveDate};
use common::store::StoreConfig;
use parking::models::{Fine, Settings, SpaceStatus, Stamp};
use parking::reports::{SpaceFilter, parse_report_date};
use parking::repositories::FineRepository;
use parking::repositories::settings::SETTINGS_DOCUMENT;
use parking::validation::RatePolicy;
use parking::{Parking, ParkingConfig, ParkingError};
use support::{Fixture, at};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

#[test]
fn test_settings_are_validated_before_saving() {
    let fixture = Fixture::new(&[("A1", true)], Settings::new(1.5, 30));
    let admin = fixture.parking.admin();

    let mut settings = admin.settings().unwrap();
    settings.hourly_rate = 2.25;
    settings.fine_amount = 10.0;
    settings.opening = "07:00".to_string();
    settings.closing = "19:30".to_string();
    admin.update_settings(settings.clone()).unwrap();
    assert_eq!(admin.settings().unwrap(), settings);

    let raw = fixture.raw(SETTINGS_DOCUMENT);
    assert_eq!(raw["tarifa"], 2.25);
    assert_eq!(raw["horario_fin"], "19:30");

    let mut invalid = settings.clone();
    invalid.closing = "25:00".to_string();
    assert!(matches!(
        admin.update_settings(invalid),
        Err(ParkingError::Validation(_))
    ));
    assert_eq!(admin.settings().unwrap(), settings);
}

#[test]
fn test_even_integer_rate_policy() {
    let fixture = Fixture::new(&[], Settings::new(2.0, 30));
    let parking = Parking::open(
        &ParkingConfig {
            store: StoreConfig::new(fixture.dir.path()),
            rate_policy: RatePolicy::EvenInteger,
        },
        fixture.notifier.clone(),
        fixture.clock.clone(),
    )
    .unwrap();
    let admin = parking.admin();

    assert!(matches!(
        admin.update_settings(Settings::new(1.5, 30)),
        Err(ParkingError::Validation(_))
    ));
    assert!(matches!(
        admin.update_settings(Settings::new(3.0, 30)),
        Err(ParkingError::Validation(_))
    ));
    admin.update_settings(Settings::new(800.0, 30)).unwrap();
    assert_eq!(admin.settings().unwrap().hourly_rate, 800.0);
}

#[test]
fn test_upsert_space_keeps_occupant() {
    let fixture = Fixture::new(&[("A1", true)], Settings::new(1.5, 30));
    let admin = fixture.parking.admin();
    let lifecycle = fixture.parking.lifecycle();

    let (id, space) = admin.upsert_space(" b2 ", true).unwrap();
    assert_eq!(id, "B2");
    assert!(space.is_available());
    assert!(matches!(
        admin.upsert_space("B-2", true),
        Err(ParkingError::Validation(_))
    ));

    lifecycle.rent("user@test.com", "A1", 30, "ABC123").unwrap();
    let (_, space) = admin.upsert_space("A1", false).unwrap();
    assert!(!space.enabled);
    assert!(space.occupant.is_some());
    assert_eq!(lifecycle.space_status("A1").unwrap(), SpaceStatus::Unavailable);

    let spaces = admin.list_spaces().unwrap();
    assert_eq!(spaces.keys().collect::<Vec<_>>(), vec!["A1", "B2"]);
    assert_eq!(lifecycle.list_available_spaces().unwrap(), vec!["B2".to_string()]);
}

#[test]
fn test_income_by_day() {
    let fixture = Fixture::new(&[("A1", true), ("B1", true)], Settings::new(60.0, 30));
    let lifecycle = fixture.parking.lifecycle();

    let first = lifecycle.rent("user@test.com", "A1", 30, "ABC123").unwrap();
    lifecycle.release(first).unwrap();
    fixture.clock.advance(Duration::minutes(5));
    lifecycle.rent("user@test.com", "B1", 45, "ABC123").unwrap();

    fixture.clock.advance(Duration::days(1));
    lifecycle.sweep().unwrap();
    lifecycle.rent("other@test.com", "A1", 60, "XYZ999").unwrap();

    let reports = fixture.parking.reports();
    let report = reports.income_by_day(day(1), day(2)).unwrap();
    assert_eq!(report.per_day[&day(1)], 75.0);
    assert_eq!(report.per_day[&day(2)], 60.0);
    assert_eq!(report.total, 135.0);

    let report = reports.income_by_day(day(2), day(30)).unwrap();
    assert_eq!(report.total, 60.0);
    assert!(matches!(
        reports.income_by_day(day(2), day(1)),
        Err(ParkingError::Validation(_))
    ));

    let history = reports.user_history("user@test.com").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].space_id, "B1");
}

#[test]
fn test_fines_between_reads_both_date_formats() {
    let fixture = Fixture::new(&[("A1", true)], Settings::new(1.5, 30));
    let repository = FineRepository::new(fixture.store.clone());
    for (stamp, plate) in [
        ("01/06/2025", "OLD111"),
        ("02/06/2025 09:15", "NEW222"),
        ("garbage", "BAD333"),
        ("05/06/2025 23:59", "LATE44"),
    ] {
        repository
            .append(&Fine {
                timestamp: Stamp::from(stamp),
                space_id: "A1".to_string(),
                plate: plate.to_string(),
                detail: "test".to_string(),
                amount: 5.0,
                contact: None,
            })
            .unwrap();
    }

    let reports = fixture.parking.reports();
    let plates: Vec<String> = reports
        .fines_between(parse_report_date("01/06/2025").unwrap(), day(2))
        .unwrap()
        .into_iter()
        .map(|f| f.plate)
        .collect();
    assert_eq!(plates, vec!["OLD111", "NEW222"]);

    assert_eq!(reports.fines_between(day(3), day(5)).unwrap().len(), 1);
}

#[test]
fn test_spaces_listing() {
    let fixture = Fixture::new(
        &[("A1", true), ("B1", true), ("C1", false)],
        Settings::new(1.5, 30),
    );
    fixture
        .parking
        .lifecycle()
        .rent("user@test.com", "B1", 30, "ABC123")
        .unwrap();

    let reports = fixture.parking.reports();
    let occupied = reports.spaces_listing(SpaceFilter::Occupied, at(10, 15)).unwrap();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].id, "B1");
    assert_eq!(occupied[0].plate.as_deref(), Some("ABC123"));

    let vacant = reports.spaces_listing(SpaceFilter::Vacant, at(10, 15)).unwrap();
    assert_eq!(vacant.len(), 2);

    // Past its end the space is listed as vacant even before a sweep
    let vacant = reports.spaces_listing(SpaceFilter::Vacant, at(11, 0)).unwrap();
    assert_eq!(vacant.len(), 3);
    assert_eq!(reports.spaces_listing(SpaceFilter::All, at(11, 0)).unwrap().len(), 3);
}

#[test]
fn test_health_check() {
    let fixture = Fixture::new(&[], Settings::new(1.5, 30));
    assert!(fixture.parking.health_check().unwrap());
}
