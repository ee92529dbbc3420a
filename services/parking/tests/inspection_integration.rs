//! Integration tests for inspector checks and the fines they issue

mod support;

use parking::ParkingError;
use parking::inspection::Verdict;
use parking::models::{NewUser, Settings, SpaceStatus, Stamp, Vehicle};
use parking::repositories::RentalRepository;
use support::{Fixture, at};

fn fixture() -> Fixture {
    let mut settings = Settings::new(1.5, 30);
    settings.fine_amount = 15.0;
    Fixture::new(&[("P1", true), ("P2", true)], settings)
}

fn register_owner(fixture: &Fixture, plate: &str) {
    let accounts = fixture.parking.accounts();
    accounts
        .register(NewUser {
            identification: "203330333".to_string(),
            name: "Olga".to_string(),
            surname: "Mora".to_string(),
            email: "owner@test.com".to_string(),
            password: "Secreta123".to_string(),
            phone: None,
            card: None,
        })
        .unwrap();
    accounts
        .add_vehicle(
            "203330333",
            Vehicle {
                plate: plate.to_string(),
                make: "Toyota".to_string(),
                model: "Yaris".to_string(),
                color: "Red".to_string(),
            },
        )
        .unwrap();
}

#[test]
fn test_plate_mismatch_issues_one_fine() {
    let fixture = fixture();
    register_owner(&fixture, "xyz999");
    fixture
        .parking
        .lifecycle()
        .rent("user@test.com", "P1", 60, "ABC123")
        .unwrap();

    let outcome = fixture.parking.inspector().inspect("P1", "XYZ999").unwrap();
    assert_eq!(
        outcome.verdict,
        Verdict::PlateMismatch {
            registered: "ABC123".to_string(),
            observed: "XYZ999".to_string(),
        }
    );

    let issued = outcome.fine.unwrap();
    assert!(issued.notified);
    assert_eq!(issued.fine.space_id, "P1");
    assert_eq!(issued.fine.plate, "XYZ999");
    assert_eq!(issued.fine.amount, 15.0);
    assert_eq!(issued.fine.contact.as_deref(), Some("owner@test.com"));

    let fines = fixture.parking.fines().all().unwrap();
    assert_eq!(fines.len(), 1);
    assert_eq!(fines[0], issued.fine);

    let last = fixture.notifier.sent().pop().unwrap();
    assert_eq!(last.recipient, "owner@test.com");
    assert_eq!(last.subject, "Parking fine");

    // The rental and space are untouched
    assert_eq!(
        fixture.parking.lifecycle().space_status("P1").unwrap(),
        SpaceStatus::Occupied
    );
}

#[test]
fn test_matching_plate_is_compliant() {
    let fixture = fixture();
    fixture
        .parking
        .lifecycle()
        .rent("user@test.com", "P1", 60, "ABC123")
        .unwrap();

    let outcome = fixture.parking.inspector().inspect("p1", "abc123").unwrap();
    assert_eq!(outcome.verdict, Verdict::Compliant);
    assert!(outcome.fine.is_none());
    assert!(fixture.parking.fines().all().unwrap().is_empty());
}

#[test]
fn test_classify_verdicts() {
    let fixture = fixture();
    let inspector = fixture.parking.inspector();

    assert_eq!(
        inspector.classify("P2", "ABC123", at(10, 0)).unwrap(),
        Verdict::NoActiveRental
    );
    assert!(matches!(
        inspector.classify("Q7", "ABC123", at(10, 0)),
        Err(ParkingError::NotFound(_))
    ));

    fixture
        .parking
        .lifecycle()
        .rent("user@test.com", "P1", 30, "ABC123")
        .unwrap();

    assert_eq!(
        inspector.classify("P1", "ABC123", at(10, 30)).unwrap(),
        Verdict::Compliant
    );
    assert_eq!(
        inspector.classify("P1", "ABC123", at(10, 31)).unwrap(),
        Verdict::Expired {
            end: Stamp::from("01/06/2025 10:30"),
            observed_at: Stamp::from("01/06/2025 10:31"),
        }
    );

    let repository = RentalRepository::new(fixture.store.clone());
    let mut rentals = repository.load().unwrap();
    rentals[0].end = Stamp::from("31/02/2025 10:30");
    repository.save(&rentals).unwrap();

    assert_eq!(
        inspector.classify("P1", "ABC123", at(10, 5)).unwrap(),
        Verdict::MalformedRentalRecord {
            end: Stamp::from("31/02/2025 10:30"),
        }
    );
}

#[test]
fn test_unregistered_plate_is_fined_without_contact() {
    let fixture = fixture();

    let outcome = fixture.parking.inspector().inspect("P2", "NOP000").unwrap();
    assert_eq!(outcome.verdict, Verdict::NoActiveRental);

    let issued = outcome.fine.unwrap();
    assert!(!issued.notified);
    assert_eq!(issued.fine.contact, None);
    assert_eq!(issued.fine.timestamp, Stamp::from("01/06/2025 10:00"));
    assert!(fixture.notifier.sent().is_empty());
}
