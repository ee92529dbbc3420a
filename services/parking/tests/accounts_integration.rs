//! Integration tests for user accounts

mod support;

use parking::ParkingError;
use parking::models::{LoginCredentials, NewUser, PaymentCard, Role, Settings, UpdateUser, Vehicle};
use parking::repositories::user::USERS_DOCUMENT;
use support::Fixture;

fn new_user(identification: &str, email: &str) -> NewUser {
    NewUser {
        identification: identification.to_string(),
        name: "Ana".to_string(),
        surname: "Solis".to_string(),
        email: email.to_string(),
        password: "Secreta123".to_string(),
        phone: Some("88887777".to_string()),
        card: Some(PaymentCard {
            number: format!("4111{identification}"),
            expiry: "12/27".to_string(),
        }),
    }
}

fn credentials(identification: &str, password: &str) -> LoginCredentials {
    LoginCredentials {
        identification: identification.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_register_and_authenticate() {
    let fixture = Fixture::new(&[], Settings::new(1.5, 30));
    let accounts = fixture.parking.accounts();

    let user = accounts.register(new_user("101110111", "ana@test.com")).unwrap();
    assert_eq!(user.role, Role::User);
    assert_eq!(user.registered_at.as_str(), "01/06/2025 10:00");
    assert_ne!(user.password_hash, "Secreta123");

    let signed_in = accounts
        .authenticate(&credentials("101110111", "Secreta123"))
        .unwrap();
    assert_eq!(signed_in.email, "ana@test.com");

    assert!(matches!(
        accounts.authenticate(&credentials("101110111", "Wrong1234")),
        Err(ParkingError::InvalidCredentials)
    ));
    assert!(matches!(
        accounts.authenticate(&credentials("999", "Secreta123")),
        Err(ParkingError::NotFound(_))
    ));

    // The plain password never reaches the document
    let raw = fixture.raw(USERS_DOCUMENT);
    assert!(!raw.to_string().contains("Secreta123"));
    assert_eq!(raw[0]["identificacion"], "101110111");
    assert_eq!(raw[0]["rol"], "usuario");
}

#[test]
fn test_register_rejections() {
    let fixture = Fixture::new(&[], Settings::new(1.5, 30));
    let accounts = fixture.parking.accounts();
    accounts.register(new_user("101110111", "ana@test.com")).unwrap();

    let duplicate_id = accounts.register(new_user("101110111", "other@test.com"));
    assert!(matches!(duplicate_id, Err(ParkingError::Validation(_))));

    let mut same_card = new_user("202220222", "other@test.com");
    same_card.card = Some(PaymentCard {
        number: "4111101110111".to_string(),
        expiry: "01/28".to_string(),
    });
    assert!(matches!(
        accounts.register(same_card),
        Err(ParkingError::Validation(_))
    ));

    let mut bad_email = new_user("303330333", "not-an-email");
    assert!(matches!(
        accounts.register(bad_email.clone()),
        Err(ParkingError::Validation(_))
    ));

    bad_email.email = "ok@test.com".to_string();
    bad_email.password = "weakpass".to_string();
    assert!(matches!(
        accounts.register(bad_email.clone()),
        Err(ParkingError::Validation(_))
    ));

    bad_email.password = "Secreta123".to_string();
    bad_email.phone = Some("123".to_string());
    assert!(matches!(
        accounts.register(bad_email),
        Err(ParkingError::Validation(_))
    ));

    assert_eq!(fixture.raw(USERS_DOCUMENT).as_array().unwrap().len(), 1);
}

#[test]
fn test_update_profile_keeps_credentials() {
    let fixture = Fixture::new(&[], Settings::new(1.5, 30));
    let accounts = fixture.parking.accounts();
    let original = accounts.register(new_user("101110111", "ana@test.com")).unwrap();

    let updated = accounts
        .update_profile(
            "101110111",
            UpdateUser {
                name: Some("Ana Maria".to_string()),
                email: Some("anamaria@test.com".to_string()),
                ..UpdateUser::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Ana Maria");
    assert_eq!(updated.surname, "Solis");
    assert_eq!(updated.password_hash, original.password_hash);
    assert_eq!(updated.registered_at, original.registered_at);

    let sent = fixture.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "anamaria@test.com");

    assert!(matches!(
        accounts.update_profile(
            "101110111",
            UpdateUser {
                email: Some("broken".to_string()),
                ..UpdateUser::default()
            }
        ),
        Err(ParkingError::Validation(_))
    ));
    assert_eq!(accounts.find("101110111").unwrap().email, "anamaria@test.com");
}

#[test]
fn test_vehicles() {
    let fixture = Fixture::new(&[], Settings::new(1.5, 30));
    let accounts = fixture.parking.accounts();
    accounts.register(new_user("101110111", "ana@test.com")).unwrap();

    let vehicle = Vehicle {
        plate: " abc123 ".to_string(),
        make: "Nissan".to_string(),
        model: "Sentra".to_string(),
        color: "Blue".to_string(),
    };
    let user = accounts.add_vehicle("101110111", vehicle.clone()).unwrap();
    assert_eq!(user.vehicles[0].plate, "ABC123");

    assert!(matches!(
        accounts.add_vehicle("101110111", vehicle),
        Err(ParkingError::Validation(_))
    ));
    assert_eq!(
        fixture.parking.fines().owner_contact("Abc123").unwrap().as_deref(),
        Some("ana@test.com")
    );

    let user = accounts.remove_vehicle("101110111", "abc123").unwrap();
    assert!(user.vehicles.is_empty());
    assert!(matches!(
        accounts.remove_vehicle("101110111", "abc123"),
        Err(ParkingError::NotFound(_))
    ));
}

#[test]
fn test_password_recovery() {
    let fixture = Fixture::new(&[], Settings::new(1.5, 30));
    let accounts = fixture.parking.accounts();
    accounts.register(new_user("101110111", "ana@test.com")).unwrap();

    assert!(accounts.set_temporary_password("ANA@test.com", "Temp4567").unwrap());
    let user = accounts.find("101110111").unwrap();
    assert!(user.temporary_password);
    assert!(accounts
        .authenticate(&credentials("101110111", "Temp4567"))
        .is_ok());

    let sent = fixture.notifier.sent();
    assert!(sent[0].body.contains("Temp4567"));

    assert!(matches!(
        accounts.change_password("101110111", "Secreta123", "Nueva1234"),
        Err(ParkingError::InvalidCredentials)
    ));
    assert!(matches!(
        accounts.change_password("101110111", "Temp4567", "short"),
        Err(ParkingError::Validation(_))
    ));
    accounts
        .change_password("101110111", "Temp4567", "Nueva1234")
        .unwrap();
    assert!(!accounts.find("101110111").unwrap().temporary_password);

    assert!(accounts.password_reminder("ana@test.com").unwrap());
    assert!(matches!(
        accounts.password_reminder("nobody@test.com"),
        Err(ParkingError::NotFound(_))
    ));
}

#[test]
fn test_delete_account() {
    let fixture = Fixture::new(&[], Settings::new(1.5, 30));
    let accounts = fixture.parking.accounts();
    accounts.register(new_user("101110111", "ana@test.com")).unwrap();
    accounts.register(new_user("202220222", "ben@test.com")).unwrap();

    accounts.delete("101110111").unwrap();
    assert!(matches!(
        accounts.find("101110111"),
        Err(ParkingError::NotFound(_))
    ));
    assert!(accounts.find("202220222").is_ok());
    assert!(matches!(
        accounts.delete("101110111"),
        Err(ParkingError::NotFound(_))
    ));
}
