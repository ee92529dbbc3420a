//! Messages sent to renters and vehicle owners

use common::notify::{Notification, Notifier};
use tracing::warn;

use crate::models::{Fine, Rental};

/// Send a notification, logging instead of failing when delivery fails.
///
/// Returns whether the notification was delivered.
pub(crate) fn deliver(notifier: &dyn Notifier, notification: Notification) -> bool {
    match notifier.send(&notification) {
        Ok(()) => true,
        Err(e) => {
            warn!(subject = %notification.subject, "{}", e);
            false
        }
    }
}

pub(crate) fn rental_confirmation(rental: &Rental, minutes: u32) -> Notification {
    Notification::new(
        &rental.user,
        "Rental confirmation",
        format!(
            "Hello,\n\nYou rented space {}.\nPlate: {}\nStart: {}\nEnd: {}\n\
             Duration: {} minutes\nTotal cost: {:.2}\n\nThank you for using the parking system.",
            rental.space_id, rental.plate, rental.start, rental.end, minutes, rental.total_cost
        ),
    )
}

pub(crate) fn rental_extended(rental: &Rental, extra_minutes: u32) -> Notification {
    Notification::new(
        &rental.user,
        "Parking time extended",
        format!(
            "{} minutes were added to your rental of space {}.\nNew end time: {}\nNew total cost: {:.2}",
            extra_minutes, rental.space_id, rental.end, rental.total_cost
        ),
    )
}

pub(crate) fn fine_issued(recipient: &str, fine: &Fine) -> Notification {
    Notification::new(
        recipient,
        "Parking fine",
        format!(
            "A fine was registered for plate {} at space {}.\nDate: {}\nReason: {}\nAmount: {:.2}",
            fine.plate, fine.space_id, fine.timestamp, fine.detail, fine.amount
        ),
    )
}

pub(crate) fn profile_updated(recipient: &str, name: &str) -> Notification {
    Notification::new(
        recipient,
        "Profile updated",
        format!("Hello {name}, your account details were updated."),
    )
}

pub(crate) fn temporary_password(recipient: &str, name: &str, password: &str) -> Notification {
    Notification::new(
        recipient,
        "Temporary password",
        format!(
            "Hello {name},\n\nYour temporary password is: {password}\n\
             Sign in and change it right away."
        ),
    )
}

pub(crate) fn password_reminder(recipient: &str, name: &str) -> Notification {
    Notification::new(
        recipient,
        "Password recovery",
        format!(
            "Hello {name},\n\nYou asked to recover your password.\n\
             Passwords cannot be shown. Ask an administrator to reset it."
        ),
    )
}
