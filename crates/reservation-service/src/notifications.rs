//! Composition of outgoing messages

use crate::catalog::Catalog;
use reserve_common::{Account, Booking};
use serde::Serialize;
use std::fmt::Write;

const SIGNATURE: &str = "Best regards,\nReserve";

/// A fully formed message for the notification gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Minimal HTML rendering of the plain body
    pub fn html_body(&self) -> String {
        format!(
            "<html><body style='font-family:Arial,sans-serif;line-height:1.6;color:#333;max-width:600px;margin:0 auto;padding:20px'>{}</body></html>",
            self.body.replace('\n', "<br>")
        )
    }
}

/// Welcome message with the email verification code
pub fn welcome(account: &Account, verification_code: &str) -> Option<Notification> {
    let recipient = account.email.clone()?;
    let login = account.login().unwrap_or_default();

    Some(Notification {
        recipient,
        subject: "Welcome to Reserve!".to_string(),
        body: format!(
            "Hello, {}!\n\nYour verification code: {}\n\nYour login: {}\n\nThank you for registering with Reserve!",
            account.name, verification_code, login
        ),
    })
}

/// Confirmation for a newly created booking
pub fn booking_confirmed(account: &Account, booking: &Booking, catalog: &Catalog) -> Option<Notification> {
    let recipient = account.email.clone()?;
    let restaurant = catalog.get(booking.restaurant_id);

    let mut body = format!("Hello, {}!\n\nYour reservation is confirmed ✓\n\n", account.name);
    body.push_str(&booking_details(booking, catalog));

    if let Some(restaurant) = restaurant {
        let lines: Vec<String> = booking
            .menu_items
            .iter()
            .filter_map(|id| restaurant.menu_item(*id))
            .filter_map(|item| {
                let qty = booking.quantity_of(item.id);
                let amount = item.line_total(qty)?;
                Some(format!("  • {} x{} — {} ₸", item.name, qty, format_amount(amount)))
            })
            .collect();

        if !lines.is_empty() {
            body.push_str("\nPre-order:\n");
            body.push_str(&lines.join("\n"));
            body.push('\n');
        }
    }

    if booking.total_price > 0 {
        let _ = writeln!(body, "\n💰 Total: {} ₸", format_amount(booking.total_price));
    }

    let _ = write!(body, "\nWe look forward to seeing you!\n{}", SIGNATURE);

    Some(Notification {
        recipient,
        subject: "Reservation Confirmation".to_string(),
        body,
    })
}

/// Notice that a booking was cancelled
pub fn booking_cancelled(account: &Account, booking: &Booking, catalog: &Catalog) -> Option<Notification> {
    let recipient = account.email.clone()?;

    let mut body = format!(
        "Hello, {}!\n\nYour reservation has been cancelled ✗\n\nCancelled reservation details:\n",
        account.name
    );
    body.push_str(&booking_details(booking, catalog));
    let _ = write!(
        body,
        "\nThe reservation has been removed from your history.\n\n{}",
        SIGNATURE
    );

    Some(Notification {
        recipient,
        subject: "Reservation Cancelled".to_string(),
        body,
    })
}

fn booking_details(booking: &Booking, catalog: &Catalog) -> String {
    let (restaurant, branch) = catalog.locate(booking.restaurant_id, booking.branch_id);

    let mut details = String::new();
    let _ = writeln!(details, "Restaurant: {}", restaurant.map_or("N/A", |r| r.name.as_str()));
    let _ = writeln!(
        details,
        "Address: {} ({})",
        branch.map_or("N/A", |b| b.address.as_str()),
        branch.map_or("", |b| b.district.as_str())
    );
    let _ = writeln!(details, "Date: {}", booking.date);
    let _ = writeln!(details, "Time: {}", booking.time);
    let _ = writeln!(details, "Floor: {}", booking.floor);
    let _ = writeln!(details, "Tables: {}", format_tables(&booking.tables));
    let _ = writeln!(details, "Guests: {}", booking.guests);
    if booking.is_vip {
        details.push_str("⭐ VIP table\n");
    }
    details
}

/// Render table labels like `t-4` as `№4`
pub fn format_tables(tables: &[String]) -> String {
    tables
        .iter()
        .map(|label| format!("№{}", label.split('-').nth(1).unwrap_or(label.as_str())))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Group digits in thousands, `12500` -> `12,500`
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use reserve_common::BookingCreate;
    use std::collections::BTreeMap;

    fn account(email: Option<&str>) -> Account {
        Account::new(
            1,
            "Aru".to_string(),
            Some("+77011234567".to_string()),
            email.map(str::to_string),
        )
    }

    fn booking(restaurant_id: u64, menu_items: Vec<u64>, total_price: u64) -> Booking {
        Booking::new(
            10,
            BookingCreate {
                user_id: 1,
                restaurant_id,
                branch_id: 2,
                date: "2030-05-01".to_string(),
                time: "19:30".to_string(),
                guests: 3,
                comment: String::new(),
                floor: 2,
                tables: vec!["t-4".to_string(), "t-12".to_string()],
                is_vip: true,
                menu_items,
                menu_quantities: BTreeMap::from([("7".to_string(), 2)]),
            },
            total_price,
        )
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(900), "900");
        assert_eq!(format_amount(8900), "8,900");
        assert_eq!(format_amount(1234567), "1,234,567");

        let tables = vec!["t-4".to_string(), "vip-2".to_string(), "7".to_string()];
        assert_eq!(format_tables(&tables), "№4, №2, №7");
    }

    #[test]
    fn test_no_notification_without_email() {
        let catalog = Catalog::seeded();
        let phone_only = account(None);

        assert!(welcome(&phone_only, "123456").is_none());
        assert!(booking_confirmed(&phone_only, &booking(2, vec![], 0), &catalog).is_none());
        assert!(booking_cancelled(&phone_only, &booking(2, vec![], 0), &catalog).is_none());
    }

    #[test]
    fn test_welcome() {
        let notification = welcome(&account(Some("aru@example.com")), "042137").unwrap();

        assert_eq!(notification.recipient, "aru@example.com");
        assert!(notification.body.contains("042137"));
        assert!(notification.body.contains("Your login: aru@example.com"));
    }

    #[test]
    fn test_confirmation_contents() {
        let catalog = Catalog::seeded();
        let notification = booking_confirmed(
            &account(Some("aru@example.com")),
            &booking(2, vec![7, 500], 17800),
            &catalog,
        )
        .unwrap();

        let body = &notification.body;
        assert_eq!(notification.subject, "Reservation Confirmation");
        assert!(body.contains("Restaurant: Coffee Bum"));
        assert!(body.contains("Address: Ақмешіт, 38 (Keruen)"));
        assert!(body.contains("Floor: 2"));
        assert!(body.contains("Tables: №4, №12"));
        assert!(body.contains("Guests: 3"));
        assert!(body.contains("VIP table"));
        assert!(body.contains("Стейк Рибай x2 — 17,800 ₸"));
        assert!(body.contains("Total: 17,800 ₸"));
    }

    #[test]
    fn test_cancellation_omits_preorder() {
        let catalog = Catalog::seeded();
        let notification = booking_cancelled(
            &account(Some("aru@example.com")),
            &booking(2, vec![7], 17800),
            &catalog,
        )
        .unwrap();

        assert_eq!(notification.subject, "Reservation Cancelled");
        assert!(notification.body.contains("Tables: №4, №12"));
        assert!(!notification.body.contains("Pre-order"));
        assert!(!notification.body.contains("Total"));
    }

    #[test]
    fn test_dangling_restaurant_renders_placeholders() {
        let catalog = Catalog::seeded();
        let notification = booking_confirmed(
            &account(Some("aru@example.com")),
            &booking(42, vec![7], 0),
            &catalog,
        )
        .unwrap();

        assert!(notification.body.contains("Restaurant: N/A"));
        assert!(notification.body.contains("Address: N/A ()"));
        assert!(!notification.body.contains("Total"));
    }

    #[test]
    fn test_html_body() {
        let notification = Notification {
            recipient: "a@b.kz".to_string(),
            subject: "s".to_string(),
            body: "line one\nline two".to_string(),
        };
        assert!(notification.html_body().contains("line one<br>line two"));
    }
}
