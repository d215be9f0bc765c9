//! Text and button layout for every screen of the dialogue.

use chrono::{Duration, NaiveDate, NaiveTime};
use nailbook_core::{
    models::{booking::{Booking, BookingStatus}, service::Service},
    session::{Action, ServiceChoice},
    slots::SlotOption,
    time::format_time,
};

use super::Screen;
use crate::keyboard::{Button, Keyboard, Tone, MAX_ROWS};

const DATES_PER_ROW: usize = 3;
const TIMES_PER_ROW: usize = 4;

/// Option rows on a paged screen; the last row is navigation.
const ITEM_ROWS: usize = MAX_ROWS - 1;

pub const SERVICES_PER_PAGE: usize = ITEM_ROWS;
pub const DATES_PER_PAGE: usize = DATES_PER_ROW * ITEM_ROWS;
pub const TIMES_PER_PAGE: usize = TIMES_PER_ROW * ITEM_ROWS;
pub const BOOKINGS_PER_PAGE: usize = ITEM_ROWS;

/// One page of a longer option list. Out of range page numbers land on the
/// last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub count: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn of(items: &'a [T], number: usize, size: usize) -> Self {
        let size = size.max(1);
        let count = items.len().div_ceil(size).max(1);
        let number = number.min(count - 1);
        let start = number * size;
        let end = (start + size).min(items.len());
        Self {
            items: &items[start..end],
            number,
            count,
        }
    }

    fn heading(&self) -> String {
        if self.count > 1 {
            format!(" (page {}/{})", self.number + 1, self.count)
        } else {
            String::new()
        }
    }

    /// Previous/next buttons around `back`.
    fn navigation(&self, to_page: impl Fn(usize) -> Action, back: Button) -> Vec<Button> {
        let mut row = Vec::new();
        if self.number > 0 {
            row.push(Button::new("◀️ Prev", to_page(self.number - 1)));
        }
        row.push(back);
        if self.number + 1 < self.count {
            row.push(Button::new("Next ▶️", to_page(self.number + 1)));
        }
        row
    }
}

pub fn service_line(name: &str, price: &str, duration_minutes: i64) -> String {
    format!("{name} · from {price} · {duration_minutes} min")
}

pub fn main_menu(text: impl Into<String>, is_admin: bool) -> Screen {
    let mut keyboard = Keyboard::new()
        .button(Button::new("💅 Book an appointment", Action::Book).tone(Tone::Primary))
        .button(Button::new("📅 My bookings", Action::MyBookings));
    if is_admin {
        keyboard = keyboard.button(Button::new("🛠 Admin panel", Action::AdminPanel));
    }
    Screen::new(text, keyboard)
}

pub fn admin_panel() -> Screen {
    Screen::new(
        "Salon admin panel 🛠",
        Keyboard::column([
            Button::new("➕ Add service", Action::AddService),
            Button::new("📋 All bookings", Action::ViewAllBookings),
            Button::new("⏰ Working hours", Action::SetHours),
            Button::new("⬅️ Back", Action::ToMain),
        ]),
    )
}

/// A text prompt with a single way back.
pub fn prompt(text: impl Into<String>, back: Action) -> Screen {
    Screen::new(text, Keyboard::new().button(Button::new("⬅️ Back", back)))
}

pub fn service_list(services: &[Service], page: usize) -> Screen {
    let page = Page::of(services, page, SERVICES_PER_PAGE);
    let keyboard = Keyboard::column(page.items.iter().map(|service| {
        Button::new(
            service_line(&service.name, &service.price, service.duration_minutes),
            Action::PickService(service.id),
        )
    }))
    .row(page.navigation(Action::ServicesPage, Button::new("⬅️ Back", Action::ToMain)));

    Screen::new(format!("Choose a service{}:", page.heading()), keyboard)
}

/// Dates from tomorrow through `days_ahead` days after today.
pub fn offered_dates(today: NaiveDate, days_ahead: i64) -> Vec<NaiveDate> {
    (1..=days_ahead).map(|offset| today + Duration::days(offset)).collect()
}

pub fn date_picker(
    service: &ServiceChoice,
    today: NaiveDate,
    days_ahead: i64,
    page: usize,
) -> Screen {
    let dates = offered_dates(today, days_ahead);
    let page = Page::of(&dates, page, DATES_PER_PAGE);
    let buttons = page.items.iter().map(|date| {
        Button::new(date.format("%d.%m").to_string(), Action::PickDate(*date))
    });
    let keyboard = Keyboard::grid(buttons, DATES_PER_ROW)
        .row(page.navigation(Action::DatesPage, Button::new("⬅️ Back", Action::Book)));

    Screen::new(
        format!(
            "Service: {}\nChoose a date{}:",
            service_line(&service.name, &service.price, service.duration_minutes),
            page.heading()
        ),
        keyboard,
    )
}

pub fn time_picker(
    heading: Option<&str>,
    service: &ServiceChoice,
    date: NaiveDate,
    slots: &[SlotOption],
    page: usize,
) -> Screen {
    let page = Page::of(slots, page, TIMES_PER_PAGE);

    let mut text = String::new();
    if let Some(heading) = heading {
        text.push_str(heading);
        text.push('\n');
    }
    text.push_str(&format!("Date: {date}\n"));
    if slots.is_empty() {
        text.push_str("No free slots on this day. Please pick another date.");
    } else {
        text.push_str(&format!("Free times{}:", page.heading()));
    }

    let times = page.items.iter().filter_map(|slot| {
        slot.token
            .parse::<Action>()
            .ok()
            .map(|action| Button::new(slot.label.clone(), action))
    });
    let keyboard = Keyboard::grid(times, TIMES_PER_ROW).row(page.navigation(
        |number| Action::TimesPage(date, number),
        Button::new("⬅️ Back", Action::PickService(service.id)),
    ));

    Screen::new(text, keyboard)
}

pub fn confirmation(service: &ServiceChoice, date: NaiveDate, time: NaiveTime) -> Screen {
    Screen::new(
        format!(
            "Please confirm your booking:\n💅 {}\n📅 {}\n⏰ {}",
            service_line(&service.name, &service.price, service.duration_minutes),
            date,
            format_time(time)
        ),
        Keyboard::column([
            Button::new("✅ Confirm", Action::Confirm).tone(Tone::Success),
            Button::new("❌ Cancel", Action::ToMain).tone(Tone::Danger),
        ]),
    )
}

pub fn user_bookings(bookings: &[Booking], page: usize) -> Screen {
    let page = Page::of(bookings, page, BOOKINGS_PER_PAGE);

    let mut text = format!("📅 Your bookings{}:\n\n", page.heading());
    for booking in page.items {
        text.push_str(&format!(
            "📍 {} {} · {} ({} min) | status: {}\n",
            booking.date,
            format_time(booking.start_time),
            booking.service_name,
            booking.duration_minutes,
            booking.status
        ));
    }

    let cancel_buttons = page.items.iter().map(|booking| {
        Button::new(
            format!("❌ Cancel {} {}", booking.date.format("%d.%m"), format_time(booking.start_time)),
            Action::DeleteBooking(booking.id),
        )
        .tone(Tone::Danger)
    });
    let keyboard = Keyboard::column(cancel_buttons)
        .row(page.navigation(Action::MyBookingsPage, Button::new("⬅️ Menu", Action::ToMain)));

    Screen::new(text, keyboard)
}

pub fn all_bookings(bookings: &[Booking], page: usize) -> Screen {
    let page = Page::of(bookings, page, BOOKINGS_PER_PAGE);
    let mut text = format!("📋 All client bookings{}:\n\n", page.heading());
    let mut keyboard = Keyboard::new();

    for booking in page.items {
        text.push_str(&format!(
            "@{} | 📅 {} {} | 💅 {} | ⏱ {} min | status: {}\n",
            booking.username,
            booking.date,
            format_time(booking.start_time),
            booking.service_name,
            booking.duration_minutes,
            booking.status
        ));

        if booking.status == BookingStatus::Active {
            let label = format!("@{} {} {}", booking.username, booking.date.format("%d.%m"), format_time(booking.start_time));
            keyboard = keyboard.row([
                Button::new(format!("✅ {label}"), Action::MarkDone(booking.id)).tone(Tone::Success),
                Button::new(format!("❌ {label}"), Action::MarkCanceled(booking.id)).tone(Tone::Danger),
            ]);
        }
    }

    let navigation =
        page.navigation(Action::AllBookingsPage, Button::new("⬅️ Back", Action::AdminPanel));
    Screen::new(text, keyboard.row(navigation))
}
