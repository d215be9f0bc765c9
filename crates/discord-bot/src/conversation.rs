//! The booking dialogue, independent of Discord.
//!
//! [`Conversation::handle`] takes one user input together with that user's
//! [`Session`], consults the store and returns what to show. Every state
//! change goes through [`Session::advance`], so the transition table in
//! `nailbook_core::session` is the single authority on which moves are legal.

pub mod screens;

use std::sync::Arc;

use chrono::NaiveDate;
use nailbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{BookingStatus, NewBooking},
        service::CreateServiceRequest,
        settings::WorkingHours,
    },
    session::{Action, DialogueState, Phase, ServiceChoice, Session, Trigger},
    slots::{check_booking_date, slot_options, SlotOption},
    store::BookingStore,
    time::format_time,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::BotConfig;
use crate::keyboard::Keyboard;

/// Discord rejects message content above this many characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

const STALE_BUTTON: &str = "That button is no longer valid here. Use /start to open the menu.";
const MISCONFIGURED: &str =
    "The salon's working hours are misconfigured, so no times can be offered right now.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Screen {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    /// Text cut to [`MAX_CONTENT_CHARS`].
    pub fn clipped_text(&self) -> String {
        clip(&self.text)
    }
}

pub fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CONTENT_CHARS {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_CONTENT_CHARS - 1).collect();
    clipped.push('…');
    clipped
}

/// What the platform layer should do in response to one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Replaces the current screen (or is sent as a new message).
    pub screen: Option<Screen>,
    /// Short notice shown only to the user.
    pub alert: Option<String>,
    /// Message for the salon operator.
    pub notify_admin: Option<String>,
}

impl Outcome {
    pub fn screen(screen: Screen) -> Self {
        Self {
            screen: Some(screen),
            ..Self::default()
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            alert: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_alert(mut self, text: impl Into<String>) -> Self {
        self.alert = Some(text.into());
        self
    }

    pub fn notify(mut self, text: impl Into<String>) -> Self {
        self.notify_admin = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The `/start` command.
    Start,
    Action(Action),
    Text(String),
}

pub struct Conversation {
    store: Arc<dyn BookingStore>,
    admin_id: Option<u64>,
    step_minutes: i64,
    days_ahead: i64,
}

impl Conversation {
    pub fn new(
        store: Arc<dyn BookingStore>,
        admin_id: Option<u64>,
        step_minutes: i64,
        days_ahead: i64,
    ) -> Self {
        Self {
            store,
            admin_id,
            step_minutes,
            days_ahead,
        }
    }

    pub fn from_config(store: Arc<dyn BookingStore>, config: &BotConfig) -> Self {
        Self::new(
            store,
            config.admin_id,
            config.slot_step_minutes,
            config.booking_days_ahead,
        )
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_id == Some(user_id)
    }

    /// Process one input. Store failures other than a lost slot race are
    /// returned as errors and leave the session untouched.
    pub async fn handle(
        &self,
        session: &mut Session,
        user: &User,
        input: Input,
        today: NaiveDate,
    ) -> BookingResult<Outcome> {
        match input {
            Input::Start => {
                session.reset();
                Ok(Outcome::screen(screens::main_menu(
                    format!("Hi, {}! 💖\nI'm the nail salon booking bot.", user.username),
                    self.is_admin(user.id),
                )))
            }
            Input::Action(action) => self.handle_action(session, user, action, today).await,
            Input::Text(text) => self.handle_text(session, user, text.trim()).await,
        }
    }

    async fn handle_action(
        &self,
        session: &mut Session,
        user: &User,
        action: Action,
        today: NaiveDate,
    ) -> BookingResult<Outcome> {
        if action.is_admin_only() && !self.is_admin(user.id) {
            warn!("User {} tried admin action {}", user.id, action);
            return Ok(Outcome::alert(format!("Access denied! Your ID: {}", user.id)));
        }

        let trigger = action.trigger();
        if let Err(rejected) = session.check(trigger) {
            debug!("User {}: {}", user.id, rejected);
            return Ok(Outcome::alert(STALE_BUTTON));
        }

        match action {
            Action::ToMain => {
                session.reset();
                Ok(Outcome::screen(screens::main_menu(
                    "Main menu:",
                    self.is_admin(user.id),
                )))
            }
            Action::Book => self.show_services(session, Trigger::Book, 0).await,
            Action::ServicesPage(page) => {
                if session.phase() != Phase::ChoosingService {
                    return Ok(Outcome::alert(STALE_BUTTON));
                }
                self.show_services(session, trigger, page).await
            }
            Action::DatesPage(page) => {
                let service = match &session.state {
                    DialogueState::ChoosingDate { service } => service.clone(),
                    _ => return Ok(Outcome::alert(STALE_BUTTON)),
                };
                let screen = screens::date_picker(&service, today, self.days_ahead, page);
                advance(session, trigger, DialogueState::ChoosingDate { service })?;
                Ok(Outcome::screen(screen))
            }
            Action::TimesPage(date, page) => {
                let service = match &session.state {
                    DialogueState::ChoosingTime { service, date: chosen } if *chosen == date => {
                        service.clone()
                    }
                    _ => return Ok(Outcome::alert(STALE_BUTTON)),
                };
                let slots = match self.free_slots(&service, date).await? {
                    Some(slots) => slots,
                    None => return Ok(Outcome::alert(MISCONFIGURED)),
                };
                let screen = screens::time_picker(None, &service, date, &slots, page);
                advance(session, trigger, DialogueState::ChoosingTime { service, date })?;
                Ok(Outcome::screen(screen))
            }
            Action::PickService(id) => self.pick_service(session, id, today).await,
            Action::PickDate(date) => self.pick_date(session, date, today).await,
            Action::PickTime(time) => {
                let (service, date) = match &session.state {
                    DialogueState::ChoosingTime { service, date } => (service.clone(), *date),
                    _ => return Ok(Outcome::alert(STALE_BUTTON)),
                };
                let screen = screens::confirmation(&service, date, time);
                advance(session, trigger, DialogueState::Confirming { service, date, time })?;
                Ok(Outcome::screen(screen))
            }
            Action::Confirm => self.confirm(session, user).await,
            Action::MyBookings => {
                session.reset();
                self.show_user_bookings(user, today, None, 0).await
            }
            Action::MyBookingsPage(page) => {
                session.reset();
                self.show_user_bookings(user, today, None, page).await
            }
            Action::DeleteBooking(id) => {
                session.reset();
                self.delete_booking(user, id, today).await
            }
            Action::AdminPanel => {
                session.reset();
                Ok(Outcome::screen(screens::admin_panel()))
            }
            Action::ViewAllBookings => {
                session.reset();
                self.show_all_bookings(None, 0).await
            }
            Action::AllBookingsPage(page) => {
                session.reset();
                self.show_all_bookings(None, page).await
            }
            Action::MarkDone(id) => {
                session.reset();
                self.set_status(id, BookingStatus::Done).await
            }
            Action::MarkCanceled(id) => {
                session.reset();
                self.set_status(id, BookingStatus::Canceled).await
            }
            Action::AddService => {
                info!("Admin {} started adding a service", user.id);
                advance(session, trigger, DialogueState::AddingServiceName)?;
                Ok(Outcome::screen(screens::prompt(
                    "Service name (for example: Manicure + gel polish):",
                    Action::AdminPanel,
                )))
            }
            Action::SetHours => {
                let current = match self.store.working_hours().await {
                    Ok(hours) => hours.to_string(),
                    Err(BookingError::Slot(e)) => format!("invalid ({e})"),
                    Err(e) => return Err(e),
                };
                advance(session, trigger, DialogueState::SettingHours)?;
                Ok(Outcome::screen(screens::prompt(
                    format!("Current working hours: {current}.\nEnter new ones as HH:MM-HH:MM:"),
                    Action::AdminPanel,
                )))
            }
        }
    }

    async fn show_services(
        &self,
        session: &mut Session,
        trigger: Trigger,
        page: usize,
    ) -> BookingResult<Outcome> {
        let services = self.store.list_services().await?;
        if services.is_empty() {
            session.reset();
            return Ok(Outcome::alert(
                "There are no services yet. The salon will add them soon.",
            ));
        }

        advance(session, trigger, DialogueState::ChoosingService)?;
        Ok(Outcome::screen(screens::service_list(&services, page)))
    }

    async fn pick_service(
        &self,
        session: &mut Session,
        id: Uuid,
        today: NaiveDate,
    ) -> BookingResult<Outcome> {
        let Some(service) = self.store.get_service(id).await? else {
            return Ok(Outcome::alert("This service is no longer available."));
        };
        let service = ServiceChoice::from(&service);

        let screen = screens::date_picker(&service, today, self.days_ahead, 0);
        advance(session, Trigger::PickService, DialogueState::ChoosingDate { service })?;
        Ok(Outcome::screen(screen))
    }

    async fn pick_date(
        &self,
        session: &mut Session,
        date: NaiveDate,
        today: NaiveDate,
    ) -> BookingResult<Outcome> {
        let Some(service) = session.state.service().cloned() else {
            return Ok(Outcome::alert(STALE_BUTTON));
        };
        if let Err(e) = check_booking_date(date, today) {
            debug!("{}", e);
            return Ok(Outcome::alert("That date has already passed. Please pick another one."));
        }

        let slots = match self.free_slots(&service, date).await? {
            Some(slots) => slots,
            None => return Ok(Outcome::alert(MISCONFIGURED)),
        };

        let screen = screens::time_picker(None, &service, date, &slots, 0);
        advance(session, Trigger::PickDate, DialogueState::ChoosingTime { service, date })?;
        Ok(Outcome::screen(screen))
    }

    /// `None` when the stored working hours or the service cannot produce slots.
    async fn free_slots(
        &self,
        service: &ServiceChoice,
        date: NaiveDate,
    ) -> BookingResult<Option<Vec<SlotOption>>> {
        let hours = match self.store.working_hours().await {
            Ok(hours) => hours,
            Err(BookingError::Slot(e)) => {
                warn!("Cannot offer slots: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let busy = self.store.busy_intervals(date).await?;

        match slot_options(date, service.duration_minutes, &hours, &busy, self.step_minutes) {
            Ok(slots) => Ok(Some(slots)),
            Err(e) => {
                warn!("Cannot offer slots for '{}' on {}: {}", service.name, date, e);
                Ok(None)
            }
        }
    }

    async fn confirm(&self, session: &mut Session, user: &User) -> BookingResult<Outcome> {
        let (service, date, time) = match &session.state {
            DialogueState::Confirming {
                service,
                date,
                time,
            } => (service.clone(), *date, *time),
            _ => return Ok(Outcome::alert(STALE_BUTTON)),
        };

        let result = self
            .store
            .create_booking(NewBooking {
                user_id: user.id,
                username: user.username.clone(),
                service_id: service.id,
                service_name: service.name.clone(),
                date,
                start_time: time,
                duration_minutes: service.duration_minutes,
            })
            .await;

        match result {
            Ok(booking) => {
                info!("User {} booked {} ({})", user.id, booking.summary(), booking.id);
                advance(session, Trigger::Confirm, DialogueState::Idle)?;
                Ok(
                    Outcome::screen(screens::main_menu("🎉 You're booked!", self.is_admin(user.id)))
                        .notify(format!(
                            "🔔 New booking: @{}\n{} - {} {}",
                            user.username,
                            service.name,
                            date,
                            format_time(time)
                        )),
                )
            }
            Err(BookingError::SlotUnavailable { .. }) => {
                info!("User {} lost the race for {} {}", user.id, date, format_time(time));
                let slots = match self.free_slots(&service, date).await? {
                    Some(slots) => slots,
                    None => return Ok(Outcome::alert(MISCONFIGURED)),
                };
                let screen = screens::time_picker(
                    Some("Sorry, that time was just taken. Please pick another one."),
                    &service,
                    date,
                    &slots,
                    0,
                );
                advance(session, Trigger::PickDate, DialogueState::ChoosingTime { service, date })?;
                Ok(Outcome::screen(screen))
            }
            Err(BookingError::Slot(e)) => {
                warn!("Booking rejected by slot validation: {}", e);
                Ok(Outcome::alert(MISCONFIGURED))
            }
            Err(e) => Err(e),
        }
    }

    async fn show_user_bookings(
        &self,
        user: &User,
        today: NaiveDate,
        notice: Option<&str>,
        page: usize,
    ) -> BookingResult<Outcome> {
        let bookings = self.store.user_bookings(user.id, today).await?;
        if bookings.is_empty() {
            return Ok(match notice {
                Some(notice) => Outcome::screen(screens::main_menu(
                    format!("{notice} You have no upcoming bookings."),
                    self.is_admin(user.id),
                )),
                None => Outcome::alert("You have no upcoming bookings."),
            });
        }

        let outcome = Outcome::screen(screens::user_bookings(&bookings, page));
        Ok(match notice {
            Some(notice) => outcome.with_alert(notice),
            None => outcome,
        })
    }

    async fn delete_booking(&self, user: &User, id: Uuid, today: NaiveDate) -> BookingResult<Outcome> {
        let Some(booking) = self.store.get_booking(id).await? else {
            return Ok(Outcome::alert("Booking not found."));
        };
        if booking.user_id != user.id && !self.is_admin(user.id) {
            warn!("User {} tried to cancel booking {} of user {}", user.id, id, booking.user_id);
            return Ok(Outcome::alert("You can only cancel your own bookings."));
        }

        match self.store.delete_booking(id).await {
            Ok(()) => {}
            Err(BookingError::NotFound(_)) => return Ok(Outcome::alert("Booking not found.")),
            Err(e) => return Err(e),
        }
        info!("User {} canceled booking {}", user.id, id);

        let outcome = self
            .show_user_bookings(user, today, Some("Booking canceled!"), 0)
            .await?;
        Ok(outcome.notify(format!(
            "❌ Booking canceled: @{}\n{} - {} {}",
            booking.username,
            booking.service_name,
            booking.date,
            format_time(booking.start_time)
        )))
    }

    async fn show_all_bookings(&self, notice: Option<&str>, page: usize) -> BookingResult<Outcome> {
        let bookings = self.store.all_bookings().await?;
        if bookings.is_empty() {
            return Ok(Outcome::alert("There are no bookings yet."));
        }

        let outcome = Outcome::screen(screens::all_bookings(&bookings, page));
        Ok(match notice {
            Some(notice) => outcome.with_alert(notice),
            None => outcome,
        })
    }

    async fn set_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Outcome> {
        match self.store.update_booking_status(id, status).await {
            Ok(_) => {}
            Err(BookingError::NotFound(_)) => return Ok(Outcome::alert("Booking not found.")),
            Err(e) => return Err(e),
        }

        let notice = match status {
            BookingStatus::Done => "Marked as done",
            BookingStatus::Canceled => "Canceled",
            BookingStatus::Active => "Reopened",
        };
        self.show_all_bookings(Some(notice), 0).await
    }

    async fn handle_text(
        &self,
        session: &mut Session,
        user: &User,
        text: &str,
    ) -> BookingResult<Outcome> {
        let phase = session.phase();
        if phase.expects_text() && !self.is_admin(user.id) {
            session.reset();
            return Ok(Outcome::alert(format!("Access denied! Your ID: {}", user.id)));
        }

        match (&session.state, phase) {
            (DialogueState::Idle, _) => Ok(Outcome::screen(screens::main_menu(
                "Please use the menu buttons below 👇",
                self.is_admin(user.id),
            ))),
            (_, Phase::ChoosingService) => {
                Ok(Outcome::alert("Please pick a service using the buttons 👇"))
            }
            (_, Phase::ChoosingDate) => Ok(Outcome::alert("Please pick a date using the buttons 👇")),
            (_, Phase::ChoosingTime) => Ok(Outcome::alert("Please pick a time using the buttons 👇")),
            (_, Phase::Confirming) => Ok(Outcome::alert(
                "Please confirm or cancel your booking using the buttons 👇",
            )),
            (DialogueState::AddingServiceName, _) => {
                if text.is_empty() {
                    return Ok(Outcome::alert("The service name cannot be empty."));
                }
                advance(
                    session,
                    Trigger::Text,
                    DialogueState::AddingServicePrice {
                        name: text.to_string(),
                    },
                )?;
                Ok(Outcome::screen(screens::prompt(
                    "✏️ Enter the price:",
                    Action::AdminPanel,
                )))
            }
            (DialogueState::AddingServicePrice { name }, _) => {
                if text.is_empty() {
                    return Ok(Outcome::alert("The price cannot be empty."));
                }
                let next = DialogueState::AddingServiceDuration {
                    name: name.clone(),
                    price: text.to_string(),
                };
                advance(session, Trigger::Text, next)?;
                Ok(Outcome::screen(screens::prompt(
                    "✏️ Enter the approximate duration in minutes (for example: 60):",
                    Action::AdminPanel,
                )))
            }
            (DialogueState::AddingServiceDuration { name, price }, _) => {
                let duration_minutes = match text.parse::<i64>() {
                    Ok(minutes) if minutes > 0 => minutes,
                    _ => {
                        return Ok(Outcome::alert(
                            "Invalid format, enter a positive number of minutes.",
                        ))
                    }
                };
                let request = CreateServiceRequest {
                    name: name.clone(),
                    price: price.clone(),
                    duration_minutes,
                };
                let service = self.store.create_service(request).await?;
                advance(session, Trigger::Text, DialogueState::Idle)?;
                Ok(Outcome::screen(screens::main_menu(
                    format!("✅ Service '{}' added!", service.name),
                    true,
                )))
            }
            (DialogueState::SettingHours, _) => {
                let hours = match WorkingHours::parse(text) {
                    Ok(hours) => hours,
                    Err(e) => {
                        debug!("Rejected working hours {:?}: {}", text, e);
                        return Ok(Outcome::alert(
                            "Invalid format, use HH:MM-HH:MM with the start before the end.",
                        ));
                    }
                };
                self.store.set_working_hours(hours).await?;
                advance(session, Trigger::Text, DialogueState::Idle)?;
                Ok(Outcome::screen(screens::main_menu(
                    format!("Working hours saved: {hours}"),
                    true,
                )))
            }
            _ => Ok(Outcome::alert(STALE_BUTTON)),
        }
    }
}

fn advance(session: &mut Session, trigger: Trigger, next: DialogueState) -> BookingResult<()> {
    session
        .advance(trigger, next)
        .map_err(|rejected| BookingError::Internal(Box::new(rejected)))
}
