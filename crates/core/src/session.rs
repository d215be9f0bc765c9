//! Per-user dialogue state.
//!
//! Every user has one [`Session`] holding a typed [`DialogueState`]. Moves
//! between states are checked against the [`transition`] table; the
//! conversation layer never writes a state the table does not allow.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::service::Service;
use crate::time::{format_time, parse_time_of_day};

/// Button tokens. The `Display` form is what travels through the chat
/// platform as the button's identifier; `FromStr` parses it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToMain,
    Book,
    PickService(Uuid),
    PickDate(NaiveDate),
    PickTime(NaiveTime),
    Confirm,
    MyBookings,
    DeleteBooking(Uuid),
    AdminPanel,
    AddService,
    ViewAllBookings,
    MarkDone(Uuid),
    MarkCanceled(Uuid),
    SetHours,
    ServicesPage(usize),
    DatesPage(usize),
    TimesPage(NaiveDate, usize),
    MyBookingsPage(usize),
    AllBookingsPage(usize),
}

impl Action {
    pub fn trigger(&self) -> Trigger {
        match self {
            Action::Book => Trigger::Book,
            Action::PickService(_) => Trigger::PickService,
            Action::PickDate(_) => Trigger::PickDate,
            Action::PickTime(_) => Trigger::PickTime,
            Action::Confirm => Trigger::Confirm,
            Action::AddService => Trigger::AddService,
            Action::SetHours => Trigger::SetHours,
            Action::ServicesPage(_) | Action::DatesPage(_) | Action::TimesPage(..) => {
                Trigger::TurnPage
            }
            Action::ToMain
            | Action::MyBookings
            | Action::DeleteBooking(_)
            | Action::AdminPanel
            | Action::ViewAllBookings
            | Action::MarkDone(_)
            | Action::MarkCanceled(_)
            | Action::MyBookingsPage(_)
            | Action::AllBookingsPage(_) => Trigger::Reset,
        }
    }

    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Action::AdminPanel
                | Action::AddService
                | Action::ViewAllBookings
                | Action::MarkDone(_)
                | Action::MarkCanceled(_)
                | Action::SetHours
                | Action::AllBookingsPage(_)
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ToMain => f.write_str("to_main"),
            Action::Book => f.write_str("book"),
            Action::PickService(id) => write!(f, "svc_{id}"),
            Action::PickDate(date) => write!(f, "date_{}", date.format("%Y-%m-%d")),
            Action::PickTime(time) => write!(f, "time_{}", format_time(*time)),
            Action::Confirm => f.write_str("finish"),
            Action::MyBookings => f.write_str("my_bookings"),
            Action::DeleteBooking(id) => write!(f, "del_{id}"),
            Action::AdminPanel => f.write_str("admin_panel"),
            Action::AddService => f.write_str("add_svc"),
            Action::ViewAllBookings => f.write_str("view_all_bookings"),
            Action::MarkDone(id) => write!(f, "done_{id}"),
            Action::MarkCanceled(id) => write!(f, "cancel_{id}"),
            Action::SetHours => f.write_str("set_hours"),
            Action::ServicesPage(page) => write!(f, "svcpage_{page}"),
            Action::DatesPage(page) => write!(f, "datepage_{page}"),
            Action::TimesPage(date, page) => write!(f, "timepage_{}_{page}", date.format("%Y-%m-%d")),
            Action::MyBookingsPage(page) => write!(f, "mypage_{page}"),
            Action::AllBookingsPage(page) => write!(f, "allpage_{page}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown action token: {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownAction(token.to_string());
        let uuid = |raw: &str| Uuid::parse_str(raw).map_err(|_| unknown());
        let page = |raw: &str| raw.parse::<usize>().map_err(|_| unknown());
        let date = |raw: &str| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| unknown());

        let action = match token {
            "to_main" => Action::ToMain,
            "book" => Action::Book,
            "finish" => Action::Confirm,
            "my_bookings" => Action::MyBookings,
            "admin_panel" => Action::AdminPanel,
            "add_svc" => Action::AddService,
            "view_all_bookings" => Action::ViewAllBookings,
            "set_hours" => Action::SetHours,
            _ => {
                let (prefix, rest) = token.split_once('_').ok_or_else(unknown)?;
                match prefix {
                    "svc" => Action::PickService(uuid(rest)?),
                    "del" => Action::DeleteBooking(uuid(rest)?),
                    "done" => Action::MarkDone(uuid(rest)?),
                    "cancel" => Action::MarkCanceled(uuid(rest)?),
                    "date" => Action::PickDate(date(rest)?),
                    "time" => Action::PickTime(parse_time_of_day(rest).map_err(|_| unknown())?),
                    "svcpage" => Action::ServicesPage(page(rest)?),
                    "datepage" => Action::DatesPage(page(rest)?),
                    "timepage" => {
                        let (day, number) = rest.split_once('_').ok_or_else(unknown)?;
                        Action::TimesPage(date(day)?, page(number)?)
                    }
                    "mypage" => Action::MyBookingsPage(page(rest)?),
                    "allpage" => Action::AllBookingsPage(page(rest)?),
                    _ => return Err(unknown()),
                }
            }
        };
        Ok(action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    ChoosingService,
    ChoosingDate,
    ChoosingTime,
    Confirming,
    AddingServiceName,
    AddingServicePrice,
    AddingServiceDuration,
    SettingHours,
}

impl Phase {
    pub fn expects_text(&self) -> bool {
        matches!(
            self,
            Phase::AddingServiceName
                | Phase::AddingServicePrice
                | Phase::AddingServiceDuration
                | Phase::SettingHours
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Reset,
    Book,
    PickService,
    PickDate,
    PickTime,
    Confirm,
    AddService,
    SetHours,
    TurnPage,
    Text,
}

/// The dialogue transition table. `None` means the move is rejected and the
/// session stays where it is.
pub fn transition(from: Phase, trigger: Trigger) -> Option<Phase> {
    use Phase::*;

    match (from, trigger) {
        (_, Trigger::Reset) => Some(Idle),
        (_, Trigger::Book) => Some(ChoosingService),
        (_, Trigger::AddService) => Some(AddingServiceName),
        (_, Trigger::SetHours) => Some(SettingHours),

        (ChoosingService | ChoosingTime | Confirming, Trigger::PickService) => Some(ChoosingDate),
        (ChoosingDate | Confirming, Trigger::PickDate) => Some(ChoosingTime),
        (ChoosingTime, Trigger::PickTime) => Some(Confirming),
        (Confirming, Trigger::Confirm) => Some(Idle),

        (ChoosingService, Trigger::TurnPage) => Some(ChoosingService),
        (ChoosingDate, Trigger::TurnPage) => Some(ChoosingDate),
        (ChoosingTime, Trigger::TurnPage) => Some(ChoosingTime),

        (AddingServiceName, Trigger::Text) => Some(AddingServicePrice),
        (AddingServicePrice, Trigger::Text) => Some(AddingServiceDuration),
        (AddingServiceDuration, Trigger::Text) => Some(Idle),
        (SettingHours, Trigger::Text) => Some(Idle),

        _ => None,
    }
}

/// The slice of a catalog entry a booking dialogue carries along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceChoice {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub duration_minutes: i64,
}

impl From<&Service> for ServiceChoice {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            price: service.price.clone(),
            duration_minutes: service.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DialogueState {
    #[default]
    Idle,
    ChoosingService,
    ChoosingDate {
        service: ServiceChoice,
    },
    ChoosingTime {
        service: ServiceChoice,
        date: NaiveDate,
    },
    Confirming {
        service: ServiceChoice,
        date: NaiveDate,
        time: NaiveTime,
    },
    AddingServiceName,
    AddingServicePrice {
        name: String,
    },
    AddingServiceDuration {
        name: String,
        price: String,
    },
    SettingHours,
}

impl DialogueState {
    pub fn phase(&self) -> Phase {
        match self {
            DialogueState::Idle => Phase::Idle,
            DialogueState::ChoosingService => Phase::ChoosingService,
            DialogueState::ChoosingDate { .. } => Phase::ChoosingDate,
            DialogueState::ChoosingTime { .. } => Phase::ChoosingTime,
            DialogueState::Confirming { .. } => Phase::Confirming,
            DialogueState::AddingServiceName => Phase::AddingServiceName,
            DialogueState::AddingServicePrice { .. } => Phase::AddingServicePrice,
            DialogueState::AddingServiceDuration { .. } => Phase::AddingServiceDuration,
            DialogueState::SettingHours => Phase::SettingHours,
        }
    }

    pub fn service(&self) -> Option<&ServiceChoice> {
        match self {
            DialogueState::ChoosingDate { service }
            | DialogueState::ChoosingTime { service, .. }
            | DialogueState::Confirming { service, .. } => Some(service),
            _ => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DialogueState::ChoosingTime { date, .. } | DialogueState::Confirming { date, .. } => {
                Some(*date)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{trigger:?} is not allowed from {from:?}")]
pub struct TransitionRejected {
    pub from: Phase,
    pub trigger: Trigger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: u64,
    pub state: DialogueState,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id,
            state: DialogueState::Idle,
            updated_at: Utc::now(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Check whether `trigger` may fire from the current state.
    pub fn check(&self, trigger: Trigger) -> Result<Phase, TransitionRejected> {
        transition(self.phase(), trigger).ok_or(TransitionRejected {
            from: self.phase(),
            trigger,
        })
    }

    /// Move to `next`, which must be the state the table prescribes for `trigger`.
    pub fn advance(&mut self, trigger: Trigger, next: DialogueState) -> Result<(), TransitionRejected> {
        let expected = self.check(trigger)?;
        if next.phase() != expected {
            return Err(TransitionRejected {
                from: self.phase(),
                trigger,
            });
        }
        self.state = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = DialogueState::Idle;
        self.updated_at = Utc::now();
    }
}
