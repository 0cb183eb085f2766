use serde::{Deserialize, Deserializer, Serialize};

use crate::date::{Date, DateTime};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub remember_me: bool,
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            remember_me: true,
            login: login.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LoginResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub member: Member,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    pub id: i64,
    pub home_club_id: i64,
    pub default_club_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DailyClassesRequest {
    pub club_id: i64,
    pub date: Date,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DailyClassesResponse {
    pub calendar_data: Vec<CalendarData>,
}

impl DailyClassesResponse {
    /// All classes of the day, slot by slot.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.calendar_data.iter().flat_map(|slot| slot.classes.iter())
    }
}

/// One time slot of the daily calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarData {
    pub classes: Vec<Class>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Class {
    pub id: i64,
    pub status: ClassStatus,
    #[serde(default)]
    pub status_reason: Option<String>,
    pub name: String,
    pub start_time: DateTime,
    pub booking_indicator: BookingIndicator,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<ClassUser>,
}

impl Class {
    pub fn booked_by_current_user(&self) -> bool {
        self.users.iter().any(|user| user.is_current_user)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ClassStatus {
    Bookable,
    Booked,
    Awaitable,
    Awaiting,
    Unavailable,
    /// Any status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct BookingIndicator {
    pub limit: i32,
    pub available: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ClassUser {
    pub id: i64,
    pub is_current_user: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct BookClassRequest {
    pub class_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BookClassResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tickets: Vec<Ticket>,
    pub class_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Ticket {
    pub time_table_event_id: i64,
    pub name: String,
    pub start_time: DateTime,
    pub zone_name: String,
    pub user_name: String,
    pub user_number: String,
    pub user_id: i64,
    pub trainer: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CancelBookingRequest {
    pub class_id: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CancelBookingResponse {
    pub class_id: i64,
    pub user_id: i64,
}

/// Lists may come back as `null` when empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
