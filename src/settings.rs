use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::{DEFAULT_SESSION_COOKIE, Endpoints};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: Url,
    pub strict: bool,
    pub debug: bool,
    pub session_cookie: String,
    pub login_path: String,
    pub daily_classes_path: String,
    pub book_class_path: String,
    pub cancel_booking_path: String,
    pub login: Option<String>,
    pub password: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let endpoints = Endpoints::default();
        let config = Config::builder()
            .add_source(File::with_name("zdrofit").required(false))
            // ZDROFIT_BASE_URL, ZDROFIT_STRICT, ...
            .add_source(
                Environment::with_prefix("ZDROFIT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("base_url", "https://zdrofit.perfectgym.pl")?
            .set_default("strict", false)?
            .set_default("debug", false)?
            .set_default("session_cookie", DEFAULT_SESSION_COOKIE)?
            .set_default("login_path", endpoints.login)?
            .set_default("daily_classes_path", endpoints.daily_classes)?
            .set_default("book_class_path", endpoints.book_class)?
            .set_default("cancel_booking_path", endpoints.cancel_booking)?
            .build()?;

        config.try_deserialize()
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            login: self.login_path.clone(),
            daily_classes: self.daily_classes_path.clone(),
            book_class: self.book_class_path.clone(),
            cancel_booking: self.cancel_booking_path.clone(),
        }
    }
}
