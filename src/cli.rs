use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::client::ZdrofitClient;
use crate::date::Date;
use crate::models::{BookClassRequest, CancelBookingRequest, DailyClassesRequest, LoginRequest};
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "zdrofit", version, about = "Book classes at Zdrofit clubs")]
pub struct Cli {
    /// Account login, overrides ZDROFIT_LOGIN
    #[arg(long)]
    pub login: Option<String>,

    /// Account password, overrides ZDROFIT_PASSWORD
    #[arg(long)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the classes of a club for one day
    Classes {
        #[arg(long)]
        club_id: i64,
        /// YYYY-MM-DD, today (UTC) when omitted
        #[arg(long)]
        date: Option<Date>,
    },
    /// Book a class
    Book {
        #[arg(long)]
        class_id: i64,
    },
    /// Cancel a class booking
    Cancel {
        #[arg(long)]
        class_id: i64,
    },
}

/// Credentials from the command line win over the ones in `settings`.
fn credentials(cli: &Cli, settings: &Settings) -> Result<(String, String), &'static str> {
    let login = cli
        .login
        .clone()
        .or_else(|| settings.login.clone())
        .ok_or("missing login, pass --login or set ZDROFIT_LOGIN")?;
    let password = cli
        .password
        .clone()
        .or_else(|| settings.password.clone())
        .ok_or("missing password, pass --password or set ZDROFIT_PASSWORD")?;
    Ok((login, password))
}

pub async fn execute(cli: Cli, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let (login, password) = credentials(&cli, settings)?;

    let client = ZdrofitClient::from_settings(settings);
    client
        .authenticate(&LoginRequest::new(login, password))
        .await?;

    match cli.command {
        Command::Classes { club_id, date } => {
            let request = DailyClassesRequest {
                club_id,
                date: date.unwrap_or_else(Date::today),
            };
            print_json(&client.daily_classes(&request).await?)
        }
        Command::Book { class_id } => {
            print_json(&client.book_class(&BookClassRequest { class_id }).await?)
        }
        Command::Cancel { class_id } => print_json(
            &client
                .cancel_class_booking(&CancelBookingRequest { class_id })
                .await?,
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
