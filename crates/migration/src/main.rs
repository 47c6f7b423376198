use sea_orm::Database;
use sea_orm_migration::prelude::*;

const DEFAULT_DATABASE_URL: &str = "sqlite:./partnerbook.db?mode=rwc";
const USAGE: &str = "usage: migration [up [N] | down [N] | fresh | refresh | reset | status]";

#[derive(Debug, PartialEq)]
enum Action {
    Up(Option<u32>),
    Down(Option<u32>),
    Fresh,
    Refresh,
    Reset,
    Status,
}

fn parse_action(args: &[String]) -> Result<Action, String> {
    let steps = |raw: Option<&String>| -> Result<Option<u32>, String> {
        raw.map(|n| n.parse().map_err(|_| format!("invalid step count '{n}'")))
            .transpose()
    };

    match args {
        [] => Ok(Action::Up(None)),
        [cmd, rest @ ..] if rest.len() <= 1 => match cmd.as_str() {
            "up" => Ok(Action::Up(steps(rest.first())?)),
            "down" => Ok(Action::Down(steps(rest.first())?)),
            "fresh" if rest.is_empty() => Ok(Action::Fresh),
            "refresh" if rest.is_empty() => Ok(Action::Refresh),
            "reset" if rest.is_empty() => Ok(Action::Reset),
            "status" if rest.is_empty() => Ok(Action::Status),
            _ => Err(USAGE.to_string()),
        },
        _ => Err(USAGE.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = match parse_action(&args) {
        Ok(action) => action,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let db_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = Database::connect(&db_url).await?;

    match action {
        Action::Up(steps) => migration::Migrator::up(&db, steps).await?,
        Action::Down(steps) => migration::Migrator::down(&db, steps).await?,
        Action::Fresh => migration::Migrator::fresh(&db).await?,
        Action::Refresh => migration::Migrator::refresh(&db).await?,
        Action::Reset => migration::Migrator::reset(&db).await?,
        Action::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
