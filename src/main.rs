use rocket::*;
use tracing_subscriber::EnvFilter;

mod api_key;
mod config;
mod database;
mod envelope;
mod leaderboard;
mod score;

use config::Config;
use database::{requests, DatabaseHandle, PostgresDatabase};

#[launch]
fn rocket() -> _ {
    init_tracing();

    let config = Config::from_env();
    tracing::info!(?config, "loaded configuration");

    let database = PostgresDatabase::new(config.database.clone());
    assemble(config, Box::new(database))
}

/// Installs the `tracing` subscriber. Rocket's own `log` output is bridged into it.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("failed to install tracing subscriber: {}", err);
    }
}

/// Assembles the server around a store backend.
pub fn assemble(config: Config, database: DatabaseHandle) -> Rocket<Build> {
    rocket::build()
        .mount(
            "/",
            routes![
                requests::list_scores,
                requests::head_scores,
                requests::add_score
            ],
        )
        .register(
            "/",
            catchers![
                requests::bad_request,
                requests::unauthorized,
                requests::not_found,
                requests::default_catcher
            ],
        )
        .manage(config.api_key)
        .manage::<DatabaseHandle>(database)
}
