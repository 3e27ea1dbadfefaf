use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migration CLI reads DATABASE_URL; derive it from the CAMPUS_* settings.
    if std::env::var("DATABASE_URL").is_err() {
        match migration::DatabaseConfig::from_env() {
            Ok(config) => unsafe { std::env::set_var("DATABASE_URL", config.build_connection_string()) },
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            },
        }
    }
    cli::run_cli(migration::Migrator).await;
}
