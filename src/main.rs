//! QCOM Viewer - HTTP server entry point.

use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use qcom_viewer::config::Config;
use qcom_viewer::web::{self, AppContext};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    // Load once; the context is never mutated afterwards
    let ctx = actix_web::web::Data::new(AppContext::load(config.data_file.clone()));

    log::info!("Listening on http://{}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(ctx.clone())
            .configure(web::configure)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("server error")?;

    Ok(())
}
