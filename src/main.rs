use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use consciencia_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let pool = create_pool(&config.database).await.map_err(|e| {
        log::error!("Failed to create database connection pool: {e}");
        std::io::Error::other(e.to_string())
    })?;

    run_migrations(&pool).await.map_err(|e| {
        log::error!("Failed to run database migrations: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.audience.clone());

    let business = &config.business;
    let cash_flow_service = CashFlowService::new(pool.clone());
    let category_service = CategoryService::new(pool.clone());
    let ceremony_service = CeremonyService::new(pool.clone(), business.recent_limit);
    let waitlist_service = WaitlistService::new(pool.clone());
    let course_service = CourseService::new(pool.clone());
    let history_service = HistoryService::new(pool.clone(), business.history_page_size);
    let testimonial_service = TestimonialService::new(pool.clone(), business.recent_limit);
    let house_service = HouseService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let allowed_origins = config.server.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(web::Data::new(cash_flow_service.clone()))
            .app_data(web::Data::new(category_service.clone()))
            .app_data(web::Data::new(ceremony_service.clone()))
            .app_data(web::Data::new(waitlist_service.clone()))
            .app_data(web::Data::new(course_service.clone()))
            .app_data(web::Data::new(history_service.clone()))
            .app_data(web::Data::new(testimonial_service.clone()))
            .app_data(web::Data::new(house_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::cash_flow_config)
                    .configure(handlers::category_config)
                    .configure(handlers::ceremony_config)
                    .configure(handlers::enrollment_config)
                    .configure(handlers::history_config)
                    .configure(handlers::course_config)
                    .configure(handlers::testimonial_config)
                    .configure(handlers::house_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
