use crate::email_client::EmailJsClient;
use crate::routes::{contact, health_check, json_error_handler};
use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

pub fn run(listener: TcpListener, email_client: EmailJsClient) -> Result<Server, std::io::Error> {
    let email_client = web::Data::new(email_client);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health_check", web::get().to(health_check))
            .route("/api/contact", web::post().to(contact))
            .app_data(email_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
