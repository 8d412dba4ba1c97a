use actix_web::dev::{Server, Service};
use actix_web::{web, App, HttpResponse, HttpServer};

use crate::dashboard::Dashboard;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Register the dashboard routes on an actix-web app
pub fn configure(dashboard: Dashboard) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(dashboard))
            .route("/", web::get().to(index))
            .route("/api/snapshot", web::get().to(serve_snapshot))
            .route("/healthz", web::get().to(healthz));
    }
}

/// Bind the dashboard server; the returned future runs it until stopped
pub fn build(dashboard: Dashboard, bind_addr: &str, port: u16) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap_fn(|req, srv| {
                tracing::debug!(method = %req.method(), uri = %req.uri(), "Incoming request");
                srv.call(req)
            })
            .configure(configure(dashboard.clone()))
    })
    .disable_signals()
    .bind((bind_addr, port))?;

    for addr in server.addrs() {
        tracing::info!(%addr, "Dashboard listening");
    }

    Ok(server.run())
}

async fn index(data: web::Data<Dashboard>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML.replace("{{title}}", &escape_html(data.title())))
}

async fn serve_snapshot(data: web::Data<Dashboard>) -> HttpResponse {
    HttpResponse::Ok().json(data.snapshot())
}

async fn healthz() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
