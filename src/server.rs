use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Datelike, Utc};
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info, warn};

use crate::config::Config;
use crate::content_cache::ContentCache;
use crate::pages::{LinkStyle, Pages};
use crate::post_store::PostStore;
use crate::query_string::QueryString;
use crate::seo::robots::render_robots;
use crate::view::Templates;

const HTML: &str = "text/html; charset=utf-8";

struct AppState {
    config: Config,
    store: PostStore,
    cache: ContentCache<String>,
}

type SharedState = Arc<Mutex<AppState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn get_cur_page(req: &HttpRequest) -> u32 {
    match req.uri().query() {
        Some(query_str) => QueryString::parse(query_str).page(),
        None => 1,
    }
}

fn error_response(e: anyhow::Error) -> web::HttpResponse {
    error!("{:#}", e);
    web::HttpResponse::InternalServerError()
        .content_type(HTML)
        .body(format!("Error rendering page: {}", e))
}

fn not_found_response(pages: &Pages, message: &str) -> web::HttpResponse {
    match pages.not_found(message) {
        Ok(body) => web::HttpResponse::NotFound().content_type(HTML).body(body),
        Err(e) => {
            error!("Error rendering not found page: {:#}", e);
            web::HttpResponse::NotFound().body(message.to_string())
        }
    }
}

/// Loads the templates and renders one page; `None` from `render` answers
/// 404 with the not found page.
fn respond<F>(config: &Config, store: &PostStore, not_found_message: &str, render: F) -> web::HttpResponse
    where F: FnOnce(&Pages) -> anyhow::Result<Option<String>>
{
    let templates = match Templates::load(&config.paths.template_dir) {
        Ok(templates) => templates,
        Err(e) => return error_response(e),
    };
    let pages = Pages::new(config, &templates, store);

    match render(&pages) {
        Ok(Some(body)) => web::HttpResponse::Ok().content_type(HTML).body(body),
        Ok(None) => not_found_response(&pages, not_found_message),
        Err(e) => error_response(e),
    }
}

#[web::get("/")]
async fn index(state: web::types::State<SharedState>) -> web::HttpResponse {
    let state = lock(&state);
    let year = Utc::now().year();
    respond(&state.config, &state.store, "", |pages| pages.index(year).map(Some))
}

#[web::get("/blog")]
async fn blog(req: HttpRequest, state: web::types::State<SharedState>) -> web::HttpResponse {
    let state = lock(&state);
    let cur_page = get_cur_page(&req);
    respond(&state.config, &state.store, "", |pages| pages.blog(cur_page, LinkStyle::Query).map(Some))
}

#[web::get("/blog/{slug}")]
async fn blog_post(slug: web::types::Path<String>, state: web::types::State<SharedState>) -> web::HttpResponse {
    let mut state = lock(&state);
    let AppState { config, store, cache } = &mut *state;
    let slug = slug.into_inner();
    respond(config, store, "This post does not exist.", |pages| pages.post(&slug, cache))
}

#[web::get("/blog/tag/{tag}")]
async fn blog_tag(tag: web::types::Path<String>, state: web::types::State<SharedState>) -> web::HttpResponse {
    let state = lock(&state);
    let tag = tag.into_inner();
    respond(&state.config, &state.store, "No posts carry this tag.", |pages| pages.tag(&tag))
}

#[web::get("/blog/category/{category}")]
async fn blog_category(category: web::types::Path<String>, state: web::types::State<SharedState>) -> web::HttpResponse {
    let state = lock(&state);
    let category = category.into_inner();
    respond(&state.config, &state.store, "No posts in this category.", |pages| pages.category(&category))
}

#[web::get("/sitemap.xml")]
async fn sitemap(state: web::types::State<SharedState>) -> web::HttpResponse {
    let state = lock(&state);
    let templates = match Templates::load(&state.config.paths.template_dir) {
        Ok(templates) => templates,
        Err(e) => return error_response(e),
    };
    let pages = Pages::new(&state.config, &templates, &state.store);
    match pages.sitemap(Utc::now().naive_utc()) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/xml; charset=utf-8")
            .body(xml),
        Err(e) => error_response(e),
    }
}

#[web::get("/robots.txt")]
async fn robots(state: web::types::State<SharedState>) -> web::HttpResponse {
    let state = lock(&state);
    web::HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_robots(&state.config.robots, &state.config.site))
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<SharedState>) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        warn!("Refusing public file {}", path.as_str());
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let state = lock(&state);
    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

async fn fallback(req: HttpRequest, state: web::types::State<SharedState>) -> web::HttpResponse {
    info!("No route for {}", req.path());
    let state = lock(&state);
    respond(&state.config, &state.store, "The page you are looking for does not exist.", |_| Ok(None))
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;

    let store = PostStore::from_config(&config);
    info!("Serving {} posts from {}", store.all_slugs().len(), config.paths.posts_dir.display());
    if config.defaults.rendering_cache_enabled {
        info!("Rendered posts are cached until their file changes");
    }

    let app_state = Arc::new(Mutex::new(AppState {
        cache: ContentCache::from_flag(config.defaults.rendering_cache_enabled),
        store,
        config,
    }));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(blog)
            .service(blog_tag)
            .service(blog_category)
            .service(blog_post)
            .service(sitemap)
            .service(robots)
            .service(public_files)
            .default_service(web::route().to(fallback))
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
