use std::sync::{RwLock, RwLockReadGuard};

use actix_cors::Cors;
use actix_web::{
    web::{self, resource, scope, Json},
    App, HttpRequest, HttpResponse, HttpServer,
};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    auth::check_auth,
    core::{
        cover::{grid_items, GridItem},
        data::{load_from_cdn, stamp, write_local_db},
        filter::{FilterState, QueryString},
        index::{
            build_category_index, find_category, group_by_category, group_categories,
            projects_in_group_category,
        },
        keys::strip_invisible,
        sanitize::clean_project,
        scroll::{active_section, section_anchors, SectionAnchor, SCROLL_SPY_OFFSET},
        settings::Settings,
    },
    error::FolioError,
    types::{Category, ContentSnapshot, ListingPage, Project},
};

pub struct AppState {
    pub settings: Settings,
    pub snapshot: RwLock<ContentSnapshot>,
}

impl AppState {
    pub fn new(settings: Settings, snapshot: ContentSnapshot) -> Self {
        AppState {
            settings,
            snapshot: RwLock::new(snapshot),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ContentSnapshot>, FolioError> {
        self.snapshot.read().map_err(|_| FolioError::Poisoned)
    }

    fn page(&self, slug: &str) -> Result<ListingPage, FolioError> {
        self.read()?
            .page(slug)
            .cloned()
            .ok_or_else(|| FolioError::NotFound(format!("page \"{}\"", slug)))
    }

    fn replace(&self, snapshot: ContentSnapshot) -> Result<(), FolioError> {
        // disk write and swap happen under the same write lock
        let mut current = self.snapshot.write().map_err(|_| FolioError::Poisoned)?;
        write_local_db(self.settings.snapshot_path(), &snapshot)?;
        *current = snapshot;
        Ok(())
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        scope("/v1")
            .service(resource("/folio").route(web::get().to(status_handler)))
            .service(resource("/pages/{slug}").route(web::get().to(page_handler)))
            .service(resource("/pages/{slug}/select").route(web::post().to(select_handler)))
            .service(resource("/projects/{slug}").route(web::get().to(project_handler)))
            .service(resource("/scroll-spy").route(web::post().to(scroll_spy_handler)))
            .service(resource("/categories").route(web::get().to(categories_handler)))
            .service(
                resource("/groups/{group}/categories/{slug}").route(web::get().to(group_category_handler)),
            )
            .service(
                resource("/snapshot")
                    .route(web::get().to(snapshot_handler))
                    .route(web::put().to(upload_handler)),
            )
            .service(resource("/snapshot/refresh").route(web::post().to(refresh_handler))),
    );
}

pub async fn start_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let addr = state.settings.addr();
    info!("Server starting at {}", addr);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method(),
            )
    })
    .bind(addr)?
    .run()
    .await
}

async fn status_handler() -> HttpResponse {
    HttpResponse::Ok().body("folio-nav is running")
}

#[derive(Serialize, Debug)]
struct PageView {
    slug: String,
    title: String,
    title_image_url: Option<String>,
    categories: Vec<Category>,
    selected: Option<String>,
    current_category: Option<Category>,
    query: String,
    items: Vec<GridItem>,
}

fn page_view(page: &ListingPage, state: &FilterState<QueryString>) -> PageView {
    let categories = build_category_index(&page.featured);
    let current_category = state
        .selected()
        .and_then(|id| {
            categories
                .iter()
                .find(|category| strip_invisible(category.identity()) == id)
        })
        .cloned();
    PageView {
        slug: page.slug.clone(),
        title: page.title.clone(),
        title_image_url: page.title_image_url.clone(),
        selected: state.selected().map(str::to_string),
        current_category,
        query: state.channel().to_string(),
        items: grid_items(state.filter(&page.featured), &page.slug),
        categories,
    }
}

async fn page_handler(
    data: web::Data<AppState>,
    slug: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, FolioError> {
    let page = data.page(&slug)?;
    let state = FilterState::new(QueryString::parse(req.query_string()));
    Ok(HttpResponse::Ok().json(page_view(&page, &state)))
}

#[derive(Deserialize, Debug)]
struct SelectRequest {
    #[serde(default)]
    query: String,
    #[serde(default)]
    category: Option<String>,
}

async fn select_handler(
    data: web::Data<AppState>,
    slug: web::Path<String>,
    body: Json<SelectRequest>,
) -> Result<HttpResponse, FolioError> {
    let page = data.page(&slug)?;
    let mut state = FilterState::new(QueryString::parse(&body.query));
    match body.category.as_deref() {
        Some(category) => state.select(category),
        None => state.clear(),
    }
    Ok(HttpResponse::Ok().json(page_view(&page, &state)))
}

#[derive(Serialize, Debug)]
struct ProjectView {
    project: Project,
    sections: Vec<SectionAnchor>,
}

async fn project_handler(
    data: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, FolioError> {
    let project = data
        .read()?
        .project(&slug)
        .map(clean_project)
        .ok_or_else(|| FolioError::NotFound(format!("project \"{}\"", slug)))?;
    let sections = section_anchors(&project);
    Ok(HttpResponse::Ok().json(ProjectView { project, sections }))
}

#[derive(Deserialize, Debug)]
struct ScrollSpyRequest {
    offsets: Vec<f64>,
    scroll_y: f64,
    #[serde(default)]
    fixed_offset: Option<f64>,
}

#[derive(Serialize, Debug)]
struct ScrollSpyResponse {
    active: Option<usize>,
}

async fn scroll_spy_handler(body: Json<ScrollSpyRequest>) -> HttpResponse {
    let active = active_section(
        &body.offsets,
        body.scroll_y,
        body.fixed_offset.unwrap_or(SCROLL_SPY_OFFSET),
    );
    HttpResponse::Ok().json(ScrollSpyResponse { active })
}

async fn categories_handler(data: web::Data<AppState>) -> Result<HttpResponse, FolioError> {
    let (categories, projects) = {
        let snapshot = data.read()?;
        (snapshot.categories.clone(), snapshot.projects.clone())
    };
    Ok(HttpResponse::Ok().json(group_by_category(&categories, &projects)))
}

#[derive(Serialize, Debug)]
struct GroupCategoryView<'a> {
    group: &'a str,
    category: &'a Category,
    current: &'a str,
    categories: Vec<&'a Category>,
    projects: Vec<&'a Project>,
}

async fn group_category_handler(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, FolioError> {
    let (group, slug) = path.into_inner();
    let (categories, projects) = {
        let snapshot = data.read()?;
        (snapshot.categories.clone(), snapshot.projects.clone())
    };
    let category = find_category(&categories, &slug)
        .ok_or_else(|| FolioError::NotFound(format!("category \"{}\"", slug)))?;
    Ok(HttpResponse::Ok().json(GroupCategoryView {
        group: &group,
        category,
        current: category.identity(),
        categories: group_categories(&categories, &projects, &group),
        projects: projects_in_group_category(&projects, &group, category),
    }))
}

async fn snapshot_handler(data: web::Data<AppState>) -> Result<HttpResponse, FolioError> {
    let snapshot = data.read()?.clone();
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn upload_handler(
    data: web::Data<AppState>,
    snapshot: Json<ContentSnapshot>,
    remote_key: BearerAuth,
) -> Result<HttpResponse, FolioError> {
    check_auth(remote_key.token(), &data.settings.passkey_path.value)?;
    let snapshot = stamp(snapshot.into_inner());
    let revision = snapshot.revision;
    data.replace(snapshot)?;
    info!("Accepted snapshot {}", revision);
    Ok(HttpResponse::Ok().body(format!("Accepted snapshot {}", revision)))
}

async fn refresh_handler(
    data: web::Data<AppState>,
    remote_key: BearerAuth,
) -> Result<HttpResponse, FolioError> {
    check_auth(remote_key.token(), &data.settings.passkey_path.value)?;
    let snapshot = load_from_cdn(&data.settings.remote_url.value).await.map_err(|error| {
        warn!("Snapshot refresh failed: {}", error);
        error
    })?;
    let revision = snapshot.revision;
    data.replace(snapshot)?;
    Ok(HttpResponse::Ok().body(format!("Refreshed snapshot {}", revision)))
}
