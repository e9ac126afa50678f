use crate::config::Config;
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::Scope as ActixScope;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use addonhub_core::handler::addons::{list_addons, search_addons, AddonIndex};
use addonhub_core::handler::pagination::PageNumberPagination;
use thiserror::Error;

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum CorsOptions {
    Permissive,
    Custom(Vec<String>, usize),
}

impl CorsOptions {
    pub fn from_origins(origins: &[String]) -> Self {
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsOptions::Permissive
        } else {
            CorsOptions::Custom(origins.to_vec(), 3600)
        }
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Actix(#[from] std::io::Error),
}

#[derive(Clone, Debug)]
pub struct ApiServer {
    config: Config,
    index: AddonIndex,
}

impl ApiServer {
    pub fn new(config: Config, index: AddonIndex) -> Self {
        Self { config, index }
    }

    pub fn print_useful_info(&self) {
        println!("\n🌐 AddonHub gateway starting up:");
        println!(
            "   🚀 HTTP server ready at: \x1b[36mhttp://{}:{}\x1b[0m",
            self.config.http.host, self.config.http.port
        );
        println!("   📦 Add-ons indexed: {}", self.index.len());
        println!(
            "   📄 Page size: {} (max {}), result window: {}",
            self.config.pagination.page_size,
            self.config.pagination.max_page_size,
            self.config.pagination.paginator.result_window
        );

        println!("\n⚡Quick Start ⚡");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        println!(
            "\x1b[33mcurl \x1b[36m'http://{}:{}/v1/addons/search/?q=tab&page_size=5'\x1b[0m",
            self.config.http.host, self.config.http.port
        );
        println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!();
    }

    pub fn start(&self) -> Result<Server, ServerError> {
        let index = Data::new(self.index.clone());
        let pagination = Data::new(self.config.pagination.clone());
        let cors_options = CorsOptions::from_origins(&self.config.http.cors_allowed_origins);

        let server = HttpServer::new(move || {
            let cors = Self::get_cors(cors_options.clone());
            Self::create_app_entry(cors, index.clone(), pagination.clone())
        })
        .bind((self.config.http.host.as_str(), self.config.http.port))?
        .run();

        Ok(server)
    }

    fn create_app_entry(
        cors: Cors,
        index: Data<AddonIndex>,
        pagination: Data<PageNumberPagination>,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Response = ServiceResponse<impl MessageBody>,
            Config = (),
            InitError = (),
            Error = actix_web::Error,
        >,
    > {
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(index)
            .app_data(pagination)
            .route("/health", web::get().to(health))
            .service(Self::attach_search_routes(web::scope("/v1")))
    }

    fn get_cors(cors: CorsOptions) -> Cors {
        match cors {
            CorsOptions::Permissive => Cors::permissive(),
            CorsOptions::Custom(origins, max_age) => origins
                .into_iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(&origin))
                .allowed_methods(vec!["GET"])
                .max_age(max_age),
        }
    }

    fn attach_search_routes(scope: ActixScope) -> ActixScope {
        scope
            .route("/addons/", web::get().to(list_addons))
            .route("/addons/search/", web::get().to(search_addons))
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
