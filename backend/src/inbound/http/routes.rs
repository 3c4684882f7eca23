//! Route table for the JSON API.
//!
//! Shared by the server binary and the integration tests so both mount the
//! same handlers with the same extractor configuration.

use actix_web::web;

use super::error::{json_error_handler, path_error_handler};
use super::{adoptions, mocks, pets, sessions, users};

/// Largest accepted request body, covering multipart uploads.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Mount every `/api` handler and the extractor error handlers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use adoptme::inbound::http::routes::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .service(
            web::scope("/api")
                .service(users::list_users)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user)
                .service(users::upload_documents)
                .service(pets::list_pets)
                .service(pets::create_pet)
                .service(pets::create_pet_with_image)
                .service(pets::get_pet)
                .service(pets::update_pet)
                .service(pets::delete_pet)
                .service(adoptions::list_adoptions)
                .service(adoptions::get_adoption)
                .service(adoptions::adopt_pet)
                .service(sessions::register)
                .service(sessions::login)
                .service(sessions::current)
                .service(sessions::logout)
                .service(mocks::mocking_pets)
                .service(mocks::mocking_users)
                .service(mocks::generate_data),
        );
}
