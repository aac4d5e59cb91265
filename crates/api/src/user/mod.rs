mod create_user;
mod set_user_language;

use actix_web::web;
use create_user::create_user_controller;
use set_user_language::set_user_language_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user", web::post().to(create_user_controller));
    cfg.route(
        "/user/{user_id}/language",
        web::put().to(set_user_language_controller),
    );
}
