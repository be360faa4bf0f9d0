use actix_web::web;
use crate::handlers::skills;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/skills")
            .service(
                web::resource("")
                    .route(web::get().to(skills::get_all_skills))
                    .route(web::post().to(skills::create_skill_category))
            )
            .service(
                web::resource("/{category_id}")
                    .route(web::put().to(skills::update_skill_category))
                    .route(web::delete().to(skills::delete_skill_category))
            )
    );
}
