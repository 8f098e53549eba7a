use crate::{
    api::{student, teacher},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/student")
                    .service(
                        web::resource("/profile").route(web::get().to(student::profile)),
                    )
                    // /student/attendance
                    .service(
                        web::resource("/attendance")
                            .route(web::get().to(student::attendance_summaries)),
                    )
                    // /student/attendance/{subject_id}
                    .service(
                        web::resource("/attendance/{subject_id}")
                            .route(web::get().to(student::subject_attendance)),
                    )
                    .service(
                        web::resource("/courses").route(web::get().to(student::list_courses)),
                    )
                    .service(
                        web::resource("/courses/enroll")
                            .route(web::post().to(student::enroll_course)),
                    ),
            )
            .service(
                web::scope("/teacher")
                    .service(web::resource("/classes").route(web::get().to(teacher::classes)))
                    .service(web::resource("/students").route(web::get().to(teacher::students)))
                    // /teacher/subjects
                    .service(
                        web::resource("/subjects").route(web::get().to(teacher::subjects)),
                    )
                    .service(
                        web::resource("/subjects/enrolled")
                            .route(web::get().to(teacher::enrolled_subjects)),
                    )
                    .service(
                        web::resource("/subjects/enroll")
                            .route(web::post().to(teacher::enroll_subject)),
                    )
                    // /teacher/subjects/{subject_id}/attendance?date=ISO8601
                    .service(
                        web::resource("/subjects/{subject_id}/attendance")
                            .route(web::get().to(teacher::subject_attendance)),
                    )
                    .service(
                        web::resource("/attendance")
                            .route(web::post().to(teacher::record_attendance)),
                    ),
            ),
    );
}
