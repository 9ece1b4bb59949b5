use crate::{
    api::{absence, attendance, profile, report},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let register_limiter = build_limiter(config.rate_register_per_min);
    let refresh_limiter = build_limiter(config.rate_refresh_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(Governor::new(&register_limiter))
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(Governor::new(&refresh_limiter))
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(&protected_limiter)) // rate limiting
            .service(handlers::protected)
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(web::resource("").route(web::get().to(attendance::list_attendance)))
                    // /attendance/status
                    .service(web::resource("/status").route(web::get().to(attendance::my_status)))
                    // /attendance/check-in
                    .service(web::resource("/check-in").route(web::post().to(attendance::check_in)))
                    // /attendance/check-out
                    .service(
                        web::resource("/check-out").route(web::put().to(attendance::check_out)),
                    ),
            )
            .service(
                web::scope("/absence")
                    // /absence
                    .service(
                        web::resource("")
                            .route(web::get().to(absence::absence_list))
                            .route(web::post().to(absence::create_absence)),
                    )
                    // /absence/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(absence::get_absence))
                            .route(web::delete().to(absence::delete_absence)),
                    )
                    // /absence/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(absence::approve_absence)),
                    )
                    // /absence/{id}/reject
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(absence::reject_absence)),
                    )
                    // /absence/{id}/revert
                    .service(
                        web::resource("/{id}/revert").route(web::put().to(absence::revert_absence)),
                    ),
            )
            .service(
                web::scope("/report")
                    // /report/summary
                    .service(web::resource("/summary").route(web::get().to(report::summary_report)))
                    // /report/raw
                    .service(web::resource("/raw").route(web::get().to(report::raw_report))),
            )
            .service(
                web::scope("/profile")
                    // /profile
                    .service(web::resource("").route(web::get().to(profile::list_profiles)))
                    // /profile/me
                    .service(web::resource("/me").route(web::get().to(profile::me))),
            ),
    );
}
