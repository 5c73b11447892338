pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Swagger 문서에 Bearer 인증 스키마를 등록합니다.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::auth::handler::login,
        domain::auth::handler::refresh,
        domain::auth::handler::logout,
        domain::auth::handler::me,
        domain::member::handler::create_member,
        domain::member::handler::list_members,
        domain::member::handler::list_members_paged,
        domain::member::handler::search_members,
        domain::member::handler::list_members_by_grade,
        domain::member::handler::get_member,
        domain::member::handler::get_member_stats,
        domain::member::handler::update_member,
        domain::member::handler::update_grade,
        domain::member::handler::update_password,
        domain::member::handler::delete_member,
        domain::member::handler::list_member_applications,
        domain::member::handler::list_member_activities,
        domain::location::handler::list_locations,
        domain::location::handler::create_location,
        domain::reservation::handler::create_reservation,
        domain::reservation::handler::list_reservations,
        domain::reservation::handler::list_available_reservations,
        domain::reservation::handler::get_reservation,
        domain::reservation::handler::update_reservation,
        domain::reservation::handler::delete_reservation,
        domain::reservation::handler::list_applicants,
        domain::application::handler::apply,
        domain::application::handler::cancel,
        domain::application::handler::update_status,
    ),
    components(
        schemas(
            domain::auth::dto::LoginRequest,
            domain::auth::dto::LoginResponse,
            domain::auth::dto::SuccessLoginResponse,
            domain::member::dto::MemberCreateRequest,
            domain::member::dto::MemberUpdateRequest,
            domain::member::dto::GradeUpdateRequest,
            domain::member::dto::PasswordUpdateRequest,
            domain::member::dto::MemberResponse,
            domain::member::dto::MemberStatsResponse,
            domain::member::dto::MemberSummary,
            domain::member::dto::ActivityLogResponse,
            domain::member::entity::activity_log::ActivityType,
            domain::member::entity::member::MemberGrade,
            domain::location::dto::LocationCreateRequest,
            domain::location::dto::LocationResponse,
            domain::location::dto::LocationSummary,
            domain::reservation::dto::ReservationCreateRequest,
            domain::reservation::dto::LocationInfo,
            domain::reservation::dto::ReservationResponse,
            domain::reservation::dto::ReservationSummary,
            domain::reservation::dto::ApplicantResponse,
            domain::application::dto::ApplicationCreateRequest,
            domain::application::dto::StatusUpdateRequest,
            domain::application::dto::ReservationSnapshot,
            domain::application::dto::ApplicationApplyResponse,
            domain::application::dto::ApplicationResponse,
            domain::application::entity::application::ApplicationStatus,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "인증 관련 API"),
        (name = "Member", description = "회원 관련 API"),
        (name = "Location", description = "장소 관련 API"),
        (name = "Reservation", description = "예약 관련 API"),
        (name = "Application", description = "예약 신청 관련 API")
    )
)]
pub struct ApiDoc;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "OK" }))
        .route("/api/v1/auth/login", post(domain::auth::handler::login))
        .route("/api/v1/auth/refresh", post(domain::auth::handler::refresh))
        .route("/api/v1/auth/logout", post(domain::auth::handler::logout))
        .route("/api/v1/auth/me", get(domain::auth::handler::me))
        .route(
            "/api/v1/members",
            post(domain::member::handler::create_member).get(domain::member::handler::list_members),
        )
        .route(
            "/api/v1/members/paged",
            get(domain::member::handler::list_members_paged),
        )
        .route(
            "/api/v1/members/search",
            get(domain::member::handler::search_members),
        )
        .route(
            "/api/v1/members/grade/:grade",
            get(domain::member::handler::list_members_by_grade),
        )
        .route(
            "/api/v1/members/:id",
            get(domain::member::handler::get_member)
                .put(domain::member::handler::update_member)
                .delete(domain::member::handler::delete_member),
        )
        .route(
            "/api/v1/members/:id/grade",
            put(domain::member::handler::update_grade),
        )
        .route(
            "/api/v1/members/:id/password",
            put(domain::member::handler::update_password),
        )
        .route(
            "/api/v1/members/:id/stats",
            get(domain::member::handler::get_member_stats),
        )
        .route(
            "/api/v1/members/:id/applications",
            get(domain::member::handler::list_member_applications),
        )
        .route(
            "/api/v1/members/:id/activities",
            get(domain::member::handler::list_member_activities),
        )
        .route(
            "/api/v1/locations",
            get(domain::location::handler::list_locations)
                .post(domain::location::handler::create_location),
        )
        .route(
            "/api/v1/reservations",
            post(domain::reservation::handler::create_reservation)
                .get(domain::reservation::handler::list_reservations),
        )
        .route(
            "/api/v1/reservations/available",
            get(domain::reservation::handler::list_available_reservations),
        )
        .route(
            "/api/v1/reservations/:id",
            get(domain::reservation::handler::get_reservation)
                .put(domain::reservation::handler::update_reservation)
                .delete(domain::reservation::handler::delete_reservation),
        )
        .route(
            "/api/v1/reservations/:id/applicants",
            get(domain::reservation::handler::list_applicants),
        )
        .route("/api/v1/applications", post(domain::application::handler::apply))
        .route(
            "/api/v1/applications/:id",
            delete(domain::application::handler::cancel),
        )
        .route(
            "/api/v1/applications/:id/status",
            put(domain::application::handler::update_status),
        )
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
