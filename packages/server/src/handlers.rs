//! HTTP handler functions for the earthquake map.

use actix_web::{HttpResponse, web};
use quake_map_server_models::{ApiHealth, ApiUnavailable};

use crate::AppState;

/// `GET /`
///
/// Returns the rendered map page once the map is built.
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    state.map.get().map_or_else(unavailable, |built| {
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(built.page.clone())
    })
}

/// `GET /api/view`
///
/// Returns the composed map view model.
pub async fn view(state: web::Data<AppState>) -> HttpResponse {
    state
        .map
        .get()
        .map_or_else(unavailable, |built| HttpResponse::Ok().json(&built.view))
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let phase = state.map.phase();

    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        built: state.map.is_built(),
        phase: phase.to_string(),
    })
}

fn unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ApiUnavailable {
        message: "Earthquake data has not been loaded yet".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use quake_map_map::compose;
    use quake_map_quake_models::{Coordinates, FeatureRecord};
    use quake_map_server_models::ApiHealth;
    use quake_map_transform::transform;

    use crate::{AppState, configure};

    fn built_state() -> web::Data<AppState> {
        let state = web::Data::new(AppState::default());
        let records = vec![FeatureRecord {
            id: Some("nc1".to_string()),
            place: "10km N of X".to_string(),
            time: 1_700_000_000_000,
            magnitude: 4.5,
            coordinates: Coordinates {
                longitude: -120.5,
                latitude: 38.0,
                depth_km: 25.0,
            },
        }];
        state
            .map
            .complete(compose(transform(&records), None))
            .unwrap();
        state
    }

    #[actix_web::test]
    async fn unbuilt_map_is_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::default()))
                .configure(configure),
        )
        .await;

        for uri in ["/", "/api/view"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        }
    }

    #[actix_web::test]
    async fn built_map_serves_page() {
        let app =
            test::init_service(App::new().app_data(built_state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let page = std::str::from_utf8(&body).unwrap();
        assert!(page.contains("10km N of X"));
        assert!(page.contains("leaflet"));
    }

    #[actix_web::test]
    async fn built_map_serves_view_model() {
        let app =
            test::init_service(App::new().app_data(built_state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/view").to_request();
        let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(view["viewport"]["zoom"], 5);
        assert_eq!(view["overlays"].as_array().unwrap().len(), 3);
        assert_eq!(view["overlays"][1]["layer"]["markers"][0]["radius"], 13.5);
        assert_eq!(view["legend"]["entries"][3]["label"], "50+ km");
    }

    #[actix_web::test]
    async fn health_reports_phase() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::default()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(health.healthy);
        assert!(!health.built);
        assert_eq!(health.phase, "unbuilt");

        let app =
            test::init_service(App::new().app_data(built_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(health.built);
        assert_eq!(health.phase, "built");
    }
}
