use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{records, search, site, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    // JSON API.
    let api_routes = Router::new()
        .route("/api/search", get(search::search))
        .route("/api/suggest", get(search::suggest))
        .route("/api/tests/{id}", get(records::get_record));

    // Server rendered site.
    let site_routes = Router::new()
        .route("/", get(site::index))
        .route("/search", get(site::search))
        .route("/suggest", get(site::suggestions))
        .route("/test/{id}", get(site::details));

    Router::new()
        .merge(api_routes)
        .merge(site_routes)
        .fallback(site::not_found)
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        handlers::Consts,
        init,
        manager::Manager,
        models::Record,
    };

    fn router_with(records: Vec<Record>) -> Router {
        let ctx = Arc::new(Ctx {
            mgr: Arc::new(Manager::new(records)),
            tpl: Arc::new(init::init_templates().unwrap()),
            consts: Consts::default(),
            version: "test".to_string(),
        });
        init_handlers(ctx)
    }

    fn router() -> Router {
        let mut cbc = Record {
            id: "cbc".to_string(),
            name: "CBC".to_string(),
            synonyms: "Hemoglobin Panel|Full Blood Count".to_string(),
            ..Default::default()
        };
        cbc.purpose = Some("Screens for <anaemia>".to_string());

        let records = vec![
            Record {
                id: "hemoglobin".to_string(),
                name: "Hemoglobin".to_string(),
                biomarker: Some("Hb".to_string()),
                ..Default::default()
            },
            Record {
                id: "hematocrit".to_string(),
                name: "Hematocrit".to_string(),
                ..Default::default()
            },
            cbc,
        ];
        router_with(records)
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        get_from(router(), uri).await
    }

    async fn get_from(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get(uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn api_search_returns_tiers() {
        let (status, v) = get_json("/api/search?q=Hemoglobin").await;
        assert_eq!(status, StatusCode::OK);

        let data = &v["data"];
        assert_eq!(data["total"], 2);
        assert_eq!(data["results"][0]["tier"], 0);
        assert_eq!(data["results"][0]["record"]["id"], "hemoglobin");
        assert_eq!(data["results"][1]["tier"], 3);
        assert_eq!(data["results"][1]["record"]["id"], "cbc");
    }

    #[tokio::test]
    async fn api_search_empty_query() {
        let (status, v) = get_json("/api/search").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["data"]["total"], 0);
        assert_eq!(v["data"]["results"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn api_suggest_tags_reasons() {
        let (status, v) = get_json("/api/suggest?q=hem").await;
        assert_eq!(status, StatusCode::OK);

        let got: Vec<(String, String)> = v["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| {
                (
                    s["record"]["name"].as_str().unwrap().to_string(),
                    s["reason"].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            got,
            vec![
                ("Hemoglobin".to_string(), "name".to_string()),
                ("Hematocrit".to_string(), "name".to_string()),
                ("CBC".to_string(), "synonym".to_string()),
            ]
        );

        let (_, v) = get_json("/api/suggest?q=hem&max=1").await;
        assert_eq!(v["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn api_get_record() {
        let (status, v) = get_json("/api/tests/cbc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["data"]["name"], "CBC");

        let (status, v) = get_json("/api/tests/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(v["message"], "test not found");
        assert!(v["data"].is_null());
    }

    #[tokio::test]
    async fn results_page() {
        let (status, body) = get("/search?q=hem").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("3 result(s) for"));
        assert!(body.contains("/test/hemoglobin?q=hem"));
        // Snippet falls back to the biomarker.
        assert!(body.contains("<p>Hb</p>"));

        let (_, body) = get("/search?q=zzz").await;
        assert!(body.contains("No results found for"));
    }

    #[tokio::test]
    async fn card_links_survive_slashes_in_ids() {
        let records = vec![Record {
            id: "chem/na".to_string(),
            name: "Sodium".to_string(),
            ..Default::default()
        }];

        let (_, body) = get_from(router_with(records.clone()), "/search?q=sod").await;
        let href = "/test/chem%2Fna?q=sod";
        assert!(body.contains(href));

        let (status, body) = get_from(router_with(records), href).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Sodium</h1>"));
    }

    #[tokio::test]
    async fn details_page() {
        let (status, body) = get("/test/cbc?q=hem").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>CBC</h1>"));
        assert!(body.contains("Screens for &lt;anaemia&gt;"));
        assert!(body.contains("Not provided."));
        assert!(body.contains("Hemoglobin Panel, Full Blood Count"));
        assert!(body.contains("/search?q=hem"));

        let (_, body) = get("/test/hematocrit").await;
        assert!(body.contains("None listed."));
        assert!(!body.contains("Back to results"));
    }

    #[tokio::test]
    async fn unknown_test_renders_error() {
        let (status, body) = get("/test/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("That test record was not found in the dataset."));

        let (status, _) = get("/no/such/page").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn suggestion_fragment() {
        let (status, body) = get("/suggest?q=full").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("CBC"));
        assert!(body.contains("Synonym"));

        let (_, body) = get("/suggest?q=").await;
        assert!(!body.contains("suggestion-item"));
    }

    #[tokio::test]
    async fn home_page() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("name=\"q\""));
        assert!(body.contains("3 tests"));
    }
}
