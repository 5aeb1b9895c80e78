use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::future::Future;
use std::time::Instant;

use super::error::ApiError;
use super::schema::Schema;
use super::AppState;
use crate::domain::customer::{CustomerError, CustomerInput};

/// Body schema checked before `POST /customer` reaches the service
const CUSTOMER_SCHEMA: &str = "customer";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/customer", web::post().to(create_customer))
        .route("/customers", web::get().to(list_customers))
        .route("/customer/{cpf}", web::get().to(get_customer_by_cpf));
}

/// Raw query parameters. Kept as text so non-numeric values can fall back
/// to the configured defaults instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
}

/// Run a service call and record its outcome
async fn observed<T, F>(state: &AppState, operation: &str, call: F) -> Result<T, CustomerError>
where
    F: Future<Output = Result<T, CustomerError>>,
{
    let started = Instant::now();
    let result = call.await;
    state
        .metrics
        .record_operation(operation, started.elapsed(), result.as_ref().err());
    result
}

async fn create_customer(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let schema = Schema::from_name(CUSTOMER_SCHEMA).ok_or_else(|| {
        CustomerError::Repository(anyhow::anyhow!("no request schema named {CUSTOMER_SCHEMA}"))
    })?;

    let body = body.into_inner();
    schema.validate(&body).map_err(ApiError::Schema)?;

    let input: CustomerInput = serde_json::from_value(body)
        .map_err(|e| ApiError::Schema(vec![e.to_string()]))?;

    observed(&state, "create", state.service.create(input)).await?;

    Ok(HttpResponse::Created().body("Customer successfully created."))
}

async fn list_customers(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let (page, limit) = state
        .pagination
        .resolve(query.page.as_deref(), query.limit.as_deref());

    let customers = observed(&state, "list", state.service.list_all(page, limit)).await?;

    Ok(HttpResponse::Ok().json(customers))
}

async fn get_customer_by_cpf(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let cpf = path.into_inner();
    let customers = observed(&state, "get_by_cpf", state.service.get_by_cpf(&cpf)).await?;

    Ok(HttpResponse::Ok().json(customers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::StoredCustomer;
    use crate::http::configure as configure_app;
    use crate::metrics::Metrics;
    use crate::settings::PaginationDefaults;
    use crate::store::InMemoryCustomerRepository;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(
            Arc::new(InMemoryCustomerRepository::new()),
            Arc::new(Metrics::new().unwrap()),
            PaginationDefaults::default(),
        )
    }

    fn customer_body(cpf: &str) -> serde_json::Value {
        json!({ "name": "Jon Doe", "cpf": cpf, "birth_date": "27/08/1990" })
    }

    fn post_customer(body: serde_json::Value) -> test::TestRequest {
        test::TestRequest::post().uri("/customer").set_json(body)
    }

    fn get(uri: &str) -> test::TestRequest {
        test::TestRequest::get().uri(uri)
    }

    #[actix_web::test]
    async fn test_create_customer_then_conflict() {
        let app = test::init_service(App::new().configure(configure_app(state()))).await;

        let resp = test::call_service(&app, post_customer(customer_body("584.135.560-07")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(&app, post_customer(customer_body("58413556007")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = test::read_body(resp).await;
        assert_eq!(body, "Customer already registered");
    }

    #[actix_web::test]
    async fn test_create_customer_body_text() {
        let app = test::init_service(App::new().configure(configure_app(state()))).await;

        let body = test::call_and_read_body(&app, post_customer(customer_body("29332098026")).to_request()).await;
        assert_eq!(body, "Customer successfully created.");
    }

    #[actix_web::test]
    async fn test_wrong_body_lists_every_violation() {
        let app = test::init_service(App::new().configure(configure_app(state()))).await;

        let req = post_customer(json!({ "xyz": "abc", "qwe": "rty" })).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
        // three missing fields, two unknown keys
        assert_eq!(body["message"].as_array().unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn test_create_rejections_are_unprocessable() {
        let app = test::init_service(App::new().configure(configure_app(state()))).await;

        let mut future_birth = customer_body("17408935061");
        future_birth["birth_date"] = json!("25/09/2999");
        let mut letters_birth = customer_body("17408935061");
        letters_birth["birth_date"] = json!("abcdefghij");

        let bodies = [
            customer_body("abcdefgh"),    // pattern mismatch
            customer_body("47717718069"), // first check digit
            customer_body("47476204008"), // second check digit
            letters_birth,
            future_birth,
        ];

        for body in bodies {
            let resp = test::call_service(&app, post_customer(body.clone()).to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        }
    }

    #[actix_web::test]
    async fn test_invalid_json_is_unprocessable() {
        let app = test::init_service(App::new().configure(configure_app(state()))).await;

        let req = test::TestRequest::post()
            .uri("/customer")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_get_by_cpf() {
        let app = test::init_service(App::new().configure(configure_app(state()))).await;
        test::call_service(&app, post_customer(customer_body("293.320.980-26")).to_request()).await;

        let found: Vec<StoredCustomer> =
            test::call_and_read_body_json(&app, get("/customer/29332098026").to_request()).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cpf, "29332098026");
        assert_eq!(found[0].name, "Jon Doe");

        let resp = test::call_service(&app, get("/customer/17408935061").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(resp).await, "This customer was not found");

        let resp = test::call_service(&app, get("/customer/notacpf").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_list_customers() {
        let app = test::init_service(App::new().configure(configure_app(state()))).await;

        let resp = test::call_service(&app, get("/customers").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        for cpf in ["29332098026", "17408935061", "57567244004"] {
            test::call_service(&app, post_customer(customer_body(cpf)).to_request()).await;
        }

        let page: Vec<StoredCustomer> =
            test::call_and_read_body_json(&app, get("/customers?page=2&limit=2").to_request()).await;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].cpf, "57567244004");

        // defaults: page 1, limit 10
        let all: Vec<StoredCustomer> =
            test::call_and_read_body_json(&app, get("/customers?page=abc&limit=xyz").to_request()).await;
        assert_eq!(all.len(), 3);

        let resp = test::call_service(&app, get("/customers?page=1&limit=900000").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, get("/customers?page=900&limit=3").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_list_negative_parameters() {
        let app = test::init_service(App::new().configure(configure_app(state()))).await;

        let cases = [
            ("/customers?page=-2&limit=-7", "Invalid parameters"),
            ("/customers?page=-5&limit=9", "Invalid page"),
            ("/customers?page=3&limit=-4", "Invalid limit"),
        ];

        for (uri, message) in cases {
            let resp = test::call_service(&app, get(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert_eq!(test::read_body(resp).await, message);
        }
    }

    #[actix_web::test]
    async fn test_operations_are_recorded() {
        let state = state();
        let metrics = state.metrics.clone();
        let app = test::init_service(App::new().configure(configure_app(state))).await;

        test::call_service(&app, post_customer(customer_body("29332098026")).to_request()).await;
        test::call_service(&app, post_customer(customer_body("29332098026")).to_request()).await;

        let gathered = metrics.registry().gather();
        let totals = gathered.iter().find(|m| m.name() == "customer_operations_total").unwrap();
        assert_eq!(totals.metric.len(), 2); // create/success and create/rejected
    }
}
