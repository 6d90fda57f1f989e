//! HTTP-level test suite shared by every storage backend.
//!
//! The `api_tests!` macro generates tests that drive the full router:
//! JSON → HTTP request → handler → store → HTTP response → JSON.
//!
//! `$store_factory` must produce a fresh, empty store implementing
//! `CompanyStore + InvoiceStore + IndustryStore`. It may contain `.await`.
//!
//! # Generated Tests
//!
//! - health checks
//! - company CRUD, slug derivation, nested invoices and industries
//! - invoice CRUD and every payment transition
//! - industry listing and company association
//! - 400 / 404 / 405 / 500 error bodies, including unmatched routes

/// Generate the API test suite for a storage backend.
#[macro_export]
macro_rules! api_tests {
    ($store_factory:expr) => {
        mod api_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use biztime::server::ServerBuilder;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let store = $store_factory;
                let router = ServerBuilder::new().with_store(store).build().unwrap();
                TestServer::new(router)
            }

            async fn create_company(server: &TestServer, code: &str, name: &str) {
                server
                    .post("/companies")
                    .json(&json!({
                        "code": code,
                        "name": name,
                        "description": format!("{} description", name),
                    }))
                    .await
                    .assert_status(StatusCode::CREATED);
            }

            async fn create_invoice(server: &TestServer, comp_code: &str, amt: f64) -> i64 {
                let response = server
                    .post("/invoices")
                    .json(&json!({ "comp_code": comp_code, "amt": amt }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                body["invoice"]["id"].as_i64().unwrap()
            }

            fn assert_error(body: &Value, status: u16) {
                assert_eq!(body["error"]["status"], status);
                assert!(body["error"]["message"].as_str().is_some());
            }

            // ==============================================================
            // Health
            // ==============================================================

            #[tokio::test]
            async fn test_health() {
                let server = make_server().await;
                let body: Value = server.get("/health").await.json();
                assert_eq!(body, json!({ "status": "ok", "service": "biztime" }));
            }

            // ==============================================================
            // Companies
            // ==============================================================

            #[tokio::test]
            async fn test_list_companies_empty() {
                let server = make_server().await;
                let response = server.get("/companies").await;
                response.assert_status_ok();
                response.assert_json(&json!({ "companies": [] }));
            }

            #[tokio::test]
            async fn test_create_then_get_company() {
                let server = make_server().await;
                let company = json!({
                    "code": "alpha",
                    "name": "Google",
                    "description": "Search engine and more"
                });

                let response = server.post("/companies").json(&company).await;
                response.assert_status(StatusCode::CREATED);
                response.assert_json(&json!({ "company": company }));

                let response = server.get("/companies/alpha").await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["company"], company);
                assert_eq!(body["invoices"], json!([]));
                assert_eq!(body["industries"], json!([]));
            }

            #[tokio::test]
            async fn test_list_companies_summary_ordered_by_code() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                create_company(&server, "apple", "Apple").await;

                let body: Value = server.get("/companies").await.json();
                assert_eq!(
                    body["companies"],
                    json!([
                        { "code": "apple", "name": "Apple" },
                        { "code": "ibm", "name": "IBM" }
                    ])
                );
            }

            #[tokio::test]
            async fn test_create_company_derives_code_from_name() {
                let server = make_server().await;
                let response = server
                    .post("/companies")
                    .json(&json!({ "name": "Acme Widgets, Inc.", "description": "" }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["company"]["code"], "acmewidgetsinc");
                assert_eq!(body["company"]["description"], "");

                server.get("/companies/acmewidgetsinc").await.assert_status_ok();
            }

            #[tokio::test]
            async fn test_create_company_missing_fields() {
                let server = make_server().await;
                let response = server
                    .post("/companies")
                    .json(&json!({ "code": "x" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_error(&body, 400);
                let message = body["error"]["message"].as_str().unwrap();
                assert!(message.contains("description"));
                assert!(message.contains("name"));

                server.get("/companies/x").await.assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_create_company_null_field_is_missing() {
                let server = make_server().await;
                let response = server
                    .post("/companies")
                    .json(&json!({ "code": "x", "name": null, "description": "d" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_create_company_unsluggable_name() {
                let server = make_server().await;
                let response = server
                    .post("/companies")
                    .json(&json!({ "name": "!!!", "description": "d" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400);
            }

            #[tokio::test]
            async fn test_create_company_malformed_body() {
                let server = make_server().await;
                let response = server
                    .post("/companies")
                    .text("{not json")
                    .content_type("application/json")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400);
            }

            #[tokio::test]
            async fn test_create_duplicate_company_is_server_error() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;

                let response = server
                    .post("/companies")
                    .json(&json!({ "code": "ibm", "name": "Other", "description": "d" }))
                    .await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                assert_error(&response.json(), 500);
            }

            #[tokio::test]
            async fn test_update_company() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;

                let response = server
                    .put("/companies/ibm")
                    .json(&json!({ "name": "Big Blue", "description": "Mainframes" }))
                    .await;
                response.assert_status_ok();
                response.assert_json(&json!({
                    "company": { "code": "ibm", "name": "Big Blue", "description": "Mainframes" }
                }));
            }

            #[tokio::test]
            async fn test_update_company_missing_field_leaves_row() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;

                let response = server
                    .put("/companies/ibm")
                    .json(&json!({ "name": "Big Blue" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = server.get("/companies/ibm").await.json();
                assert_eq!(body["company"]["name"], "IBM");
            }

            #[tokio::test]
            async fn test_update_unknown_company() {
                let server = make_server().await;
                let response = server
                    .put("/companies/nope")
                    .json(&json!({ "name": "n", "description": "d" }))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_error(&body, 404);

                server.get("/companies").await.assert_json(&json!({ "companies": [] }));
            }

            #[tokio::test]
            async fn test_get_unknown_company() {
                let server = make_server().await;
                let response = server.get("/companies/nope").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }

            #[tokio::test]
            async fn test_delete_company() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;

                let response = server.delete("/companies/ibm").await;
                response.assert_status_ok();
                response.assert_json(&json!({ "status": "deleted" }));

                server.get("/companies/ibm").await.assert_status(StatusCode::NOT_FOUND);
                server.delete("/companies/ibm").await.assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_delete_company_with_invoices_is_refused() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                create_invoice(&server, "ibm", 100.0).await;

                let response = server.delete("/companies/ibm").await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

                server.get("/companies/ibm").await.assert_status_ok();
            }

            #[tokio::test]
            async fn test_get_company_nests_invoices_and_industries() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let first = create_invoice(&server, "ibm", 100.0).await;
                let second = create_invoice(&server, "ibm", 200.0).await;

                for (code, name) in [("tech", "Technology"), ("acct", "Accounting")] {
                    server
                        .post("/industries")
                        .json(&json!({ "code": code, "industry": name }))
                        .await
                        .assert_status(StatusCode::CREATED);
                    server
                        .post(&format!("/industries/{}/companies", code))
                        .json(&json!({ "comp_code": "ibm" }))
                        .await
                        .assert_status(StatusCode::CREATED);
                }

                let body: Value = server.get("/companies/ibm").await.json();
                let invoices = body["invoices"].as_array().unwrap();
                assert_eq!(invoices.len(), 2);
                assert_eq!(invoices[0]["id"], first);
                assert_eq!(invoices[1]["id"], second);
                assert_eq!(invoices[1]["amt"], 200.0);
                assert_eq!(invoices[0]["paid"], false);
                assert!(invoices[0]["paid_date"].is_null());
                assert!(invoices[0].get("comp_code").is_none());
                assert_eq!(body["industries"], json!(["acct", "tech"]));
            }

            // ==============================================================
            // Invoices
            // ==============================================================

            #[tokio::test]
            async fn test_create_invoice_starts_unpaid() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;

                let response = server
                    .post("/invoices")
                    .json(&json!({ "comp_code": "ibm", "amt": 400 }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let invoice = response.json::<Value>()["invoice"].clone();
                assert_eq!(invoice["comp_code"], "ibm");
                assert_eq!(invoice["amt"], 400.0);
                assert_eq!(invoice["paid"], false);
                assert!(invoice["paid_date"].is_null());
                assert!(invoice["add_date"].as_str().is_some());
            }

            #[tokio::test]
            async fn test_create_invoice_with_zero_amount() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 0.0).await;

                let body: Value = server.get(&format!("/invoices/{}", id)).await.json();
                assert_eq!(body["invoice"]["amt"], 0.0);
            }

            #[tokio::test]
            async fn test_create_invoice_missing_amount() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;

                let response = server
                    .post("/invoices")
                    .json(&json!({ "comp_code": "ibm" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert!(body["error"]["message"].as_str().unwrap().contains("amt"));

                server.get("/invoices").await.assert_json(&json!({ "invoices": [] }));
            }

            #[tokio::test]
            async fn test_create_invoice_for_unknown_company() {
                let server = make_server().await;
                let response = server
                    .post("/invoices")
                    .json(&json!({ "comp_code": "ghost", "amt": 10 }))
                    .await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                assert_error(&response.json(), 500);
            }

            #[tokio::test]
            async fn test_list_invoices() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                create_company(&server, "apple", "Apple").await;
                let first = create_invoice(&server, "ibm", 1.0).await;
                let second = create_invoice(&server, "apple", 2.0).await;

                let body: Value = server.get("/invoices").await.json();
                assert_eq!(
                    body["invoices"],
                    json!([
                        { "id": first, "comp_code": "ibm" },
                        { "id": second, "comp_code": "apple" }
                    ])
                );
            }

            #[tokio::test]
            async fn test_get_invoice_nests_company() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;

                let response = server.get(&format!("/invoices/{}", id)).await;
                response.assert_status_ok();
                let invoice = response.json::<Value>()["invoice"].clone();
                assert_eq!(invoice["id"], id);
                assert_eq!(
                    invoice["company"],
                    json!({ "code": "ibm", "name": "IBM", "description": "IBM description" })
                );
                assert!(invoice.get("comp_code").is_none());
            }

            #[tokio::test]
            async fn test_get_unknown_invoice() {
                let server = make_server().await;
                let response = server.get("/invoices/9999").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }

            #[tokio::test]
            async fn test_non_numeric_invoice_id_is_not_found() {
                let server = make_server().await;
                server.get("/invoices/abc").await.assert_status(StatusCode::NOT_FOUND);
                server.delete("/invoices/abc").await.assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_pay_unpaid_invoice() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({ "amt": 456, "paid": true }))
                    .await;
                response.assert_status_ok();
                let invoice = response.json::<Value>()["invoice"].clone();
                assert_eq!(invoice["amt"], 456.0);
                assert_eq!(invoice["paid"], true);
                assert!(invoice["paid_date"].as_str().is_some());
            }

            #[tokio::test]
            async fn test_repaying_keeps_paid_date() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;
                let path = format!("/invoices/{}", id);

                let first: Value = server
                    .put(&path)
                    .json(&json!({ "amt": 100, "paid": true }))
                    .await
                    .json();
                let second: Value = server
                    .put(&path)
                    .json(&json!({ "amt": 300, "paid": true }))
                    .await
                    .json();

                assert_eq!(second["invoice"]["amt"], 300.0);
                assert_eq!(second["invoice"]["paid_date"], first["invoice"]["paid_date"]);
            }

            #[tokio::test]
            async fn test_unpaying_clears_paid_date() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;
                let path = format!("/invoices/{}", id);

                server
                    .put(&path)
                    .json(&json!({ "amt": 100, "paid": true }))
                    .await
                    .assert_status_ok();
                let response = server
                    .put(&path)
                    .json(&json!({ "amt": 100, "paid": false }))
                    .await;
                response.assert_status_ok();
                let invoice = response.json::<Value>()["invoice"].clone();
                assert_eq!(invoice["paid"], false);
                assert!(invoice["paid_date"].is_null());
            }

            #[tokio::test]
            async fn test_unpaid_update_only_changes_amount() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({ "amt": 50, "paid": false }))
                    .await;
                response.assert_status_ok();
                let invoice = response.json::<Value>()["invoice"].clone();
                assert_eq!(invoice["amt"], 50.0);
                assert_eq!(invoice["paid"], false);
                assert!(invoice["paid_date"].is_null());
            }

            #[tokio::test]
            async fn test_update_invoice_with_zero_amount() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({ "amt": 0, "paid": false }))
                    .await;
                response.assert_status_ok();
                let invoice = response.json::<Value>()["invoice"].clone();
                assert_eq!(invoice["amt"], 0.0);
                assert_eq!(invoice["paid"], false);

                let body: Value = server.get(&format!("/invoices/{}", id)).await.json();
                assert_eq!(body["invoice"]["amt"], 0.0);
            }

            #[tokio::test]
            async fn test_update_invoice_ignores_client_paid_date() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({ "amt": 100, "paid": false, "paid_date": "2020-01-01T00:00:00Z" }))
                    .await;
                response.assert_status_ok();
                assert!(response.json::<Value>()["invoice"]["paid_date"].is_null());
            }

            #[tokio::test]
            async fn test_update_invoice_missing_paid() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({ "amt": 456 }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400);

                let body: Value = server.get(&format!("/invoices/{}", id)).await.json();
                assert_eq!(body["invoice"]["amt"], 100.0);
            }

            #[tokio::test]
            async fn test_update_invoice_wrong_type() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({ "amt": 1, "paid": "yes" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_update_unknown_invoice() {
                let server = make_server().await;
                let response = server
                    .put("/invoices/9999")
                    .json(&json!({ "amt": 1, "paid": true }))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }

            #[tokio::test]
            async fn test_delete_invoice() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let id = create_invoice(&server, "ibm", 100.0).await;
                let path = format!("/invoices/{}", id);

                let response = server.delete(&path).await;
                response.assert_status_ok();
                response.assert_json(&json!({ "status": "deleted" }));

                server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
                server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Industries
            // ==============================================================

            #[tokio::test]
            async fn test_create_industry() {
                let server = make_server().await;
                let response = server
                    .post("/industries")
                    .json(&json!({ "code": "tech", "industry": "Technology" }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.assert_json(&json!({
                    "industry": { "code": "tech", "industry": "Technology" }
                }));
            }

            #[tokio::test]
            async fn test_create_industry_missing_name() {
                let server = make_server().await;
                let response = server
                    .post("/industries")
                    .json(&json!({ "code": "tech" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_list_industries_groups_companies() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                create_company(&server, "apple", "Apple").await;
                for (code, name) in [("tech", "Technology"), ("retail", "Retail")] {
                    server
                        .post("/industries")
                        .json(&json!({ "code": code, "industry": name }))
                        .await
                        .assert_status(StatusCode::CREATED);
                }
                for comp_code in ["ibm", "apple"] {
                    server
                        .post("/industries/tech/companies")
                        .json(&json!({ "comp_code": comp_code }))
                        .await
                        .assert_status(StatusCode::CREATED);
                }

                let response = server.get("/industries").await;
                response.assert_status_ok();
                response.assert_json(&json!({
                    "industries": [
                        { "code": "retail", "industry": "Retail", "companies": [] },
                        { "code": "tech", "industry": "Technology", "companies": ["apple", "ibm"] }
                    ]
                }));
            }

            #[tokio::test]
            async fn test_associate_company() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                server
                    .post("/industries")
                    .json(&json!({ "code": "tech", "industry": "Technology" }))
                    .await;

                let response = server
                    .post("/industries/tech/companies")
                    .json(&json!({ "comp_code": "ibm" }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.assert_json(&json!({
                    "created": { "comp_code": "ibm", "ind_code": "tech" }
                }));
            }

            #[tokio::test]
            async fn test_associate_missing_comp_code() {
                let server = make_server().await;
                let response = server
                    .post("/industries/tech/companies")
                    .json(&json!({}))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert!(body["error"]["message"].as_str().unwrap().contains("comp_code"));
            }

            #[tokio::test]
            async fn test_associate_unknown_industry() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;
                let response = server
                    .post("/industries/none/companies")
                    .json(&json!({ "comp_code": "ibm" }))
                    .await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            }

            // ==============================================================
            // Routing
            // ==============================================================

            #[tokio::test]
            async fn test_unknown_route_returns_json_404() {
                let server = make_server().await;
                let response = server.get("/nope").await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_error(&body, 404);
                assert_eq!(body["error"]["message"], "No route for GET /nope");
            }

            #[tokio::test]
            async fn test_wrong_method_returns_json_405() {
                let server = make_server().await;
                create_company(&server, "ibm", "IBM").await;

                let response = server.patch("/companies/ibm").await;
                response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
                let body: Value = response.json();
                assert_error(&body, 405);
                assert_eq!(body["error"]["message"], "Method PATCH not allowed on /companies/ibm");

                let response = server.delete("/industries").await;
                response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
                assert_error(&response.json(), 405);
            }
        }
    };
}
