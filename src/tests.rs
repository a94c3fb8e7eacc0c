#[cfg(test)]
mod integration_tests {
    use crate::config::AppConfig;
    use crate::handlers::realtime::stream_changes;
    use crate::router::create_router;
    use crate::schemas::{ApiResponse, ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{
        at, day, forecast_entry, insert_ingredient, insert_menu_item, insert_order, insert_student,
        setup_test_app, setup_test_app_state, setup_test_app_state_with, test_config, StubForecast,
        StubText,
    };
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum_test::TestServer;
    use common::{
        ChangeKind, CreateIngredientRequest, CreateMenuItemRequest, CreateOrderRequest,
        CreateStudentRequest, DashboardSummary, ForecastView, IngredientDto, IngredientLinkRequest,
        MenuItemDto, OrderDto, OrderStatus, OverviewSummary, StudentDto, SuggestionSet, Table,
        UpdateIngredientRequest, UpdateMenuItemRequest,
    };
    use compute::suggestions::SUGGESTION_FALLBACK;
    use futures::StreamExt;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn menu_request(item: &str, price: i64, ingredients: Vec<IngredientLinkRequest>) -> CreateMenuItemRequest {
        CreateMenuItemRequest {
            item: item.to_string(),
            price: Decimal::new(price, 0),
            availability: None,
            category: "Lunch".to_string(),
            nutritional_info: None,
            daily_demand: Some(40),
            image_url: None,
            ingredients,
        }
    }

    fn ingredient_request(name: &str, quantity: i64, reorder_level: i64) -> CreateIngredientRequest {
        CreateIngredientRequest {
            name: name.to_string(),
            quantity: Decimal::new(quantity, 0),
            reorder_level: Decimal::new(reorder_level, 0),
            expiry_date: None,
            cost_per_unit: Decimal::new(40, 0),
            unit: Some("kg".to_string()),
            remaining: None,
        }
    }

    fn order_request(menu_id: i32, quantity: i32) -> CreateOrderRequest {
        CreateOrderRequest {
            menu_id,
            student_id: None,
            quantity,
            amount: None,
            status: None,
            payment_method: Some("upi".to_string()),
            expected_time: None,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn test_create_menu_item_with_ingredients() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let rice: ApiResponse<IngredientDto> = server
            .post("/api/v1/ingredients")
            .json(&ingredient_request("Rice", 20, 5))
            .await
            .json();
        let dal: ApiResponse<IngredientDto> = server
            .post("/api/v1/ingredients")
            .json(&ingredient_request("Dal", 10, 2))
            .await
            .json();

        let request = menu_request(
            "Dal Rice",
            60,
            vec![
                IngredientLinkRequest { ingredient_id: rice.data.id, quantity: Decimal::new(2, 1) },
                IngredientLinkRequest { ingredient_id: dal.data.id, quantity: Decimal::new(1, 1) },
            ],
        );
        let response = server.post("/api/v1/menu").json(&request).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<MenuItemDto> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Menu item created successfully");
        assert_eq!(body.data.item, "Dal Rice");
        assert!(body.data.availability);
        assert_eq!(body.data.sold_today, 0);
        let names: Vec<_> = body
            .data
            .ingredients
            .iter()
            .map(|link| link.ingredient_name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["Rice", "Dal"]);
        assert_eq!(body.data.ingredients[0].quantity, Decimal::new(2, 1));
    }

    #[tokio::test]
    async fn test_menu_link_quantity_must_be_positive() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let request = menu_request(
            "Poha",
            25,
            vec![IngredientLinkRequest { ingredient_id: 1, quantity: Decimal::ZERO }],
        );
        let response = server.post("/api/v1/menu").json(&request).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let menu: ApiResponse<Vec<MenuItemDto>> = server.get("/api/v1/menu").await.json();
        assert!(menu.data.is_empty());
    }

    #[tokio::test]
    async fn test_menu_item_kept_when_ingredient_link_fails() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let rice: ApiResponse<IngredientDto> = server
            .post("/api/v1/ingredients")
            .json(&ingredient_request("Rice", 20, 5))
            .await
            .json();
        let request = menu_request(
            "Veg Pulao",
            70,
            vec![
                IngredientLinkRequest { ingredient_id: rice.data.id, quantity: Decimal::ONE },
                IngredientLinkRequest { ingredient_id: 999, quantity: Decimal::ONE },
            ],
        );
        let response = server.post("/api/v1/menu").json(&request).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<MenuItemDto> = response.json();
        assert!(body.message.contains("1 of 2 ingredient links failed"));
        assert_eq!(body.data.ingredients.len(), 1);
        assert_eq!(body.data.ingredients[0].ingredient_id, rice.data.id);

        let menu: ApiResponse<Vec<MenuItemDto>> = server.get("/api/v1/menu").await.json();
        assert_eq!(menu.data.len(), 1);
    }

    #[tokio::test]
    async fn test_menu_listed_newest_first() {
        let state = setup_test_app_state().await;
        insert_menu_item(&state.db, "Idli", 30, 0, "Breakfast", at(day(1), 8)).await;
        insert_menu_item(&state.db, "Thali", 90, 0, "Lunch", at(day(3), 8)).await;
        insert_menu_item(&state.db, "Samosa", 15, 0, "Snacks", at(day(2), 8)).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.get("/api/v1/menu").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<MenuItemDto>> = response.json();
        let names: Vec<_> = body.data.iter().map(|item| item.item.as_str()).collect();
        assert_eq!(names, vec!["Thali", "Samosa", "Idli"]);
    }

    #[tokio::test]
    async fn test_update_menu_item() {
        let server = TestServer::new(setup_test_app().await).unwrap();
        let created: ApiResponse<MenuItemDto> = server
            .post("/api/v1/menu")
            .json(&menu_request("Upma", 30, vec![]))
            .await
            .json();

        let patch = UpdateMenuItemRequest {
            price: Some(Decimal::new(35, 0)),
            availability: Some(false),
            sold_today: Some(12),
            ..Default::default()
        };
        let response = server
            .put(&format!("/api/v1/menu/{}", created.data.id))
            .json(&patch)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<MenuItemDto> = response.json();
        assert_eq!(body.data.item, "Upma");
        assert_eq!(body.data.price, Decimal::new(35, 0));
        assert!(!body.data.availability);
        assert_eq!(body.data.sold_today, 12);
    }

    #[tokio::test]
    async fn test_update_missing_menu_item_returns_not_found() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server
            .put("/api/v1/menu/404")
            .json(&UpdateMenuItemRequest::default())
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "MENU_ITEM_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_ingredient_stock_flags() {
        let state = setup_test_app_state().await;
        insert_ingredient(&state.db, "Milk", 10, 2, Some(day(9))).await;
        insert_ingredient(&state.db, "Flour", 3, 5, Some(day(20))).await;
        insert_ingredient(&state.db, "Salt", 8, 1, None).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/api/v1/ingredients")
            .add_query_param("today", "2025-03-10")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<IngredientDto>> = response.json();
        let names: Vec<_> = body.data.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Flour", "Salt"]);
        assert!(body.data[0].expired);
        assert!(!body.data[0].low_stock);
        assert!(body.data[1].low_stock);
        assert!(!body.data[1].expired);
        assert!(!body.data[2].low_stock && !body.data[2].expired);
    }

    #[tokio::test]
    async fn test_remaining_derived_from_sales() {
        let server = TestServer::new(setup_test_app().await).unwrap();
        let rice: ApiResponse<IngredientDto> = server
            .post("/api/v1/ingredients")
            .json(&ingredient_request("Rice", 10, 4))
            .await
            .json();
        let menu: ApiResponse<MenuItemDto> = server
            .post("/api/v1/menu")
            .json(&menu_request(
                "Jeera Rice",
                50,
                vec![IngredientLinkRequest { ingredient_id: rice.data.id, quantity: Decimal::new(5, 1) }],
            ))
            .await
            .json();
        server
            .put(&format!("/api/v1/menu/{}", menu.data.id))
            .json(&UpdateMenuItemRequest { sold_today: Some(14), ..Default::default() })
            .await
            .assert_status(StatusCode::OK);

        let body: ApiResponse<Vec<IngredientDto>> = server.get("/api/v1/ingredients").await.json();

        // 10 - 14 * 0.5 = 3, below the reorder level of 4
        assert_eq!(body.data[0].remaining, Decimal::new(3, 0));
        assert!(body.data[0].low_stock);
    }

    #[tokio::test]
    async fn test_update_ingredient() {
        let server = TestServer::new(setup_test_app().await).unwrap();
        let created: ApiResponse<IngredientDto> = server
            .post("/api/v1/ingredients")
            .json(&ingredient_request("Oil", 5, 1))
            .await
            .json();

        let patch = UpdateIngredientRequest {
            remaining: Some(Decimal::ONE),
            ..Default::default()
        };
        let response = server
            .put(&format!("/api/v1/ingredients/{}", created.data.id))
            .json(&patch)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<IngredientDto> = response.json();
        assert_eq!(body.data.remaining, Decimal::ONE);
        assert!(body.data.low_stock);

        let missing = server.put("/api/v1/ingredients/77").json(&patch).await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let error: ErrorResponse = missing.json();
        assert_eq!(error.code, "INGREDIENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_negative_ingredient_quantity_rejected() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server
            .post("/api/v1/ingredients")
            .json(&ingredient_request("Sugar", -1, 2))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_and_list_orders() {
        let state = setup_test_app_state().await;
        let thali = insert_menu_item(&state.db, "Thali", 80, 0, "Lunch", at(day(1), 8)).await;
        let student = insert_student(&state.db, "Asha").await;
        insert_order(&state.db, thali.id, 1, Some(Decimal::new(80, 0)), at(day(1), 12)).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let mut request = order_request(thali.id, 2);
        request.student_id = Some(student.id);
        let response = server.post("/api/v1/orders").json(&request).await;

        response.assert_status(StatusCode::CREATED);
        let created: ApiResponse<OrderDto> = response.json();
        assert_eq!(created.data.status, OrderStatus::Pending);
        assert_eq!(created.data.amount, None);
        assert_eq!(created.data.total, Decimal::new(160, 0));
        assert_eq!(created.data.menu_item.as_deref(), Some("Thali"));
        assert_eq!(created.data.student_name.as_deref(), Some("Asha"));

        let list: ApiResponse<Vec<OrderDto>> = server.get("/api/v1/orders").await.json();
        assert_eq!(list.data.len(), 2);
        // Oldest first
        assert_eq!(list.data[0].total, Decimal::new(80, 0));
        assert_eq!(list.data[1].id, created.data.id);
    }

    #[tokio::test]
    async fn test_order_for_unknown_menu_item() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.post("/api/v1/orders").json(&order_request(42, 1)).await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "MENU_ITEM_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_order_quantity_must_be_positive() {
        let state = setup_test_app_state().await;
        let item = insert_menu_item(&state.db, "Tea", 10, 0, "Beverages", at(day(1), 8)).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.post("/api/v1/orders").json(&order_request(item.id, 0)).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_order_status_accepts_any_transition() {
        let state = setup_test_app_state().await;
        let item = insert_menu_item(&state.db, "Dosa", 40, 0, "Breakfast", at(day(1), 8)).await;
        let order = insert_order(&state.db, item.id, 1, None, at(day(1), 9)).await;
        let server = TestServer::new(create_router(state)).unwrap();
        let path = format!("/api/v1/orders/{}/status", order.id);

        for status in ["completed", "pending", "ready", "preparing", "ready"] {
            let response = server.put(&path).json(&json!({ "status": status })).await;
            response.assert_status(StatusCode::OK);
            let body: ApiResponse<OrderDto> = response.json();
            assert_eq!(body.data.status.as_str(), status);
        }
    }

    #[tokio::test]
    async fn test_order_status_rejects_unknown_value() {
        let state = setup_test_app_state().await;
        let item = insert_menu_item(&state.db, "Vada", 20, 0, "Snacks", at(day(1), 8)).await;
        let order = insert_order(&state.db, item.id, 1, None, at(day(1), 9)).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .put(&format!("/api/v1/orders/{}/status", order.id))
            .json(&json!({ "status": "cancelled" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_status_of_missing_order() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server
            .put("/api/v1/orders/9/status")
            .json(&json!({ "status": "ready" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "ORDER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_students() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let created = server
            .post("/api/v1/students")
            .json(&CreateStudentRequest { name: "Ravi".to_string() })
            .await;
        created.assert_status(StatusCode::CREATED);

        let empty = server
            .post("/api/v1/students")
            .json(&CreateStudentRequest { name: String::new() })
            .await;
        empty.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let list: ApiResponse<Vec<StudentDto>> = server.get("/api/v1/students").await.json();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].name, "Ravi");
    }

    #[tokio::test]
    async fn test_dashboard_revenue_substitutes_menu_price() {
        let state = setup_test_app_state().await;
        let biryani = insert_menu_item(&state.db, "Biryani", 120, 10, "Lunch", at(day(1), 8)).await;
        let chai = insert_menu_item(&state.db, "Chai", 50, 30, "Beverages", at(day(1), 8)).await;
        insert_order(&state.db, biryani.id, 1, Some(Decimal::new(100, 0)), at(day(10), 12)).await;
        insert_order(&state.db, chai.id, 2, None, at(day(10), 16)).await;
        insert_order(&state.db, chai.id, 1, None, at(day(8), 9)).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/api/v1/dashboard")
            .add_query_param("today", "2025-03-10")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<DashboardSummary> = response.json();
        let summary = body.data;
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.orders_today, 2);
        assert_eq!(summary.total_revenue, Decimal::new(250, 0));
        assert_eq!(summary.revenue_today, Decimal::new(200, 0));
        assert_eq!(summary.profit_today, Decimal::new(60, 0));
        // 30 x 50 beats 10 x 120
        assert_eq!(summary.top_selling[0].item, "Chai");
        assert_eq!(summary.daily.len(), 7);
        assert_eq!(summary.daily.last().map(|point| point.orders), Some(2));
        assert_eq!(summary.status_counts.pending, 3);
    }

    #[tokio::test]
    async fn test_dashboard_buckets_orders_by_canteen_clock() {
        let mut state = setup_test_app_state().await;
        state.config = Arc::new(AppConfig {
            utc_offset_minutes: 330,
            ..test_config()
        });
        let dosa = insert_menu_item(&state.db, "Dosa", 40, 0, "Breakfast", at(day(1), 8)).await;
        let breakfast = day(10).and_hms_opt(2, 30, 0).unwrap();
        let after_midnight = day(10).and_hms_opt(20, 0, 0).unwrap();
        insert_order(&state.db, dosa.id, 1, None, breakfast).await;
        insert_order(&state.db, dosa.id, 2, None, after_midnight).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/api/v1/dashboard")
            .add_query_param("today", "2025-03-11")
            .await;

        response.assert_status(StatusCode::OK);
        let summary = response.json::<ApiResponse<DashboardSummary>>().data;
        // 20:00 UTC on the 10th is 01:30 on the 11th at UTC+05:30.
        assert_eq!(summary.orders_today, 1);
        assert_eq!(summary.revenue_today, Decimal::new(80, 0));
        let hours: Vec<(u32, u64)> = summary.orders_by_hour.iter().map(|p| (p.hour, p.orders)).collect();
        assert_eq!(hours, vec![(1, 1), (8, 1)]);
        let last_two: Vec<u64> = summary.daily.iter().rev().take(2).map(|p| p.orders).collect();
        assert_eq!(last_two, vec![1, 1]);
    }

    #[tokio::test]
    async fn test_overview_with_forecast() {
        let forecast = StubForecast {
            entries: Some(vec![
                forecast_entry(day(10), "Thali", 40, 45),
                forecast_entry(day(10), "Thali", 99, 99),
                forecast_entry(day(10), "Dosa", 20, 22),
                forecast_entry(day(11), "Thali", 50, 55),
            ]),
        };
        let state = setup_test_app_state_with(forecast, StubText::default()).await;
        let thali = insert_menu_item(&state.db, "Thali", 80, 0, "Lunch", at(day(1), 8)).await;
        insert_order(&state.db, thali.id, 50, None, at(day(10), 12)).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/api/v1/overview")
            .add_query_param("today", "2025-03-10")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<OverviewSummary> = response.json();
        assert_eq!(body.data.predicted_demand, Some(60));
        assert_eq!(body.data.recommended_servings, Some(67));
        assert_eq!(body.data.servings_today, 50);
        assert_eq!(body.data.surplus, Some(17));
        assert_eq!(body.data.shortage, Some(0));
    }

    #[tokio::test]
    async fn test_overview_without_forecast_service() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.get("/api/v1/overview").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<OverviewSummary> = response.json();
        assert_eq!(body.data.predicted_demand, None);
        assert_eq!(body.data.total_orders, 0);
    }

    #[tokio::test]
    async fn test_forecast_dedups_by_dish_for_selected_date() {
        let forecast = StubForecast {
            entries: Some(vec![
                forecast_entry(day(11), "Thali", 50, 55),
                forecast_entry(day(12), "Thali", 30, 33),
                forecast_entry(day(11), "Thali", 70, 77),
                forecast_entry(day(11), "Dosa", 20, 22),
            ]),
        };
        let state = setup_test_app_state_with(forecast, StubText::default()).await;
        insert_menu_item(&state.db, "thali", 80, 12, "Lunch", at(day(1), 8)).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/api/v1/forecast")
            .add_query_param("date", "2025-03-11")
            .await;

        response.assert_status(StatusCode::OK);
        let view: ApiResponse<ForecastView> = response.json();
        let view = view.data;
        assert_eq!(view.available_dates, vec![day(11), day(12)]);
        assert_eq!(view.selected_date, Some(day(11)));
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].predicted, 50);
        assert_eq!(view.total_predicted, 70);
        assert_eq!(view.total_recommended, 77);
        let thali = view.comparisons.iter().find(|c| c.dish == "Thali").unwrap();
        assert_eq!(thali.sold_today, Some(12));
    }

    #[tokio::test]
    async fn test_forecast_service_down_returns_bad_gateway() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.get("/api/v1/forecast").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "FORECAST_SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_suggestions_parsed_from_fenced_reply() {
        let reply = "Here you go:\n```json\n{\n  \"key_actions\": [\"Prep more thali\", \"Order milk\",],\n  \"waste_reduction\": [\"Reuse rice\"],\n  \"next_day_menu\": [\"Poha\"],\n  \"operational_tips\": [\"Open a second counter\"]\n}\n```";
        let text = StubText { reply: Some(reply.to_string()) };
        let state = setup_test_app_state_with(StubForecast::default(), text).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.get("/api/v1/suggestions").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<SuggestionSet> = response.json();
        assert_eq!(body.data.key_actions, vec!["Prep more thali", "Order milk"]);
        assert_eq!(body.data.waste_reduction, vec!["Reuse rice"]);
        assert_eq!(body.data.operational_tips, vec!["Open a second counter"]);
    }

    #[tokio::test]
    async fn test_suggestions_fallback_on_unparseable_reply() {
        let text = StubText { reply: Some("Sorry, I cannot help with that.".to_string()) };
        let state = setup_test_app_state_with(StubForecast::default(), text).await;
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.get("/api/v1/suggestions").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<SuggestionSet> = response.json();
        assert_eq!(body.data.key_actions, vec![SUGGESTION_FALLBACK.to_string()]);
        assert!(body.data.waste_reduction.is_empty());
        assert!(body.data.next_day_menu.is_empty());
        assert!(body.data.operational_tips.is_empty());
    }

    #[tokio::test]
    async fn test_suggestions_service_down_returns_bad_gateway() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.get("/api/v1/suggestions").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "SUGGESTION_SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_unreachable_text_service_keeps_key_out_of_response() {
        let mut state = setup_test_app_state().await;
        let client = clients::GeminiClient::new(
            "http://127.0.0.1:9/v1beta",
            "m",
            "top-secret-key",
            Duration::from_secs(1),
        )
        .unwrap();
        state.text = Arc::new(client);
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.get("/api/v1/suggestions").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert!(!response.text().contains("top-secret-key"));
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Suggestion service unavailable");
    }

    #[tokio::test]
    async fn test_forecast_outage_detail_stays_in_logs() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.get("/api/v1/forecast").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Forecasting service unavailable");
        assert!(!body.error.contains("offline"));
    }

    #[tokio::test]
    async fn test_writes_publish_change_events() {
        let state = setup_test_app_state().await;
        let item = insert_menu_item(&state.db, "Paratha", 35, 0, "Breakfast", at(day(1), 8)).await;
        let mut orders = state.changes.subscribe(Table::Orders);
        let server = TestServer::new(create_router(state.clone())).unwrap();

        let created: ApiResponse<OrderDto> = server
            .post("/api/v1/orders")
            .json(&order_request(item.id, 1))
            .await
            .json();
        server
            .put(&format!("/api/v1/orders/{}/status", created.data.id))
            .json(&json!({ "status": "ready" }))
            .await
            .assert_status(StatusCode::OK);

        let inserted = orders.recv().await.unwrap();
        assert_eq!(inserted.kind, ChangeKind::Insert);
        assert_eq!(inserted.id, created.data.id);
        let updated = orders.recv().await.unwrap();
        assert_eq!(updated.kind, ChangeKind::Update);
    }

    #[tokio::test]
    async fn test_realtime_stream_emits_events() {
        let state = setup_test_app_state().await;

        let response = stream_changes(Path("orders".to_string()), State(state.clone()))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.headers()["content-type"], "text/event-stream");

        let mut body = response.into_body().into_data_stream();
        state.changes.publish(Table::Orders, ChangeKind::Update, 42);

        let chunk = tokio::time::timeout(Duration::from_secs(2), body.next())
            .await
            .expect("event within timeout")
            .expect("stream still open")
            .expect("readable chunk");
        let text = String::from_utf8(chunk.to_vec()).unwrap();
        assert!(text.contains("event: update"));
        assert!(text.contains(r#""id":42"#));
    }

    #[tokio::test]
    async fn test_realtime_unknown_table() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        let response = server.get("/api/v1/realtime/Payments").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "UNKNOWN_TABLE");
    }

    #[tokio::test]
    async fn test_prometheus_metrics_endpoint() {
        let server = TestServer::new(setup_test_app().await).unwrap();

        // Metrics are only mounted outside test builds
        let response = server.get("/metrics").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
