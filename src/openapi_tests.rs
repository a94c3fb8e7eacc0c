#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{schema::Schema, PathItemType, RefOr};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();
        for name in [
            "ErrorResponse",
            "HealthResponse",
            "MenuItemDto",
            "IngredientDto",
            "OrderDto",
            "OrderStatus",
            "DashboardSummary",
            "ForecastView",
            "SuggestionSet",
            "ChangeEvent",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
        assert_eq!(openapi.info.title, "Canteen API");
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");
        for field in ["status", "version", "database"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_menu_item_schema_carries_ingredient_links() {
        let properties = object_properties("MenuItemDto");
        for field in ["id", "item", "price", "availability", "sold_today", "ingredients"] {
            assert!(properties.iter().any(|p| p == field), "missing field {}", field);
        }
    }

    #[test]
    fn test_openapi_paths_contain_health_endpoint() {
        let openapi = ApiDoc::openapi();

        let health_path = openapi.paths.paths.get("/health").unwrap();
        let health_get = health_path.operations.get(&PathItemType::Get).unwrap();

        assert!(health_get.responses.responses.contains_key("200"));
        assert!(health_get.responses.responses.contains_key("500"));
    }

    #[test]
    fn test_openapi_documents_every_route() {
        let openapi = ApiDoc::openapi();
        let expected = [
            ("/api/v1/menu", PathItemType::Get),
            ("/api/v1/menu", PathItemType::Post),
            ("/api/v1/menu/{menu_id}", PathItemType::Put),
            ("/api/v1/ingredients", PathItemType::Get),
            ("/api/v1/ingredients", PathItemType::Post),
            ("/api/v1/ingredients/{ingredient_id}", PathItemType::Put),
            ("/api/v1/orders", PathItemType::Get),
            ("/api/v1/orders", PathItemType::Post),
            ("/api/v1/orders/{order_id}/status", PathItemType::Put),
            ("/api/v1/students", PathItemType::Get),
            ("/api/v1/students", PathItemType::Post),
            ("/api/v1/dashboard", PathItemType::Get),
            ("/api/v1/overview", PathItemType::Get),
            ("/api/v1/forecast", PathItemType::Get),
            ("/api/v1/suggestions", PathItemType::Get),
            ("/api/v1/realtime/{table}", PathItemType::Get),
        ];

        for (path, method) in expected {
            let item = openapi
                .paths
                .paths
                .get(path)
                .unwrap_or_else(|| panic!("missing path {}", path));
            assert!(item.operations.contains_key(&method), "missing operation on {}", path);
        }
    }

    #[test]
    fn test_upstream_failures_documented_as_bad_gateway() {
        let openapi = ApiDoc::openapi();
        for path in ["/api/v1/forecast", "/api/v1/suggestions"] {
            let get = openapi.paths.paths[path].operations.get(&PathItemType::Get).unwrap();
            assert!(get.responses.responses.contains_key("502"), "{} lacks 502", path);
        }
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi = ApiDoc::openapi();
        let openapi_json = serde_json::to_string(&openapi).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("ErrorResponse"));
    }
}
