use common::{CreateIngredientRequest, IngredientDto, UpdateIngredientRequest};

use super::{get, post, put};

pub async fn get_ingredients() -> Result<Vec<IngredientDto>, String> {
    get("/ingredients").await
}

pub async fn create_ingredient(request: CreateIngredientRequest) -> Result<IngredientDto, String> {
    post("/ingredients", &request).await
}

pub async fn update_ingredient(id: i32, request: UpdateIngredientRequest) -> Result<IngredientDto, String> {
    put(&format!("/ingredients/{}", id), &request).await
}
