use actix_web::{post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::GenerateMcqRequest};

#[post("/api/v1/generate-mcq")]
async fn generate_mcq(
    state: web::Data<AppState>,
    request: web::Json<GenerateMcqRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .generation_service
        .generate(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
