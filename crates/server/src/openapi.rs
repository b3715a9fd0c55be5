use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CatDoc { pub id: String, pub name: String, pub age: i32 }

/// `age` may also be sent as a numeric string.
#[derive(ToSchema)]
pub struct CreateCatRequest { pub name: String, pub age: i32 }

#[derive(ToSchema)]
pub struct UpdateCatRequest { pub id: String, pub name: String, pub age: i32 }

#[derive(ToSchema)]
pub struct MessageDoc {
    pub message: String,
    /// Echo of the rejected body on 400 responses
    #[schema(value_type = Option<Object>)]
    pub request: Option<serde_json::Value>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreatedResponseDoc { pub message: String, pub new_cat: CatDoc, pub cats: Vec<CatDoc> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdatedResponseDoc { pub message: String, pub updated_cat: CatDoc, pub cats: Vec<CatDoc> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AdoptedResponseDoc { pub message: String, pub deleted_cat: CatDoc, pub cats: Vec<CatDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cats::create,
        crate::routes::cats::list,
        crate::routes::cats::get,
        crate::routes::cats::update,
        crate::routes::cats::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CatDoc,
            CreateCatRequest,
            UpdateCatRequest,
            MessageDoc,
            CreatedResponseDoc,
            UpdatedResponseDoc,
            AdoptedResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cats")
    )
)]
pub struct ApiDoc;
