use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct UploadDoc { pub url: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::storage::get_value,
        crate::routes::storage::put_value,
        crate::routes::storage::list_keys,
        crate::routes::menu::get_menu,
        crate::routes::menu::save_menu,
        crate::routes::upload::upload_image,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            UploadDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "storage"),
        (name = "menu"),
        (name = "upload")
    )
)]
pub struct ApiDoc;
