use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Cafe API", description = "Cafes, their amenities and coffee prices"),
    paths(
        crate::routes::health,
        crate::routes::cafes::all_cafes,
        crate::routes::cafes::search,
        crate::routes::cafes::random,
        crate::routes::cafes::add_cafe,
        crate::routes::cafes::update_price,
        crate::routes::cafes::delete_cafe,
    ),
    tags(
        (name = "health"),
        (name = "cafe")
    )
)]
pub struct ApiDoc;
