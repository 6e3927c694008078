use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct StudentInputDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub major: Option<String>,
    pub gpa: Option<f64>,
}

#[derive(utoipa::ToSchema)]
pub struct StudentDoc {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub major: Option<String>,
    pub gpa: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Management API"),
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::create,
        crate::routes::students::get,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            StudentInputDoc,
            StudentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
