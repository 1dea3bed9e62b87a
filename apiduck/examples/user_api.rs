//! Documents a small user service and prints the exported JSON.
//!
//! Run with `cargo run -p apiduck --example user_api`.

use apiduck::{
    ApiDocumentation, ApiSchema, Endpoint, Example, Header, Info, InfoContact, InfoLicense,
    Method, QueryParam, Response, Security,
};
use serde::Serialize;

#[derive(ApiSchema, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    Guest,
}

#[derive(ApiSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Short biography shown on the profile page
    #[apiduck(validate = "max=500")]
    pub bio: String,
    pub website: Option<String>,
}

#[derive(ApiSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[apiduck(validate = "required,min=2,max=100")]
    pub display_name: String,
    pub role: Role,
    pub profile: Option<Profile>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(ApiSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[apiduck(validate = "required,min=2,max=100", meta = "example=Ada Lovelace")]
    pub display_name: String,
    #[apiduck(validate = "required,email")]
    pub email: String,
    #[apiduck(meta = "desc=Initial role,default=member")]
    pub role: Role,
    #[apiduck(meta = "desc=Send a welcome mail,default=true")]
    pub notify: bool,
}

#[derive(ApiSchema, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

fn main() -> apiduck::Result<()> {
    let info = Info::new("User API", "1.0.0")
        .with_description("Create and look up users")
        .with_contact(InfoContact::new("API Team").with_email("api@example.com"))
        .with_license(InfoLicense::new("MIT").with_url("https://opensource.org/licenses/MIT"));

    let mut docs = ApiDocumentation::new(info);
    docs.add_server("https://api.example.com", "Production", None)
        .add_server("http://localhost:8080", "Local", None)
        .add_security(Security::bearer("BearerAuth", "JWT access token"));

    let sample = CreateUserRequest {
        display_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        role: Role::Admin,
        notify: false,
    };

    let users = docs.add_tag("Users", "User management");
    users.add_endpoint(
        Endpoint::new(Method::Get, "/users", "List users")
            .with_security(["BearerAuth"])
            .with_query(
                QueryParam::new("page", "integer", "Page number")
                    .with_default(1)
                    .with_min(1),
            )
            .with_query(
                QueryParam::new("role", "string", "Filter by role")
                    .with_enum(["admin", "member", "guest"]),
            )
            .with_response(
                Response::for_status(200)
                    .with_header(Header::new("X-Total-Count", "integer", "Total users", false)),
            ),
    );
    users.add_endpoint(
        Endpoint::new(Method::Post, "/users", "Create user")
            .with_operation_id("createUser")
            .with_security(["BearerAuth"])
            .with_body_of(&sample)
            .with_response(
                Response::for_status(201)
                    .with_schema::<User>()
                    .with_example(Example::from_sample("request", &sample)?),
            )
            .with_response(Response::for_status(422).with_schema::<ErrorBody>()),
    );
    users.add_endpoint(
        Endpoint::new(Method::Get, "/users/{id}", "Get user")
            .with_response(Response::for_status(200).with_schema::<User>())
            .with_response(Response::for_status(404).with_schema::<ErrorBody>()),
    );

    println!("{}", docs.export()?);
    Ok(())
}
