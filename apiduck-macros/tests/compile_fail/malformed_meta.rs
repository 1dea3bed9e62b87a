//! Test that a metadata pair without `=` is rejected.

use apiduck::ApiSchema;

#[derive(ApiSchema)]
pub struct User {
    #[apiduck(meta = "desc")]
    pub name: String,
}

fn main() {}
