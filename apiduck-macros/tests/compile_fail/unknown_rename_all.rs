//! Test that an unknown rename_all convention is rejected.

use apiduck::ApiSchema;

#[derive(ApiSchema)]
#[apiduck(rename_all = "invalid_case")]
pub struct User {
    pub user_name: String,
}

fn main() {}
