//! Test that unions are rejected.

use apiduck::ApiSchema;

#[derive(ApiSchema)]
pub union Bits {
    pub int: u32,
    pub float: f32,
}

fn main() {}
