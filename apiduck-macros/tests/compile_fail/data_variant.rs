//! Test that enums with data-carrying variants are rejected.

use apiduck::ApiSchema;

#[derive(ApiSchema)]
pub enum Shape {
    Point,
    Circle(f64),
}

fn main() {}
