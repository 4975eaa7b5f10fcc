pub const SIMPLE_QUERY: &str =
    include_str!("simple_query.graphql");
pub const COMPLEX_QUERY: &str =
    include_str!("complex_query.graphql");
pub const LARGE_VALUE: &str =
    include_str!("large_value.graphql");

pub mod operations;
