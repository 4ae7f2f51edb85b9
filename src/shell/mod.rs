// Composition root for the shifts bounded context.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the table stores the config names.
// - Wire stores into use case handlers and expose them over HTTP and GraphQL.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
