use async_graphql::{EmptySubscription, MergedObject, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, response::Html};

use crate::modules::shifts::use_cases::list_available_slots::inbound::graphql::AvailableSlotsQuery;
use crate::modules::shifts::use_cases::list_registrations::inbound::graphql::RegistrationsListQuery;
pub use crate::modules::shifts::use_cases::register_volunteer::inbound::graphql::MutationRoot;
use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(AvailableSlotsQuery, RegistrationsListQuery);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

pub async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub async fn graphiql() -> Html<String> {
    use async_graphql::http::GraphiQLSource;
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
