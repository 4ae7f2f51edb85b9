use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult};
use chrono::Local;

use crate::modules::shifts::use_cases::errors::ApplicationError;
use crate::modules::shifts::use_cases::list_registrations::inbound::graphql::GqlRegistration;
use crate::modules::shifts::use_cases::register_volunteer::command::RegisterVolunteer;
use crate::shell::state::AppState;

/// Machine readable `extensions.code`, mirroring the HTTP status mapping.
pub fn error_code(error: &ApplicationError) -> &'static str {
    match error {
        ApplicationError::Validation(_) => "VALIDATION",
        ApplicationError::SourceUnreachable(_) => "SOURCE_UNREACHABLE",
        e if e.is_revision_conflict() => "REVISION_CONFLICT",
        ApplicationError::WriteFailure(_) => "WRITE_FAILURE",
    }
}

fn to_gql_error(error: &ApplicationError) -> async_graphql::Error {
    let code = error_code(error);
    async_graphql::Error::new(error.to_string()).extend_with(|_, ext| ext.set("code", code))
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register_volunteer(
        &self,
        context: &Context<'_>,
        name: String,
        email: Option<String>,
        shift_reference: String,
    ) -> GqlResult<GqlRegistration> {
        let state = context.data_unchecked::<AppState>();

        let command = RegisterVolunteer {
            volunteer_name: name,
            volunteer_email: email,
            shift_reference,
            submitted_at: Local::now().naive_local(),
        };

        let registration = state
            .register_handler
            .handle(command)
            .await
            .map_err(|e| to_gql_error(&e))?;

        Ok(registration.into())
    }
}
