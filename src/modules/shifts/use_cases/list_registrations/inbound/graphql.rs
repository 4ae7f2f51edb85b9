use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::shifts::core::registration::Registration;
use crate::modules::shifts::core::slots::parse_user_date;
use crate::modules::shifts::use_cases::list_registrations::handler::PublicRegistration;
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlRegistration {
    pub volunteer_name: String,
    pub shift_reference: String,
    pub time_band: String,
}

impl From<PublicRegistration> for GqlRegistration {
    fn from(r: PublicRegistration) -> Self {
        Self {
            volunteer_name: r.volunteer_name,
            shift_reference: r.shift_reference,
            time_band: r.time_band,
        }
    }
}

impl From<Registration> for GqlRegistration {
    fn from(r: Registration) -> Self {
        PublicRegistration::from(r).into()
    }
}

#[derive(Default)]
pub struct RegistrationsListQuery;

#[Object]
impl RegistrationsListQuery {
    async fn registrations(
        &self,
        context: &Context<'_>,
        date: String,
    ) -> GqlResult<Vec<GqlRegistration>> {
        let state = context.data_unchecked::<AppState>();
        let date = parse_user_date(&date)
            .ok_or_else(|| async_graphql::Error::new(format!("invalid date: {date}")))?;
        let list = state.registrations.public_for_date(date).await;
        Ok(list.into_iter().map(Into::into).collect())
    }
}
