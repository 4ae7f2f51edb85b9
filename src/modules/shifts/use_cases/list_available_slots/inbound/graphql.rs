use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::shifts::core::slots::{Slot, parse_user_date};
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlSlot {
    pub time_band: String,
    pub shift_reference: String,
    pub capacity_remaining: u32,
}

impl From<Slot> for GqlSlot {
    fn from(s: Slot) -> Self {
        Self {
            time_band: s.time_band,
            shift_reference: s.shift_reference.to_string(),
            capacity_remaining: s.capacity_remaining,
        }
    }
}

#[derive(Default)]
pub struct AvailableSlotsQuery;

#[Object]
impl AvailableSlotsQuery {
    async fn available_slots(&self, context: &Context<'_>, date: String) -> GqlResult<Vec<GqlSlot>> {
        let state = context.data_unchecked::<AppState>();
        let date = parse_user_date(&date)
            .ok_or_else(|| async_graphql::Error::new(format!("invalid date: {date}")))?;
        let slots = state
            .availability
            .slots_for(date)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(slots.into_iter().map(Into::into).collect())
    }
}
