//! Fetches the activity set and turns it into card view models.

use client_core::{ActivityApi, ApiFailure};
use tracing::debug;

use crate::view::{build_views, ActivityCardView};

pub async fn load_views(api: &dyn ActivityApi) -> Result<Vec<ActivityCardView>, ApiFailure> {
    let activities = api.load_activities().await?;
    let views = build_views(&activities);
    debug!(count = views.len(), "built activity views");
    Ok(views)
}
