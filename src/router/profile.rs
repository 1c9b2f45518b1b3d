use astra::Request;
use tracing::info;

use super::request::{optional, parse_form, unix_now};
use super::Done;
use crate::auth::SessionContext;
use crate::db::profiles::update_profile;
use crate::domain::profile::normalize_postcode;
use crate::domain::ProfileUpdate;
use crate::errors::ServerError;
use crate::state::AppState;
use crate::templates::components::LEADS_CHANGED;

pub fn save(req: &mut Request, state: &AppState, session: &SessionContext) -> Result<Done, ServerError> {
    let form = parse_form(req)?;
    let update = ProfileUpdate {
        first_name: optional(&form, "first_name").unwrap_or_default(),
        last_name: optional(&form, "last_name").unwrap_or_default(),
        phone: optional(&form, "phone"),
        postcode: optional(&form, "postcode")
            .map(|p| normalize_postcode(&p))
            .filter(|p| !p.is_empty()),
        business_name: optional(&form, "business_name"),
        trade_specialty: optional(&form, "trade_specialty"),
        profile_description: optional(&form, "profile_description"),
    };

    let profile_id = session.profile_id();
    let now = unix_now();
    state
        .db
        .with_conn(|conn| update_profile(conn, profile_id, &update, now))?;
    info!(profile_id, "profile updated");

    // A new postcode changes which leads a trade sees.
    state.invalidate_leads();
    Ok(Done::new("Profile saved.", &[LEADS_CHANGED]))
}
