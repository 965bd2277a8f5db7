//! Event deletion. Dependent task, schedule, checklist and note rows go
//! with it via the storage-level cascade.

use crate::core::outcome::Outcome;
use crate::core::resolve::resolve_event;
use crate::db::pool::Db;
use crate::db::queries::delete_event;
use crate::errors::AppResult;
use crate::ui::messages::ICON_TRASH;

pub fn remove_event(db: &mut Db, user_id: &str, fragment: &str) -> AppResult<Outcome> {
    let tx = db.conn.transaction()?;

    let Some(target) = resolve_event(&tx, user_id, fragment)? else {
        return Ok(Outcome::NotFound(format!(
            "No event found matching '{fragment}'."
        )));
    };

    delete_event(&tx, target.id)?;
    tx.commit()?;

    Ok(Outcome::Info(format!(
        "{ICON_TRASH} Removed '{}'.",
        target.title
    )))
}
