//! Checklist items and tags attached to a task, located through the same
//! title resolution the other tools use.

use crate::core::outcome::Outcome;
use crate::core::resolve::resolve_event;
use crate::db::pool::Db;
use crate::db::queries::{insert_checklist_item, link_task_tag, task_id_for_event, upsert_tag};
use crate::errors::AppResult;

pub fn add_checklist_item(
    db: &mut Db,
    user_id: &str,
    fragment: &str,
    text: &str,
) -> AppResult<Outcome> {
    let tx = db.conn.transaction()?;

    let Some(target) = resolve_event(&tx, user_id, fragment)? else {
        return Ok(Outcome::NotFound(format!(
            "No event found matching '{fragment}'."
        )));
    };
    let Some(task_id) = task_id_for_event(&tx, target.id)? else {
        return Ok(Outcome::NotFound(format!(
            "'{}' has no task to attach a checklist item to.",
            target.title
        )));
    };

    insert_checklist_item(&tx, task_id, text)?;
    tx.commit()?;

    Ok(Outcome::success(format!(
        "Checklist item added to '{}'.",
        target.title
    )))
}

pub fn tag_task(db: &mut Db, user_id: &str, fragment: &str, name: &str) -> AppResult<Outcome> {
    let tx = db.conn.transaction()?;

    let Some(target) = resolve_event(&tx, user_id, fragment)? else {
        return Ok(Outcome::NotFound(format!(
            "No event found matching '{fragment}'."
        )));
    };
    let Some(task_id) = task_id_for_event(&tx, target.id)? else {
        return Ok(Outcome::NotFound(format!(
            "'{}' has no task to tag.",
            target.title
        )));
    };

    let tag_id = upsert_tag(&tx, user_id, name)?;
    link_task_tag(&tx, task_id, tag_id)?;
    tx.commit()?;

    Ok(Outcome::success(format!(
        "Tagged '{}' with #{}.",
        target.title, name
    )))
}
