//! UI events delivered to the board and routing for clicks inside the activity list.

use shared::error::BoardFailure;

use super::SubmissionOutcome;
use crate::{
    dom::{Element, NodePath},
    render::{DATA_ACTIVITY, DATA_EMAIL, DELETE_CONTROL_CLASS},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    PageLoaded,
    EmailInput(String),
    ActivitySelected(String),
    SignupSubmitted,
    /// A click anywhere inside the activity list; `target` is the path from the list
    /// container to the clicked node.
    ListClicked { target: NodePath },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Loaded(Result<usize, BoardFailure>),
    FormUpdated,
    Submission(SubmissionOutcome),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRole {
    Unregister,
}

/// Class carried by a control → what activating it means. One delegated listener on the
/// list consults this, so freshly rendered controls need no registration.
const CONTROL_ROUTES: &[(&str, ControlRole)] = &[(DELETE_CONTROL_CLASS, ControlRole::Unregister)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    Unregister { activity: String, email: String },
}

pub fn route_click(list: &Element, target: &[usize]) -> Option<ControlAction> {
    CONTROL_ROUTES.iter().find_map(|(class, role)| {
        let control = list.closest(target, class)?;
        action_for(*role, control)
    })
}

fn action_for(role: ControlRole, control: &Element) -> Option<ControlAction> {
    match role {
        ControlRole::Unregister => {
            let activity = control.attr(DATA_ACTIVITY).filter(|v| !v.is_empty())?;
            let email = control.attr(DATA_EMAIL).filter(|v| !v.is_empty())?;
            Some(ControlAction::Unregister {
                activity: activity.to_string(),
                email: email.to_string(),
            })
        }
    }
}
