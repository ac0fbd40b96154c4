//! Rebuilds the activity list and dropdown from view models.

use crate::{
    document::BoardDocument,
    dom::{Element, Node},
    view::{ActivityCardView, ParticipantRow},
};

pub const LIST_ID: &str = "activities-list";
pub const SELECT_ID: &str = "activity";
pub const CARD_CLASS: &str = "activity-card";
pub const DELETE_CONTROL_CLASS: &str = "delete-btn";
pub const DATA_ACTIVITY: &str = "data-activity";
pub const DATA_EMAIL: &str = "data-email";

pub const PLACEHOLDER_LABEL: &str = "-- Select an activity --";
pub const LOADING_TEXT: &str = "Loading activities...";
pub const LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";
pub const NO_PARTICIPANTS_TEXT: &str = "No participants yet.";
const DELETE_CONTROL_TITLE: &str = "Unregister participant";
const DELETE_CONTROL_LABEL: &str = "✖";

/// Full replacement of list and dropdown; nothing from the previous render survives.
pub fn render_board(document: &mut BoardDocument, views: &[ActivityCardView]) {
    document
        .activities_list
        .replace_children(views.iter().map(|view| Node::from(card(view))).collect());

    let mut options = Vec::with_capacity(views.len() + 1);
    options.push(Node::from(placeholder_option()));
    options.extend(views.iter().map(|view| {
        Node::from(
            Element::new("option")
                .with_attr("value", view.name.clone())
                .with_text(view.name.clone()),
        )
    }));
    document.activity_select.replace_children(options);

    // A selection survives the rebuild only if its activity still exists.
    if !document.has_option(&document.form.activity) {
        document.form.activity.clear();
    }
}

/// Puts the fallback text in place of the list. The dropdown keeps its last options.
pub fn render_load_failure(document: &mut BoardDocument) {
    document
        .activities_list
        .replace_children(vec![Element::new("p").with_text(LOAD_FAILURE_TEXT).into()]);
}

pub fn placeholder_option() -> Element {
    Element::new("option")
        .with_attr("value", "")
        .with_text(PLACEHOLDER_LABEL)
}

/// Flags the option whose value equals `value`; an empty value leaves the placeholder chosen.
pub fn mark_selected(select: &mut Element, value: &str) {
    for option in select.child_elements_mut() {
        if !value.is_empty() && option.attr("value") == Some(value) {
            option.set_attr("selected", "selected");
        } else {
            option.remove_attr("selected");
        }
    }
}

fn card(view: &ActivityCardView) -> Element {
    Element::new("div")
        .with_class(CARD_CLASS)
        .with_child(Element::new("h4").with_text(view.name.clone()))
        .with_child(Element::new("p").with_text(view.description.clone()))
        .with_child(labelled("Schedule:", view.schedule.clone()))
        .with_child(labelled(
            "Availability:",
            format!("{} spots left", view.spots_left),
        ))
        .with_child(participants_section(&view.participants))
}

fn labelled(label: &str, value: String) -> Element {
    Element::new("p")
        .with_child(Element::new("strong").with_text(label))
        .with_text(format!(" {value}"))
}

fn participants_section(participants: &[ParticipantRow]) -> Element {
    let section = Element::new("div")
        .with_class("participants-section")
        .with_child(Element::new("strong").with_text("Participants:"));

    if participants.is_empty() {
        return section.with_child(
            Element::new("p")
                .with_class("no-participants")
                .with_text(NO_PARTICIPANTS_TEXT),
        );
    }

    let list = participants
        .iter()
        .fold(Element::new("ul").with_class("participants-list"), |list, row| {
            list.with_child(participant_row(row))
        });
    section.with_child(list)
}

fn participant_row(row: &ParticipantRow) -> Element {
    Element::new("li")
        .with_child(Element::new("span").with_text(row.email.clone()))
        .with_child(
            Element::new("button")
                .with_class(DELETE_CONTROL_CLASS)
                .with_attr(DATA_ACTIVITY, row.activity.clone())
                .with_attr(DATA_EMAIL, row.email.clone())
                .with_attr("title", DELETE_CONTROL_TITLE)
                .with_text(DELETE_CONTROL_LABEL),
        )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
