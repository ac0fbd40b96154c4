use crate::{
    dom::{Element, Node, NodePath},
    message::MessageArea,
    render::{self, DELETE_CONTROL_CLASS},
};

/// Values currently entered in the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

impl SignupForm {
    /// First required field left blank, mirroring the page's `required` inputs.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.email.trim().is_empty() {
            Some("email")
        } else if self.activity.is_empty() {
            Some("activity")
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }
}

/// Everything the board owns on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDocument {
    pub activities_list: Element,
    pub activity_select: Element,
    pub form: SignupForm,
    pub message: MessageArea,
}

impl Default for BoardDocument {
    fn default() -> Self {
        let activities_list = Element::new("div")
            .with_attr("id", render::LIST_ID)
            .with_child(Element::new("p").with_text(render::LOADING_TEXT));
        let activity_select = Element::new("select")
            .with_attr("id", render::SELECT_ID)
            .with_child(render::placeholder_option());
        Self {
            activities_list,
            activity_select,
            form: SignupForm::default(),
            message: MessageArea::default(),
        }
    }
}

impl BoardDocument {
    /// Option values in dropdown order, placeholder included.
    pub fn option_values(&self) -> Vec<&str> {
        self.activity_select
            .child_elements()
            .filter_map(|option| option.attr("value"))
            .collect()
    }

    pub fn has_option(&self, value: &str) -> bool {
        !value.is_empty() && self.option_values().contains(&value)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Element> {
        self.activities_list
            .child_elements()
            .filter(|element| element.has_class(render::CARD_CLASS))
    }

    pub fn delete_controls(&self) -> Vec<&Element> {
        let mut controls = Vec::new();
        self.activities_list
            .descendants_with_class(DELETE_CONTROL_CLASS, &mut controls);
        controls
    }

    /// Path (relative to the list container) of the delete control for one participant.
    pub fn delete_control_path(&self, activity: &str, email: &str) -> Option<NodePath> {
        self.activities_list.find_path(&|element: &Element| {
            element.has_class(DELETE_CONTROL_CLASS)
                && element.attr(render::DATA_ACTIVITY) == Some(activity)
                && element.attr(render::DATA_EMAIL) == Some(email)
        })
    }

    pub fn to_html(&self) -> String {
        let mut select = self.activity_select.clone();
        render::mark_selected(&mut select, &self.form.activity);
        let email = Element::new("input")
            .with_attr("type", "email")
            .with_attr("id", "email")
            .with_attr("value", self.form.email.clone());
        Element::new("div")
            .with_attr("id", "board")
            .with_child(self.activities_list.clone())
            .with_child(
                Element::new("form")
                    .with_attr("id", "signup-form")
                    .with_child(email)
                    .with_child(select),
            )
            .with_child(Node::Element(self.message.to_element()))
            .to_html()
    }
}
