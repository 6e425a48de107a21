//! Tag-list editor for repeatable free-text items (symptoms, reactions,
//! prescriptions). Enter adds the drafted tag, the close button removes one.

use dioxus::prelude::*;

#[component]
pub fn TagListEditor(
    label: String,
    placeholder: String,
    tags: Signal<Vec<String>>,
) -> Element {
    let mut tags = tags;
    let mut draft = use_signal(String::new);

    let mut commit_draft = move || {
        let tag = draft().trim().to_string();
        if !tag.is_empty() && !tags().contains(&tag) {
            tags.write().push(tag);
        }
        draft.set(String::new());
    };

    let current: Vec<String> = tags();

    rsx! {
        div {
            class: "form-field",
            label { "{label}" }
            div {
                class: "tag-list",
                for (index, tag) in current.into_iter().enumerate() {
                    span {
                        key: "{tag}",
                        class: "tag",
                        "{tag}"
                        button {
                            class: "tag-close",
                            r#type: "button",
                            onclick: move |_| {
                                tags.write().remove(index);
                            },
                            "\u{00d7}"
                        }
                    }
                }
                input {
                    r#type: "text",
                    class: "tag-input",
                    placeholder: "{placeholder}",
                    value: draft(),
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            evt.prevent_default();
                            commit_draft();
                        }
                    },
                }
            }
        }
    }
}
