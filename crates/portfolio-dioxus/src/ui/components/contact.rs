use super::{FadeIn, Section};
use dioxus::core::Task;
use dioxus::prelude::*;
use portfolio_engine::contact::{SEND_LATENCY, STATUS_LINGER};
use portfolio_engine::{Animation, ContactForm, FormField, FormStatus, Profile};

#[component]
pub fn Contact(profile: Profile) -> Element {
    let mut form = use_signal(ContactForm::new);
    let mut error = use_signal(|| None::<String>);
    let mut send_task = use_signal(|| None::<Task>);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let submitted = form.write().submit();
        match submitted {
            Ok(ticket) => {
                error.set(None);
                if let Some(previous) = send_task.write().take() {
                    previous.cancel();
                }
                // Simulated send; the task dies with the component
                let task = spawn(async move {
                    tokio::time::sleep(SEND_LATENCY).await;
                    form.write().complete_send(ticket);
                    tokio::time::sleep(STATUS_LINGER).await;
                    form.write().clear_status(ticket);
                });
                send_task.set(Some(task));
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let current = form.read().clone();
    let sending = current.is_sending();

    rsx! {
        Section {
            id: "contact",
            class: "alt",
            FadeIn {
                id: "contact-heading",
                class: "section-heading",
                h3 { "Contact Me" }
                p { class: "muted", "I am currently open to new opportunities. Let's build something great." }
            }
            div {
                class: "two-column",
                FadeIn {
                    id: "contact-info",
                    animation: Animation::FadeInLeft,
                    delay_ms: 200,
                    class: "contact-info",
                    h4 { "Contact Information" }
                    if let Some(email) = &profile.email {
                        a { href: "mailto:{email}", "{email}" }
                    }
                    if let Some(linkedin) = &profile.linkedin {
                        a { href: "{linkedin}", target: "_blank", rel: "noopener noreferrer", "{linkedin}" }
                    }
                    if let Some(github) = &profile.github {
                        a { href: "{github}", target: "_blank", rel: "noopener noreferrer", "{github}" }
                    }
                }
                FadeIn {
                    id: "contact-form",
                    animation: Animation::FadeInRight,
                    delay_ms: 400,
                    class: "card",
                    form {
                        class: "contact-form",
                        onsubmit,
                        label { r#for: "name", "Name" }
                        input {
                            r#type: "text",
                            id: "name",
                            name: "name",
                            value: "{current.name}",
                            oninput: move |evt| form.write().set(FormField::Name, evt.value())
                        }
                        label { r#for: "email", "Email" }
                        input {
                            r#type: "email",
                            id: "email",
                            name: "email",
                            value: "{current.email}",
                            oninput: move |evt| form.write().set(FormField::Email, evt.value())
                        }
                        label { r#for: "message", "Message" }
                        textarea {
                            id: "message",
                            name: "message",
                            rows: "5",
                            value: "{current.message}",
                            oninput: move |evt| form.write().set(FormField::Message, evt.value())
                        }
                        button {
                            class: "button primary",
                            r#type: "submit",
                            disabled: sending,
                            if sending { "Sending..." } else { "Send Message" }
                        }
                        FormStatusLine { status: current.status(), error: error() }
                    }
                }
            }
        }
    }
}

#[component]
pub fn FormStatusLine(status: FormStatus, error: Option<String>) -> Element {
    if let Some(error) = error {
        return rsx! {
            p { class: "status error", "{error}" }
        };
    }

    let class = if status == FormStatus::Sent {
        "status sent"
    } else {
        "status pending"
    };

    rsx! {
        if let Some(message) = status.message() {
            p { class: "{class}", "{message}" }
        }
    }
}
