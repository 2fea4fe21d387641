/// Registration form

use crate::account::AccountRegistry;
use crate::error::{Field, RegisterError};
use crate::ui::View;
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RegisterPageProps {
    pub registry: AccountRegistry,
    pub on_navigate: Callback<View>,
}

fn text_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

fn field_error(error: &Option<RegisterError>, field: Field) -> Html {
    match error.as_ref().and_then(|e| e.field_message(field)) {
        Some(message) => html! { <span class="field-error">{message}</span> },
        None => html! {},
    }
}

#[function_component(RegisterPage)]
pub fn register_page(props: &RegisterPageProps) -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<RegisterError>);

    let on_submit = {
        let registry = props.registry.clone();
        let on_navigate = props.on_navigate.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();

        Callback::from(move |_: MouseEvent| {
            match registry.register(&name, &email, &password) {
                Ok(()) => {
                    error.set(None);
                    match registry.issue_verification(&email) {
                        Ok(_) => on_navigate.emit(View::Verify),
                        Err(e) => {
                            log::error!("could not issue verification code: {}", e);
                            on_navigate.emit(View::Login);
                        }
                    }
                }
                Err(e) => error.set(Some(e)),
            }
        })
    };

    let on_login = props.on_navigate.reform(|_: MouseEvent| View::Login);

    html! {
        <div class="auth-card">
            <h1 class="auth-title">{"Create your account"}</h1>

            <div class="form-field">
                <label>{"Name"}</label>
                <input
                    type="text"
                    placeholder="Name"
                    value={(*name).clone()}
                    oninput={text_input(&name)}
                />
                {field_error(&error, Field::Name)}
            </div>

            <div class="form-field">
                <label>{"Email"}</label>
                <input
                    type="email"
                    placeholder="Email"
                    value={(*email).clone()}
                    oninput={text_input(&email)}
                />
                {field_error(&error, Field::Email)}
            </div>

            <div class="form-field">
                <label>{"Password"}</label>
                <input
                    type="password"
                    placeholder="Password"
                    value={(*password).clone()}
                    oninput={text_input(&password)}
                />
                {field_error(&error, Field::Password)}
            </div>

            if let Some(RegisterError::Persistence(_)) = &*error {
                <Alert r#type={AlertType::Danger} title={"Registration failed. Please try again."} inline={true}>
                </Alert>
            }

            <Button onclick={on_submit} variant={ButtonVariant::Primary} block={true}>
                {"Create account"}
            </Button>

            <p class="auth-footer">
                <button class="link-button" onclick={on_login}>{"Have an Account? Login"}</button>
            </p>
        </div>
    }
}
