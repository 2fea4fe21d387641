/// Login form

use crate::account::{AccountRegistry, Session};
use crate::ui::View;
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub registry: AccountRegistry,
    pub on_login: Callback<Session>,
    pub on_navigate: Callback<View>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let show_password = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_email_input = {
        let email = email.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                email.set(input.value());
                error.set(None);
            }
        })
    };

    let on_password_input = {
        let password = password.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
                error.set(None);
            }
        })
    };

    let on_toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };

    let on_submit = {
        let registry = props.registry.clone();
        let on_login = props.on_login.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();

        Callback::from(move |_: MouseEvent| match registry.login(&email, &password) {
            Ok(session) => on_login.emit(session),
            Err(e) => error.set(Some(e.to_string())),
        })
    };

    let on_signup = props.on_navigate.reform(|_: MouseEvent| View::Register);

    html! {
        <div class="auth-card">
            <h1 class="auth-title">{"Login"}</h1>
            <p class="auth-subtitle">{"Welcome back to ECOMMERCE"}</p>
            <p class="auth-caption">{"The next-gen business marketplace"}</p>

            <label>{"Email"}</label>
            <input
                id="email"
                type="email"
                placeholder="Enter your email"
                value={(*email).clone()}
                oninput={on_email_input}
            />

            <label>{"Password"}</label>
            <div class="password-field">
                <input
                    id="password"
                    type={if *show_password { "text" } else { "password" }}
                    placeholder="Enter your password"
                    value={(*password).clone()}
                    oninput={on_password_input}
                />
                <button class="password-toggle" onclick={on_toggle_password}>
                    {if *show_password { "Hide" } else { "Show" }}
                </button>
            </div>

            if let Some(message) = (*error).clone() {
                <Alert r#type={AlertType::Danger} title={message} inline={true}>
                </Alert>
            }

            <Button onclick={on_submit} variant={ButtonVariant::Primary} block={true}>
                {"Login"}
            </Button>

            <p class="auth-footer">
                {"Don't have an account? "}
                <button class="link-button" onclick={on_signup}>{"Sign up"}</button>
            </p>
        </div>
    }
}
